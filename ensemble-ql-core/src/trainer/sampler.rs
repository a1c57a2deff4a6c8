//! Experience sampling.
//!
//! The sampler owns the training environment and a step processor. At every call of
//! [`Sampler::sample_and_opt`] it asks the agent for an action, applies it to the
//! environment, turns the resulting [`Step`](crate::Step) into a transition and
//! hands it over to the agent for an optimization step.
use crate::{record::Record, Agent, Env, StepProcessor, Transition};
use anyhow::Result;
use log::trace;

/// Manages the interaction between an agent and the training environment.
///
/// # Type Parameters
///
/// * `E` - The environment type
/// * `P` - The step processor type
pub struct Sampler<E, P>
where
    E: Env,
    P: StepProcessor<E, Output = Transition<E>>,
{
    /// The environment being sampled from
    env: E,

    /// Previous observation from the environment
    prev_obs: Option<E::Obs>,

    /// Processor for converting steps into transitions
    step_processor: P,
}

impl<E, P> Sampler<E, P>
where
    E: Env,
    P: StepProcessor<E, Output = Transition<E>>,
{
    /// Creates a new sampler with the given environment and step processor.
    pub fn new(env: E, step_processor: P) -> Self {
        Self {
            env,
            prev_obs: None,
            step_processor,
        }
    }

    /// The environment of the sampler.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Forces the next call of [`Sampler::sample_and_opt`] to start a new episode.
    pub fn reset(&mut self) {
        self.prev_obs = None;
    }

    /// Samples a transition and performs an optimization step of the agent with it.
    ///
    /// Returns the record of the environment step merged with the one of the agent,
    /// the reward and whether the episode ended.
    pub fn sample_and_opt<A>(&mut self, agent: &mut A) -> Result<(Record, f64, bool)>
    where
        A: Agent<E>,
    {
        // Reset environment if required
        let obs = match self.prev_obs.take() {
            Some(obs) => obs,
            None => {
                let obs = self.env.reset()?;
                self.step_processor.reset(obs.clone());
                agent.episode_start();
                obs
            }
        };

        // Sample an action and apply it to the environment
        let act = agent.sample(&obs);
        let (step, record) = self.env.step_with_reset(&act);
        let is_done = step.is_done();
        let reward = step.reward;

        // Update previous observation
        self.prev_obs = match is_done {
            true => match step.init_obs.clone() {
                Some(obs) => Some(obs),
                None => anyhow::bail!("Environment did not reset at the end of an episode"),
            },
            false => Some(step.obs.clone()),
        };

        // Produce transition and update the agent
        let transition = self.step_processor.process(step);
        let record = record.merge(agent.opt_with_record(&transition));

        if is_done {
            trace!("Episode ended");
            agent.episode_start();
        }

        Ok((record, reward, is_done))
    }
}
