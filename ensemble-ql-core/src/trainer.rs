//! Train [`Agent`].
mod config;
mod sampler;
use crate::{
    record::{AggregateRecorder, RecordValue},
    Agent, Env, EpisodeStats, Evaluator, Scores, StepProcessor, Transition,
};
use anyhow::Result;
use chrono::Local;
pub use config::TrainerConfig;
use log::info;
pub use sampler::Sampler;

/// Scores of the training and evaluation phases of an epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochScores {
    /// Epoch, starting from 1.
    pub epoch: usize,

    /// Scores of the episodes completed while training.
    pub train: Scores,

    /// Scores of the episodes completed while evaluating.
    pub eval: Scores,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the experiment loop.
///
/// # Experiment loop
///
/// For each of `n_epochs` epochs:
///
/// 1. Set the agent to training mode and start a new episode of the training
///    environment.
/// 2. Repeat `train_steps_per_epoch` times: sample an action from the agent, apply it
///    to the environment, and update the agent with the resulting transition.
/// 3. Compute the [`Scores`] of the episodes completed in step 2.
/// 4. Set the agent to evaluation mode and run the [`Evaluator`] for its step budget.
/// 5. Store the scores of both phases (and optionally a snapshot of the action-value
///    tables) in the recorder and flush it with the number of training steps so far.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|Env::Obs|A
///     B -->|"Step&lt;E: Env&gt;"|C[StepProcessor]
///     C -->|Transition|A
/// ```
pub struct Trainer<E, P>
where
    E: Env,
    P: StepProcessor<E, Output = Transition<E>>,
{
    /// Configuration of the environment for training.
    env_config_train: E::Config,

    /// Configuration of the transition producer.
    step_proc_config: P::Config,

    /// The number of epochs.
    n_epochs: usize,

    /// Training steps per epoch.
    train_steps_per_epoch: usize,

    /// If snapshots of the action-value tables are recorded.
    record_q_snapshot: bool,

    /// Random seed of the training environment.
    seed: i64,
}

impl<E, P> Trainer<E, P>
where
    E: Env,
    P: StepProcessor<E, Output = Transition<E>>,
{
    /// Constructs a trainer.
    pub fn build(
        config: TrainerConfig,
        env_config_train: E::Config,
        step_proc_config: P::Config,
    ) -> Self {
        Self {
            env_config_train,
            step_proc_config,
            n_epochs: config.n_epochs,
            train_steps_per_epoch: config.train_steps_per_epoch,
            record_q_snapshot: config.record_q_snapshot,
            seed: config.seed,
        }
    }

    /// Runs the training phase of an epoch.
    fn train_epoch<A>(&self, agent: &mut A, sampler: &mut Sampler<E, P>) -> Result<Scores>
    where
        A: Agent<E>,
    {
        let mut stats = EpisodeStats::new(sampler.env().info().gamma);
        sampler.reset();
        agent.train();

        for _ in 0..self.train_steps_per_epoch {
            let (_, reward, is_done) = sampler.sample_and_opt(agent)?;
            stats.push(reward, is_done);
        }

        Ok(stats.scores())
    }

    /// Train the agent.
    ///
    /// Returns the scores of all epochs.
    pub fn train<A, D>(
        &mut self,
        agent: &mut A,
        recorder: &mut dyn AggregateRecorder,
        evaluator: &mut D,
    ) -> Result<Vec<EpochScores>>
    where
        A: Agent<E>,
        D: Evaluator<E>,
    {
        let env = E::build(&self.env_config_train, self.seed)?;
        let producer = P::build(&self.step_proc_config);
        let mut sampler = Sampler::new(env, producer);
        let mut results = Vec::with_capacity(self.n_epochs);

        for epoch in 1..=self.n_epochs {
            let train = self.train_epoch(agent, &mut sampler)?;
            info!("Epoch {}, train: {:?}", epoch, train);

            agent.eval();
            let eval = evaluator.evaluate(agent)?;
            agent.train();
            info!("Epoch {}, evaluation: {:?}", epoch, eval);

            let mut record = train.to_record("train").merge(eval.to_record("eval"));
            record.insert("epoch", RecordValue::Scalar(epoch as f32));
            record.insert("datetime", RecordValue::DateTime(Local::now()));
            if self.record_q_snapshot {
                record.insert("q", agent.q_snapshot().to_record_value());
            }
            recorder.store(record);
            recorder.flush((epoch * self.train_steps_per_epoch) as i64);

            results.push(EpochScores { epoch, train, eval });
        }

        Ok(results)
    }
}
