//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{Agent, Env, EpisodeStats, Scores};
use anyhow::Result;
use log::debug;

/// Runs an agent for a fixed number of environment steps and summarizes the
/// returns of the completed episodes.
///
/// The budget is given in steps rather than episodes, as episodes of a finite MDP
/// may never terminate under a poor policy. The agent is not updated.
pub struct DefaultEvaluator<E: Env> {
    /// The number of environment steps per evaluation.
    n_steps: usize,

    /// The number of evaluations done so far, used as the reset index.
    n_evals: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<A>(&mut self, agent: &mut A) -> Result<Scores>
    where
        A: Agent<E>,
    {
        let mut stats = EpisodeStats::new(self.env.info().gamma);
        let mut prev_obs = self.env.reset_with_index(self.n_evals)?;
        agent.episode_start();
        self.n_evals += 1;

        for _ in 0..self.n_steps {
            let act = agent.sample(&prev_obs);
            let (step, _) = self.env.step(&act);
            stats.push(step.reward, step.is_done());
            prev_obs = if step.is_done() {
                let obs = self.env.reset()?;
                agent.episode_start();
                obs
            } else {
                step.obs
            };
        }

        debug!("Evaluated {} episodes", stats.n_episodes());
        Ok(stats.scores())
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `n_steps` - Number of environment steps per evaluation
    pub fn new(config: &E::Config, seed: i64, n_steps: usize) -> Result<Self> {
        Ok(Self {
            n_steps,
            n_evals: 0,
            env: E::build(config, seed)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::{DummyAgent, DummyEnv, DummyEnvConfig};

    #[test]
    fn test_evaluate_counts_complete_episodes() -> Result<()> {
        let config = DummyEnvConfig {
            n_states: 3,
            horizon: None,
        };
        let mut evaluator = DefaultEvaluator::<DummyEnv>::new(&config, 0, 7)?;
        let mut agent = DummyAgent::new(1);
        agent.eval();

        // Each episode takes 2 steps, 7 steps give 3 complete episodes
        let scores = evaluator.evaluate(&mut agent)?;
        assert_eq!(scores.n_episodes, 3);
        assert_eq!(scores.mean, 1.0);
        assert_eq!(scores.disc_mean, 0.5);
        assert_eq!(scores.mean_len, 2.0);
        assert_eq!(agent.n_opts, 0);
        assert_eq!(agent.n_episodes, 4);
        Ok(())
    }

    #[test]
    fn test_evaluate_with_truncation() -> Result<()> {
        let config = DummyEnvConfig {
            n_states: 3,
            horizon: Some(4),
        };
        let mut evaluator = DefaultEvaluator::<DummyEnv>::new(&config, 0, 8)?;

        // The agent never moves, episodes are truncated by the horizon
        let mut agent = DummyAgent::new(0);
        let scores = evaluator.evaluate(&mut agent)?;
        assert_eq!(scores.n_episodes, 2);
        assert_eq!(scores.max, 0.0);
        assert_eq!(scores.mean_len, 4.0);
        Ok(())
    }
}
