//! A generic implementation of [`StepProcessor`].
use crate::{Env, Step, StepProcessor};
use std::default::Default;

/// A transition `(s_t, a_t, r_t, s_t+1, terminal)` consumed by an agent.
pub struct Transition<E: Env> {
    /// State before the action.
    pub state: E::Obs,

    /// Action taken.
    pub act: E::Act,

    /// Reward.
    pub reward: f64,

    /// State after the action.
    pub next_state: E::Obs,

    /// If `next_state` is absorbing. Truncated episodes are not terminal.
    pub is_terminated: bool,
}

impl<E: Env> Clone for Transition<E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            act: self.act.clone(),
            reward: self.reward,
            next_state: self.next_state.clone(),
            is_terminated: self.is_terminated,
        }
    }
}

/// Configuration of [`SimpleStepProcessor`].
#[derive(Clone, Debug, Default)]
pub struct SimpleStepProcessorConfig {}

/// A generic implementation of [`StepProcessor`].
///
/// It supports 1-step TD backup: the observation of the previous step is kept and
/// paired with the action, reward and observation of the current step.
pub struct SimpleStepProcessor<E: Env> {
    prev_obs: Option<E::Obs>,
}

impl<E: Env> StepProcessor<E> for SimpleStepProcessor<E> {
    type Config = SimpleStepProcessorConfig;
    type Output = Transition<E>;

    fn build(_config: &Self::Config) -> Self {
        Self { prev_obs: None }
    }

    fn reset(&mut self, init_obs: E::Obs) {
        self.prev_obs = Some(init_obs);
    }

    fn process(&mut self, step: Step<E>) -> Self::Output {
        let state = match self.prev_obs.replace(step.obs.clone()) {
            Some(obs) => obs,
            None => panic!("prev_obs is not set. Forgot to call reset()?"),
        };

        if step.is_done() {
            self.prev_obs = step.init_obs;
        }

        Transition {
            state,
            act: step.act,
            reward: step.reward,
            next_state: step.obs,
            is_terminated: step.is_terminated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::{DummyAct, DummyEnv, DummyObs};

    fn step(obs: usize, act: usize, is_terminated: bool, init_obs: Option<usize>) -> Step<DummyEnv> {
        Step::new(
            DummyObs(obs),
            DummyAct(act),
            1.0,
            is_terminated,
            false,
            (),
            init_obs.map(DummyObs),
        )
    }

    #[test]
    fn test_pairs_previous_observation() {
        let mut proc = SimpleStepProcessor::<DummyEnv>::build(&Default::default());
        proc.reset(DummyObs(0));

        let tr = proc.process(step(1, 1, false, None));
        assert_eq!((tr.state.0, tr.act.0, tr.next_state.0), (0, 1, 1));

        let tr = proc.process(step(2, 0, true, Some(0)));
        assert_eq!((tr.state.0, tr.next_state.0), (1, 2));
        assert!(tr.is_terminated);

        // After the end of the episode, the initial observation is the previous one
        let tr = proc.process(step(1, 1, false, None));
        assert_eq!(tr.state.0, 0);
    }

    #[test]
    #[should_panic]
    fn test_panics_without_reset() {
        let mut proc = SimpleStepProcessor::<DummyEnv>::build(&Default::default());
        let _ = proc.process(step(1, 0, false, None));
    }
}
