//! This module is used for tests.
use crate::{
    record::Record,
    Act, Agent, Env, MdpInfo, Obs, Policy, QSnapshot, Step, Transition,
};
use anyhow::Result;

/// Dummy observation.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyObs(pub usize);

impl Obs for DummyObs {
    fn index(&self) -> usize {
        self.0
    }
}

/// Dummy action.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyAct(pub usize);

impl Act for DummyAct {
    fn index(&self) -> usize {
        self.0
    }
}

/// Configuration of [`DummyEnv`].
#[derive(Clone, Debug)]
pub struct DummyEnvConfig {
    pub n_states: usize,
    pub horizon: Option<usize>,
}

/// A deterministic chain. Action 1 moves one state to the right, action 0 stays.
/// Reaching the last state gives reward 1 and terminates the episode.
pub struct DummyEnv {
    info: MdpInfo,
    state: usize,
    steps: usize,
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Obs = DummyObs;
    type Act = DummyAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            info: MdpInfo::new(config.n_states, 2, 0.5, config.horizon),
            state: 0,
            steps: 0,
        })
    }

    fn info(&self) -> &MdpInfo {
        &self.info
    }

    fn step(&mut self, a: &DummyAct) -> (Step<Self>, Record) {
        self.steps += 1;
        if a.0 == 1 {
            self.state += 1;
        }
        let is_terminated = self.state == self.info.n_states - 1;
        let is_truncated = !is_terminated && Some(self.steps) == self.info.horizon;
        let reward = if is_terminated { 1.0 } else { 0.0 };
        let step = Step::new(
            DummyObs(self.state),
            a.clone(),
            reward,
            is_terminated,
            is_truncated,
            (),
            None,
        );
        (step, Record::empty())
    }

    fn reset(&mut self) -> Result<DummyObs> {
        self.state = 0;
        self.steps = 0;
        Ok(DummyObs(0))
    }

    fn step_with_reset(&mut self, a: &DummyAct) -> (Step<Self>, Record) {
        let (mut step, record) = self.step(a);
        if step.is_done() {
            step.init_obs = Some(self.reset().unwrap());
        }
        (step, record)
    }

    fn reset_with_index(&mut self, _ix: usize) -> Result<DummyObs> {
        self.reset()
    }
}

/// Agent taking a fixed action and counting calls.
pub struct DummyAgent {
    pub act: usize,
    pub train: bool,
    pub n_opts: usize,
    pub n_episodes: usize,
    pub rewards: f64,
}

impl DummyAgent {
    pub fn new(act: usize) -> Self {
        Self {
            act,
            train: true,
            n_opts: 0,
            n_episodes: 0,
            rewards: 0.0,
        }
    }
}

impl Policy<DummyEnv> for DummyAgent {
    fn sample(&mut self, _obs: &DummyObs) -> DummyAct {
        DummyAct(self.act)
    }

    fn episode_start(&mut self) {
        self.n_episodes += 1;
    }
}

impl Agent<DummyEnv> for DummyAgent {
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn opt_with_record(&mut self, transition: &Transition<DummyEnv>) -> Record {
        assert!(self.train, "Optimization step in evaluation mode");
        self.n_opts += 1;
        self.rewards += transition.reward;
        Record::from_scalar("n_opts", self.n_opts as f32)
    }

    fn q_snapshot(&self) -> QSnapshot {
        QSnapshot {
            n_states: 1,
            n_actions: 2,
            values: vec![vec![0.0, self.rewards]],
        }
    }
}

