//! A small environment used in tests.
use anyhow::Result;
use ensemble_ql_core::{record::Record, Act, Env, MdpInfo, Obs, Step};

#[derive(Clone, Debug, PartialEq)]
pub struct TestObs(pub usize);

impl Obs for TestObs {
    fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestAct(pub usize);

impl Act for TestAct {
    fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for TestAct {
    fn from(a: usize) -> Self {
        Self(a)
    }
}

/// The next state is the action taken. Reward 1 for action 0.
pub struct TestEnv {
    info: MdpInfo,
    state: usize,
}

impl Env for TestEnv {
    type Config = MdpInfo;
    type Obs = TestObs;
    type Act = TestAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            info: *config,
            state: 0,
        })
    }

    fn info(&self) -> &MdpInfo {
        &self.info
    }

    fn step(&mut self, a: &TestAct) -> (Step<Self>, Record) {
        self.state = a.0;
        let reward = if a.0 == 0 { 1.0 } else { 0.0 };
        let step = Step::new(TestObs(self.state), a.clone(), reward, false, false, (), None);
        (step, Record::empty())
    }

    fn reset(&mut self) -> Result<TestObs> {
        self.state = 0;
        Ok(TestObs(0))
    }

    fn step_with_reset(&mut self, a: &TestAct) -> (Step<Self>, Record) {
        self.step(a)
    }

    fn reset_with_index(&mut self, _ix: usize) -> Result<TestObs> {
        self.reset()
    }
}
