//! Finite MDP environment.
use crate::{FiniteMdpConfig, MdpError};
use anyhow::Result;
use ensemble_ql_core::{record::Record, Act, Env, MdpInfo, Obs, Step};
use log::{debug, info};
use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::SmallRng,
    Rng, SeedableRng,
};

/// Observation of [`FiniteMdp`], the index of the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiniteMdpObs(pub usize);

impl Obs for FiniteMdpObs {
    fn index(&self) -> usize {
        self.0
    }
}

/// Action of [`FiniteMdp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiniteMdpAct(pub usize);

impl Act for FiniteMdpAct {
    fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for FiniteMdpAct {
    fn from(a: usize) -> Self {
        Self(a)
    }
}

/// A finite MDP sampling transitions from explicit tables.
///
/// See the [crate documentation](crate) for the semantics of the tables.
pub struct FiniteMdp {
    config: FiniteMdpConfig,
    info: MdpInfo,

    /// Distribution of next states for each state-action pair, `None` in absorbing states.
    transitions: Vec<Option<WeightedIndex<f64>>>,
    initial: Option<WeightedIndex<f64>>,
    seed: u64,
    rng: SmallRng,
    state: usize,
    steps: usize,
}

impl FiniteMdp {
    /// The current state.
    pub fn state(&self) -> usize {
        self.state
    }

    fn sample_initial_state(&mut self) -> usize {
        match &self.initial {
            Some(mu) => mu.sample(&mut self.rng),
            None => self.rng.gen_range(0..self.info.n_states),
        }
    }
}

impl Env for FiniteMdp {
    type Config = FiniteMdpConfig;
    type Obs = FiniteMdpObs;
    type Act = FiniteMdpAct;
    type Info = ();

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        config.validate()?;
        let info = config.info();
        let dist = |p: &[f64]| {
            WeightedIndex::new(p).map_err(|e| MdpError::InvalidDistribution(format!("{}", e)))
        };

        let mut transitions = Vec::with_capacity(info.size());
        for s in 0..info.n_states {
            let absorbing = config.is_absorbing(s);
            for a in 0..info.n_actions {
                transitions.push(match absorbing {
                    true => None,
                    false => Some(dist(&config.p[s][a][..])?),
                });
            }
        }
        let initial = match &config.mu {
            Some(mu) => Some(dist(&mu[..])?),
            None => None,
        };
        info!(
            "Build finite MDP with {} states and {} actions",
            info.n_states, info.n_actions
        );

        let seed = seed as u64;
        let mut env = Self {
            config: config.clone(),
            info,
            transitions,
            initial,
            seed,
            rng: SmallRng::seed_from_u64(seed),
            state: 0,
            steps: 0,
        };
        env.state = env.sample_initial_state();
        Ok(env)
    }

    fn info(&self) -> &MdpInfo {
        &self.info
    }

    /// Samples the next state.
    ///
    /// In an absorbing state, the environment stays there with zero reward and the
    /// step is terminal.
    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        assert!(
            a.0 < self.info.n_actions,
            "Action index {} out of range (n_actions = {})",
            a.0,
            self.info.n_actions
        );
        let (next_state, reward) = match &self.transitions[self.state * self.info.n_actions + a.0] {
            Some(p) => {
                let next_state = p.sample(&mut self.rng);
                (next_state, self.config.r[self.state][a.0][next_state])
            }
            None => (self.state, 0.0),
        };
        self.state = next_state;
        self.steps += 1;

        let is_terminated = self.config.is_absorbing(next_state);
        let is_truncated = !is_terminated && Some(self.steps) == self.info.horizon;
        let step = Step::new(
            FiniteMdpObs(next_state),
            *a,
            reward,
            is_terminated,
            is_truncated,
            (),
            None,
        );
        (step, Record::empty())
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.state = self.sample_initial_state();
        self.steps = 0;
        debug!("Reset finite MDP to state {}", self.state);
        Ok(FiniteMdpObs(self.state))
    }

    fn step_with_reset(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let (mut step, record) = self.step(a);
        if step.is_done() {
            self.state = self.sample_initial_state();
            self.steps = 0;
            step.init_obs = Some(FiniteMdpObs(self.state));
        }
        (step, record)
    }

    /// Reseeds the random number generator with `seed + ix` and resets.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.rng = SmallRng::seed_from_u64(self.seed.wrapping_add(ix as u64));
        self.reset()
    }
}
