//! Configuration of the ensemble Q-learning agent.
use super::Algorithm;
use crate::{parameter::Parameter, policy::PolicyConfig, table::TableInit, AgentError};
use anyhow::Result;
use ensemble_ql_core::MdpInfo;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Constructs [`EnsembleQl`](super::EnsembleQl).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EnsembleQlConfig {
    pub(super) n_states: usize,
    pub(super) n_actions: usize,
    pub(super) discount_factor: f64,
    pub(super) n_approximators: usize,
    pub(super) algorithm: Algorithm,
    pub(super) learning_rate: Parameter,

    /// Explicit initialization of the tables, overrides the value range.
    #[serde(default)]
    pub(super) init: Option<TableInit>,

    /// Bounds of the action values, used for the initialization of the algorithm.
    #[serde(default)]
    pub(super) q_min: f64,
    #[serde(default)]
    pub(super) q_max: f64,

    pub(super) policy: PolicyConfig,
    #[serde(default)]
    pub(super) seed: u64,
}

impl Default for EnsembleQlConfig {
    /// Q-learning with a single zero-initialized table and epsilon-greedy exploration.
    fn default() -> Self {
        Self {
            n_states: 1,
            n_actions: 1,
            discount_factor: 0.99,
            n_approximators: 1,
            algorithm: Algorithm::QLearning,
            learning_rate: Parameter::exponential_decay(1.0, 0.3),
            init: None,
            q_min: 0.0,
            q_max: 0.0,
            policy: PolicyConfig::eps_greedy(),
            seed: 0,
        }
    }
}

impl EnsembleQlConfig {
    /// Sets the number of states.
    pub fn n_states(mut self, v: usize) -> Self {
        self.n_states = v;
        self
    }

    /// Sets the number of actions.
    pub fn n_actions(mut self, v: usize) -> Self {
        self.n_actions = v;
        self
    }

    /// Discount factor.
    pub fn discount_factor(mut self, v: f64) -> Self {
        self.discount_factor = v;
        self
    }

    /// Takes the sizes and the discount factor from the description of an MDP.
    pub fn mdp_info(self, info: &MdpInfo) -> Self {
        self.n_states(info.n_states)
            .n_actions(info.n_actions)
            .discount_factor(info.gamma)
    }

    /// The number of tables in the ensemble.
    pub fn n_approximators(mut self, v: usize) -> Self {
        self.n_approximators = v;
        self
    }

    /// Learning algorithm.
    pub fn algorithm(mut self, v: Algorithm) -> Self {
        self.algorithm = v;
        self
    }

    /// Schedule of the learning rate, counted per state-action pair.
    pub fn learning_rate(mut self, v: Parameter) -> Self {
        self.learning_rate = v;
        self
    }

    /// Initialization of the tables, used instead of the one derived from the value
    /// range.
    pub fn init(mut self, v: TableInit) -> Self {
        self.init = Some(v);
        self
    }

    /// Bounds of the action values.
    ///
    /// Unless [`init`](Self::init) is given, the tables are initialized with
    /// [`Algorithm::default_init`] of the configured algorithm, resolved when the
    /// agent is built.
    pub fn value_range(mut self, q_min: f64, q_max: f64) -> Self {
        self.q_min = q_min;
        self.q_max = q_max;
        self
    }

    /// Initialization of the tables.
    pub fn table_init(&self) -> TableInit {
        match &self.init {
            Some(init) => init.clone(),
            None => self.algorithm.default_init(self.q_min, self.q_max),
        }
    }

    /// Exploration policy.
    pub fn policy(mut self, v: PolicyConfig) -> Self {
        self.policy = v;
        self
    }

    /// Seed of the random number generator of the agent.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Checks the configuration.
    ///
    /// Incompatible combinations of algorithm and policy are rejected with
    /// [`AgentError::IncompatiblePolicy`].
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.n_states == 0 || self.n_actions == 0 {
            return Err(AgentError::InvalidConfig(format!(
                "The MDP must have at least one state and one action, got n_states = {}, n_actions = {}",
                self.n_states, self.n_actions
            )));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(AgentError::InvalidConfig(format!(
                "discount_factor must be in [0, 1], got {}",
                self.discount_factor
            )));
        }
        if self.n_approximators == 0 {
            return Err(AgentError::InvalidConfig(
                "n_approximators must be positive".into(),
            ));
        }
        self.algorithm.validate(self.n_approximators)?;
        self.algorithm.check_policy(&self.policy)?;
        self.learning_rate.validate("learning_rate")?;
        let range_ok = self.q_min.is_finite() && self.q_max.is_finite() && self.q_min <= self.q_max;
        if self.init.is_none() && !range_ok {
            return Err(AgentError::InvalidConfig(format!(
                "Value range must be finite with q_min <= q_max, got q_min = {}, q_max = {}",
                self.q_min, self.q_max
            )));
        }
        self.table_init().validate()
    }

    /// Checks that the sizes and the discount factor agree with an MDP.
    pub fn check_mdp_info(&self, info: &MdpInfo) -> Result<(), AgentError> {
        if (self.n_states, self.n_actions) != (info.n_states, info.n_actions)
            || self.discount_factor != info.gamma
        {
            return Err(AgentError::InvalidConfig(format!(
                "The agent has {} states x {} actions with discount factor {}, \
                 the MDP has {} states x {} actions with gamma {}",
                self.n_states,
                self.n_actions,
                self.discount_factor,
                info.n_states,
                info.n_actions,
                info.gamma
            )));
        }
        Ok(())
    }

    /// Loads [`EnsembleQlConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of ensemble Q-learning agent from {}", path_.display());
        Ok(b)
    }

    /// Saves [`EnsembleQlConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of ensemble Q-learning agent into {}", path_.display());
        Ok(())
    }
}
