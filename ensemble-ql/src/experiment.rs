//! Experiments of ensemble Q-learning agents on finite MDPs.
use anyhow::Result;
use ensemble_ql_agent::{
    parameter::Parameter,
    policy::PolicyConfig,
    ql::{Algorithm, EnsembleQl, EnsembleQlConfig},
};
use ensemble_ql_core::{
    record::AggregateRecorder, Configurable, DefaultEvaluator, EpochScores, MdpInfo,
    SimpleStepProcessor, SimpleStepProcessorConfig, Trainer, TrainerConfig,
};
use ensemble_ql_mdp::{FiniteMdp, FiniteMdpConfig};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Agent acting on a finite MDP.
pub type Agent = EnsembleQl<FiniteMdp>;

type Trainer_ = Trainer<FiniteMdp, SimpleStepProcessor<FiniteMdp>>;

/// Configuration of an experiment: the MDP, the agent and the experiment loop.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ExperimentConfig {
    /// The MDP.
    pub mdp: FiniteMdpConfig,

    /// The agent.
    pub agent: EnsembleQlConfig,

    /// The experiment loop.
    pub trainer: TrainerConfig,
}

impl ExperimentConfig {
    /// Constructs a configuration. Sizes and the discount factor of the agent are
    /// taken from the MDP.
    pub fn new(mdp: FiniteMdpConfig, agent: EnsembleQlConfig, trainer: TrainerConfig) -> Self {
        let agent = agent.mdp_info(&mdp.info());
        Self {
            mdp,
            agent,
            trainer,
        }
    }

    /// Checks the MDP and the agent, and that the agent is shaped for the MDP.
    pub fn validate(&self) -> Result<()> {
        self.mdp.validate()?;
        self.agent.validate()?;
        self.agent.check_mdp_info(&self.mdp.info())?;
        Ok(())
    }

    /// Loads [`ExperimentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b: Self = serde_yaml::from_reader(rdr)?;
        b.validate()?;
        info!("Load config of experiment from {}", path_.display());
        Ok(b)
    }

    /// Saves [`ExperimentConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of experiment into {}", path_.display());
        Ok(())
    }
}

/// Builds the configuration of an agent for an MDP whose action values lie in
/// `[q_min, q_max]`.
///
/// The learning rate decays as `n^-0.3` in the visits of each state-action pair.
/// Q-learning always uses a single table, other algorithms use `n_approximators`
/// tables initialized with [`Algorithm::default_init`].
pub fn agent_config(
    info: &MdpInfo,
    algorithm: Algorithm,
    policy: PolicyConfig,
    n_approximators: usize,
    q_min: f64,
    q_max: f64,
    seed: u64,
) -> EnsembleQlConfig {
    let n_approximators = match algorithm {
        Algorithm::QLearning => 1,
        _ => n_approximators,
    };
    EnsembleQlConfig::default()
        .mdp_info(info)
        .n_approximators(n_approximators)
        .algorithm(algorithm)
        .value_range(q_min, q_max)
        .learning_rate(Parameter::exponential_decay(1.0, 0.3))
        .policy(policy)
        .seed(seed)
}

/// Runs an experiment and returns the scores of all epochs.
///
/// Fails if the configuration is invalid, e.g., the agent and the MDP differ in shape.
/// Training and evaluation use separate instances of the MDP, seeded with
/// `trainer.seed` and `trainer.seed + 1` (wrapping).
pub fn run(config: &ExperimentConfig, recorder: &mut dyn AggregateRecorder) -> Result<Vec<EpochScores>> {
    config.validate()?;
    let mut agent = Agent::build(config.agent.clone())?;
    let mut evaluator = DefaultEvaluator::<FiniteMdp>::new(
        &config.mdp,
        config.trainer.seed.wrapping_add(1),
        config.trainer.eval_steps,
    )?;
    let mut trainer = Trainer_::build(
        config.trainer.clone(),
        config.mdp.clone(),
        SimpleStepProcessorConfig::default(),
    );
    info!(
        "Run {} epochs of {} training steps",
        config.trainer.n_epochs, config.trainer.train_steps_per_epoch
    );
    trainer.train(&mut agent, recorder, &mut evaluator)
}
