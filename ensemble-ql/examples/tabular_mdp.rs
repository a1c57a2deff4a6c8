use anyhow::Result;
use clap::{Parser, ValueEnum};
use ensemble_ql::{
    agent::{
        policy::PolicyConfig,
        ql::{Algorithm, UpdateMode, UpdateType},
    },
    core::{record::BufferedRecorder, EpochScores, TrainerConfig},
    experiment::{agent_config, run, ExperimentConfig},
    mdp::FiniteMdpConfig,
};
use log::info;
use std::path::PathBuf;

const DEFAULT_MDP: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/examples/mdp/chain.yaml");

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AlgorithmArg {
    Ql,
    BootQl,
    ParticleQl,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum UpdateModeArg {
    Deterministic,
    Randomized,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum UpdateTypeArg {
    Mean,
    Distributional,
    Weighted,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    Weighted,
    Vpi,
    Boot,
    Boltzmann,
    EpsGreedy,
}

/// Train an ensemble Q-learning agent on a finite MDP
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file with the transition and reward tables of the MDP
    #[arg(long, default_value = DEFAULT_MDP)]
    mdp: PathBuf,

    /// Learning algorithm
    #[arg(long, value_enum, default_value_t = AlgorithmArg::ParticleQl)]
    algorithm: AlgorithmArg,

    /// Members updated with each transition (particle-ql only)
    #[arg(long, value_enum, default_value_t = UpdateModeArg::Deterministic)]
    update_mode: UpdateModeArg,

    /// Bootstrap target of the members (particle-ql only)
    #[arg(long, value_enum, default_value_t = UpdateTypeArg::Weighted)]
    update_type: UpdateTypeArg,

    /// Probability of updating a member in randomized mode
    #[arg(long, default_value_t = 0.5)]
    mask_prob: f64,

    /// Weight of the member's own maximum in the weighted update
    #[arg(long, default_value_t = 0.5)]
    mixing: f64,

    /// Exploration policy, not all are available for all algorithms
    #[arg(long, value_enum, default_value_t = PolicyArg::Boot)]
    policy: PolicyArg,

    /// Standard deviation of the noise of the weighted policy
    #[arg(long, default_value_t = 0.0)]
    sampling_std: f64,

    /// The number of tables in the ensemble
    #[arg(long, default_value_t = 10)]
    n_approximators: usize,

    /// Upper bound of the initial action values
    #[arg(long, default_value_t = 10000.0)]
    q_max: f64,

    /// Lower bound of the initial action values
    #[arg(long, default_value_t = 0.0)]
    q_min: f64,

    /// The number of epochs
    #[arg(long, default_value_t = 10)]
    n_epochs: usize,

    /// Training steps per epoch
    #[arg(long, default_value_t = 10000)]
    train_steps: usize,

    /// Evaluation steps per epoch
    #[arg(long, default_value_t = 10000)]
    eval_steps: usize,

    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: i64,

    /// Runs the experiment in the given YAML file, ignoring the other options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Saves the configuration of the experiment into the given YAML file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn algorithm(args: &Args) -> Algorithm {
    match args.algorithm {
        AlgorithmArg::Ql => Algorithm::QLearning,
        AlgorithmArg::BootQl => Algorithm::BootstrappedQLearning {
            mask_prob: args.mask_prob,
        },
        AlgorithmArg::ParticleQl => {
            let update_mode = match args.update_mode {
                UpdateModeArg::Deterministic => UpdateMode::Deterministic,
                UpdateModeArg::Randomized => UpdateMode::Randomized {
                    mask_prob: args.mask_prob,
                },
            };
            let update_type = match args.update_type {
                UpdateTypeArg::Mean => UpdateType::Mean,
                UpdateTypeArg::Distributional => UpdateType::Distributional,
                UpdateTypeArg::Weighted => UpdateType::Weighted { mixing: args.mixing },
            };
            Algorithm::particle(update_mode, update_type)
        }
    }
}

fn policy(args: &Args) -> PolicyConfig {
    match args.policy {
        PolicyArg::Weighted => PolicyConfig::Weighted {
            sampling_std: args.sampling_std,
        },
        PolicyArg::Vpi => PolicyConfig::Vpi,
        PolicyArg::Boot => PolicyConfig::Boot,
        PolicyArg::Boltzmann => PolicyConfig::boltzmann(),
        PolicyArg::EpsGreedy => PolicyConfig::eps_greedy(),
    }
}

fn experiment_config(args: &Args) -> Result<ExperimentConfig> {
    if let Some(path) = &args.config {
        return ExperimentConfig::load(path);
    }
    let mdp = FiniteMdpConfig::load(&args.mdp)?;
    let agent = agent_config(
        &mdp.info(),
        algorithm(args),
        policy(args),
        args.n_approximators,
        args.q_min,
        args.q_max,
        args.seed as u64,
    );
    let trainer = TrainerConfig::default()
        .n_epochs(args.n_epochs)
        .train_steps_per_epoch(args.train_steps)
        .eval_steps(args.eval_steps)
        .seed(args.seed);
    Ok(ExperimentConfig::new(mdp, agent, trainer))
}

fn train(args: &Args) -> Result<Vec<EpochScores>> {
    let config = experiment_config(args)?;
    if let Some(path) = &args.save_config {
        config.save(path)?;
    }
    let mut recorder = BufferedRecorder::new();
    let scores = run(&config, &mut recorder)?;
    info!("Stored {} records", recorder.len());
    Ok(scores)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let scores = train(&args)?;
    if let Some(last) = scores.last() {
        info!(
            "Final evaluation: mean return {:.3}, mean discounted return {:.3} over {} episodes",
            last.eval.mean, last.eval.disc_mean, last.eval.n_episodes
        );
    }
    Ok(())
}
