use anyhow::Result;
use ensemble_ql::{
    agent::{
        policy::PolicyConfig,
        ql::{Algorithm, UpdateMode, UpdateType},
        AgentError,
    },
    core::{record::BufferedRecorder, TrainerConfig},
    experiment::{agent_config, run, ExperimentConfig},
    mdp::FiniteMdpConfig,
};
use log::info;
use test_log::test;

/// Action 0 stays in the initial state, action 1 reaches the absorbing state with
/// reward 1. The optimal return is 1 in a single step.
fn mdp() -> FiniteMdpConfig {
    FiniteMdpConfig::new(
        vec![
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![vec![0.0, 0.0], vec![0.0, 0.0]],
        ],
        vec![
            vec![vec![0.0, 0.0], vec![0.0, 1.0]],
            vec![vec![0.0, 0.0], vec![0.0, 0.0]],
        ],
    )
    .mu(Some(vec![1.0, 0.0]))
    .gamma(0.9)
    .horizon(Some(20))
}

fn trainer_config() -> TrainerConfig {
    TrainerConfig::default()
        .n_epochs(3)
        .train_steps_per_epoch(500)
        .eval_steps(50)
        .record_q_snapshot(true)
        .seed(7)
}

fn particle(update_mode: UpdateMode, update_type: UpdateType) -> Algorithm {
    Algorithm::particle(update_mode, update_type)
}

fn compatible_combinations() -> Vec<(Algorithm, PolicyConfig)> {
    let randomized = UpdateMode::Randomized { mask_prob: 0.5 };
    let weighted = UpdateType::Weighted { mixing: 0.5 };
    vec![
        (Algorithm::QLearning, PolicyConfig::eps_greedy()),
        (Algorithm::QLearning, PolicyConfig::boltzmann()),
        (Algorithm::bootstrapped(), PolicyConfig::Boot),
        (Algorithm::bootstrapped(), PolicyConfig::weighted()),
        (
            particle(UpdateMode::Deterministic, UpdateType::Mean),
            PolicyConfig::Weighted { sampling_std: 0.1 },
        ),
        (particle(UpdateMode::Deterministic, UpdateType::Distributional), PolicyConfig::Vpi),
        (particle(UpdateMode::Deterministic, weighted.clone()), PolicyConfig::weighted()),
        (particle(randomized.clone(), UpdateType::Mean), PolicyConfig::Vpi),
        (particle(randomized.clone(), UpdateType::Distributional), PolicyConfig::weighted()),
        (particle(randomized, weighted), PolicyConfig::Vpi),
    ]
}

#[test]
fn test_all_combinations_run() -> Result<()> {
    for (algorithm, policy) in compatible_combinations() {
        info!("{} with {}", algorithm.name(), policy.name());
        let mdp = mdp();
        let agent = agent_config(&mdp.info(), algorithm, policy, 5, 0.0, 1.0, 1);
        agent.validate()?;
        let config = ExperimentConfig::new(mdp, agent, trainer_config());
        let mut recorder = BufferedRecorder::new();
        let scores = run(&config, &mut recorder)?;

        assert_eq!(scores.len(), 3);
        assert_eq!(recorder.len(), 3);
        for (record, epoch) in recorder.iter().zip(1..) {
            assert_eq!(record.get_scalar("epoch")?, epoch as f32);
            assert_eq!(record.get_scalar("step")?, (epoch * 500) as f32);
            let (_, shape) = record.get_array3("q")?;
            assert_eq!(&shape[1..], &[2, 2]);
        }
        for s in scores.iter() {
            assert!(s.train.n_episodes > 0);
            assert!(s.train.max <= 1.0);
        }
    }
    Ok(())
}

#[test]
fn test_greedy_policy_is_optimal_after_training() -> Result<()> {
    let combinations = vec![
        (Algorithm::QLearning, PolicyConfig::eps_greedy()),
        (particle(UpdateMode::Deterministic, UpdateType::Mean), PolicyConfig::Vpi),
        (
            particle(UpdateMode::Deterministic, UpdateType::Weighted { mixing: 0.5 }),
            PolicyConfig::weighted(),
        ),
    ];
    for (algorithm, policy) in combinations {
        let mdp = mdp();
        let agent = agent_config(&mdp.info(), algorithm, policy, 5, 0.0, 1.0, 2);
        let config = ExperimentConfig::new(mdp, agent, trainer_config());
        let scores = run(&config, &mut BufferedRecorder::new())?;

        let last = scores.last().unwrap();
        assert_eq!(last.eval.n_episodes, 50);
        assert_eq!(last.eval.mean, 1.0);
        assert_eq!(last.eval.mean_len, 1.0);
    }
    Ok(())
}

#[test]
fn test_incompatible_combinations_fail() {
    let incompatible = vec![
        (Algorithm::QLearning, PolicyConfig::Boot),
        (Algorithm::QLearning, PolicyConfig::Vpi),
        (Algorithm::bootstrapped(), PolicyConfig::Vpi),
        (Algorithm::bootstrapped(), PolicyConfig::eps_greedy()),
        (particle(UpdateMode::Deterministic, UpdateType::Mean), PolicyConfig::Boot),
        (particle(UpdateMode::Deterministic, UpdateType::Mean), PolicyConfig::boltzmann()),
    ];
    for (algorithm, policy) in incompatible {
        let mdp = mdp();
        let agent = agent_config(&mdp.info(), algorithm, policy, 5, 0.0, 1.0, 0);
        let config = ExperimentConfig::new(mdp, agent, trainer_config());
        let err = run(&config, &mut BufferedRecorder::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AgentError>(),
            Some(AgentError::IncompatiblePolicy { .. })
        ));
    }
}

#[test]
fn test_runs_are_reproducible() -> Result<()> {
    let mdp = mdp();
    let agent = agent_config(&mdp.info(), Algorithm::bootstrapped(), PolicyConfig::Boot, 5, 0.0, 1.0, 3);
    let config = ExperimentConfig::new(mdp, agent, trainer_config());
    let scores1 = run(&config, &mut BufferedRecorder::new())?;
    let scores2 = run(&config, &mut BufferedRecorder::new())?;
    assert_eq!(scores1, scores2);
    Ok(())
}
