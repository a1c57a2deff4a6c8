//! Configuration of [`Trainer`](super::Trainer).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// The number of epochs, each consisting of a training and an evaluation phase.
    pub n_epochs: usize,

    /// The number of environment steps in the training phase of an epoch.
    /// The agent is updated at every step.
    pub train_steps_per_epoch: usize,

    /// The number of environment steps in the evaluation phase of an epoch, used to
    /// build a [`DefaultEvaluator`](crate::DefaultEvaluator).
    pub eval_steps: usize,

    /// If `true`, a snapshot of the action-value tables is recorded at the end of
    /// every epoch.
    #[serde(default)]
    pub record_q_snapshot: bool,

    /// Random seed of the training environment.
    #[serde(default)]
    pub seed: i64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            n_epochs: 10,
            train_steps_per_epoch: 10_000,
            eval_steps: 10_000,
            record_q_snapshot: false,
            seed: 0,
        }
    }
}

impl TrainerConfig {
    /// Sets the number of epochs.
    pub fn n_epochs(mut self, v: usize) -> Self {
        self.n_epochs = v;
        self
    }

    /// Sets the number of training steps per epoch.
    pub fn train_steps_per_epoch(mut self, v: usize) -> Self {
        self.train_steps_per_epoch = v;
        self
    }

    /// Sets the number of evaluation steps per epoch.
    pub fn eval_steps(mut self, v: usize) -> Self {
        self.eval_steps = v;
        self
    }

    /// Sets if snapshots of the action-value tables are recorded.
    pub fn record_q_snapshot(mut self, v: bool) -> Self {
        self.record_q_snapshot = v;
        self
    }

    /// Sets the random seed of the training environment.
    pub fn seed(mut self, v: i64) -> Self {
        self.seed = v;
        self
    }

    /// The total number of training steps, i.e., the step budget of an experiment.
    pub fn max_steps(&self) -> usize {
        self.n_epochs * self.train_steps_per_epoch
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_trainer_config() -> Result<()> {
        let config = TrainerConfig::default()
            .n_epochs(10)
            .train_steps_per_epoch(10_000)
            .eval_steps(1_000)
            .record_q_snapshot(true)
            .seed(42);
        assert_eq!(config.max_steps(), 100_000);

        let dir = TempDir::new("trainer_config")?;
        let path = dir.path().join("trainer_config.yaml");

        config.save(&path)?;
        let config_ = TrainerConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_record_q_snapshot_defaults_to_false() {
        let yaml = "n_epochs: 2\ntrain_steps_per_epoch: 5\neval_steps: 3\n";
        let config: TrainerConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.record_q_snapshot);
        assert_eq!(config.n_epochs, 2);
    }
}
