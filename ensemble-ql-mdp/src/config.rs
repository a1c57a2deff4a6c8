//! Configuration of [`FiniteMdp`](crate::FiniteMdp).
use crate::MdpError;
use anyhow::Result;
use ensemble_ql_core::MdpInfo;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

const PROB_TOL: f64 = 1e-6;

/// Transition and reward tables of a finite MDP.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct FiniteMdpConfig {
    /// Transition probabilities `p[s][a][s']`.
    pub p: Vec<Vec<Vec<f64>>>,

    /// Rewards `r[s][a][s']`.
    pub r: Vec<Vec<Vec<f64>>>,

    /// Initial state distribution. Uniform if `None`.
    #[serde(default)]
    pub mu: Option<Vec<f64>>,

    /// Discount factor.
    pub gamma: f64,

    /// The maximum length of an episode.
    #[serde(default)]
    pub horizon: Option<usize>,
}

impl FiniteMdpConfig {
    /// Constructs a configuration with discount factor 0.99 and no horizon.
    pub fn new(p: Vec<Vec<Vec<f64>>>, r: Vec<Vec<Vec<f64>>>) -> Self {
        Self {
            p,
            r,
            mu: None,
            gamma: 0.99,
            horizon: None,
        }
    }

    /// Sets the initial state distribution.
    pub fn mu(mut self, v: Option<Vec<f64>>) -> Self {
        self.mu = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the maximum length of an episode.
    pub fn horizon(mut self, v: Option<usize>) -> Self {
        self.horizon = v;
        self
    }

    /// The number of states.
    pub fn n_states(&self) -> usize {
        self.p.len()
    }

    /// The number of actions.
    pub fn n_actions(&self) -> usize {
        self.p.first().map_or(0, |p| p.len())
    }

    /// Static description of the MDP.
    pub fn info(&self) -> MdpInfo {
        MdpInfo::new(self.n_states(), self.n_actions(), self.gamma, self.horizon)
    }

    /// If all transition probabilities from `s` are zero.
    pub fn is_absorbing(&self, s: usize) -> bool {
        self.p[s].iter().all(|row| row.iter().all(|v| *v == 0.0))
    }

    /// Checks the tables.
    ///
    /// Every state must either be absorbing or have a probability distribution over
    /// next states for every action.
    pub fn validate(&self) -> Result<(), MdpError> {
        let (n_states, n_actions) = (self.n_states(), self.n_actions());
        if n_states == 0 || n_actions == 0 {
            return Err(MdpError::ShapeMismatch(
                "The MDP must have at least one state and one action".into(),
            ));
        }
        if self.r.len() != n_states {
            return Err(MdpError::ShapeMismatch(format!(
                "p has {} states, r has {}",
                n_states,
                self.r.len()
            )));
        }
        for s in 0..n_states {
            if self.p[s].len() != n_actions || self.r[s].len() != n_actions {
                return Err(MdpError::ShapeMismatch(format!(
                    "State {} must have {} actions",
                    s, n_actions
                )));
            }
            for a in 0..n_actions {
                if self.p[s][a].len() != n_states || self.r[s][a].len() != n_states {
                    return Err(MdpError::ShapeMismatch(format!(
                        "Rows of state {} and action {} must have {} entries",
                        s, a, n_states
                    )));
                }
                if self.r[s][a].iter().any(|v| !v.is_finite()) {
                    return Err(MdpError::InvalidParameter(format!(
                        "Rewards of state {} and action {} must be finite",
                        s, a
                    )));
                }
            }
            if !self.is_absorbing(s) {
                for a in 0..n_actions {
                    check_distribution(&self.p[s][a])
                        .map_err(|e| MdpError::InvalidDistribution(format!("p[{}][{}]: {}", s, a, e)))?;
                }
            }
        }
        if let Some(mu) = &self.mu {
            if mu.len() != n_states {
                return Err(MdpError::ShapeMismatch(format!(
                    "mu must have {} entries, got {}",
                    n_states,
                    mu.len()
                )));
            }
            check_distribution(mu).map_err(|e| MdpError::InvalidDistribution(format!("mu: {}", e)))?;
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(MdpError::InvalidParameter(format!(
                "gamma must be in [0, 1], got {}",
                self.gamma
            )));
        }
        if self.horizon == Some(0) {
            return Err(MdpError::InvalidParameter("horizon must be positive".into()));
        }
        Ok(())
    }

    /// Loads [`FiniteMdpConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of finite MDP from {}", path_.display());
        Ok(b)
    }

    /// Saves [`FiniteMdpConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of finite MDP into {}", path_.display());
        Ok(())
    }
}

fn check_distribution(p: &[f64]) -> Result<(), String> {
    if p.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(format!("probabilities must be non-negative, got {:?}", p));
    }
    let sum: f64 = p.iter().sum();
    match (sum - 1.0).abs() <= PROB_TOL {
        true => Ok(()),
        false => Err(format!("probabilities must sum to 1, got {}", sum)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    /// Two states, two actions. Action 1 in state 0 reaches the absorbing state 1.
    fn config() -> FiniteMdpConfig {
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
    }

    #[test]
    fn test_valid_config() {
        let config = config();
        assert!(config.validate().is_ok());
        assert_eq!(config.n_states(), 2);
        assert_eq!(config.n_actions(), 2);
        assert!(!config.is_absorbing(0));
        assert!(config.is_absorbing(1));
    }

    #[test]
    fn test_invalid_configs() {
        let mut c = config();
        c.p[0][1] = vec![0.5, 0.4];
        assert!(matches!(c.validate(), Err(MdpError::InvalidDistribution(_))));

        let mut c = config();
        c.r.pop();
        assert!(matches!(c.validate(), Err(MdpError::ShapeMismatch(_))));

        let c = config().mu(Some(vec![1.0]));
        assert!(matches!(c.validate(), Err(MdpError::ShapeMismatch(_))));

        let c = config().gamma(1.5);
        assert!(matches!(c.validate(), Err(MdpError::InvalidParameter(_))));

        let c = config().horizon(Some(0));
        assert!(matches!(c.validate(), Err(MdpError::InvalidParameter(_))));
    }

    #[test]
    fn test_serde_config() -> Result<()> {
        let config = config().mu(Some(vec![1.0, 0.0])).gamma(0.9).horizon(Some(10));
        let dir = TempDir::new("finite_mdp_config")?;
        let path = dir.path().join("finite_mdp.yaml");
        config.save(&path)?;
        let config_ = FiniteMdpConfig::load(&path)?;
        assert_eq!(config, config_);
        assert_eq!(config_.info(), MdpInfo::new(2, 2, 0.9, Some(10)));
        Ok(())
    }

    #[test]
    fn test_optional_fields() {
        let src = "p: [[[1.0]]]\nr: [[[0.5]]]\ngamma: 0.5\n";
        let config: FiniteMdpConfig = serde_yaml::from_str(src).unwrap();
        assert_eq!(config.mu, None);
        assert_eq!(config.horizon, None);
        assert!(config.validate().is_ok());
    }
}
