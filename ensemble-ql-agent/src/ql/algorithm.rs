//! Variants of ensemble Q-learning.
use crate::{policy::PolicyConfig, table::TableInit, AgentError};
use serde::{Deserialize, Serialize};

/// Which members of the ensemble are updated with a transition.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum UpdateMode {
    /// All members are updated.
    Deterministic,

    /// Each member is updated with probability `mask_prob`. If no member is drawn, a
    /// single member chosen uniformly at random is updated.
    Randomized {
        /// Probability of updating each member.
        mask_prob: f64,
    },
}

/// How the bootstrap target of each member is computed.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum UpdateType {
    /// Bootstraps with the mean over the members of their maximum action value.
    Mean,

    /// Each member bootstraps with its own maximum action value.
    Distributional,

    /// Convex combination of the member's own maximum (weight `mixing`) and the mean
    /// of the maxima (weight `1 - mixing`).
    Weighted {
        /// Weight of the member's own maximum, in `[0, 1]`.
        mixing: f64,
    },
}

/// Learning algorithm of [`EnsembleQl`](super::EnsembleQl).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum Algorithm {
    /// Standard Q-learning with a single table.
    QLearning,

    /// Bootstrapped Q-learning: each head bootstraps on itself and sees a transition
    /// with probability `mask_prob`.
    BootstrappedQLearning {
        /// Probability of updating each head.
        mask_prob: f64,
    },

    /// Particle Q-learning.
    ParticleQLearning {
        /// Members to update.
        update_mode: UpdateMode,
        /// Target computation.
        update_type: UpdateType,
    },
}

impl Algorithm {
    /// Bootstrapped Q-learning updating each head with probability 0.5.
    pub fn bootstrapped() -> Self {
        Self::BootstrappedQLearning { mask_prob: 0.5 }
    }

    /// Particle Q-learning with the given update mode and type.
    pub fn particle(update_mode: UpdateMode, update_type: UpdateType) -> Self {
        Self::ParticleQLearning {
            update_mode,
            update_type,
        }
    }

    /// Name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Self::QLearning => "ql",
            Self::BootstrappedQLearning { .. } => "boot-ql",
            Self::ParticleQLearning { .. } => "particle-ql",
        }
    }

    /// Names of the policies that can be used with the algorithm.
    pub fn available_policies(&self) -> &'static [&'static str] {
        match self {
            Self::QLearning => &["eps-greedy", "boltzmann"],
            Self::BootstrappedQLearning { .. } => &["boot", "weighted"],
            Self::ParticleQLearning { .. } => &["weighted", "vpi"],
        }
    }

    /// Fails if `policy` cannot be used with the algorithm.
    pub fn check_policy(&self, policy: &PolicyConfig) -> Result<(), AgentError> {
        match self.available_policies().contains(&policy.name()) {
            true => Ok(()),
            false => Err(AgentError::IncompatiblePolicy {
                algorithm: self.name().to_string(),
                policy: policy.name().to_string(),
                available: self.available_policies().join(" and "),
            }),
        }
    }

    /// The update mode.
    pub fn update_mode(&self) -> UpdateMode {
        match self {
            Self::QLearning => UpdateMode::Deterministic,
            Self::BootstrappedQLearning { mask_prob } => UpdateMode::Randomized {
                mask_prob: *mask_prob,
            },
            Self::ParticleQLearning { update_mode, .. } => update_mode.clone(),
        }
    }

    /// The update type.
    pub fn update_type(&self) -> UpdateType {
        match self {
            Self::QLearning => UpdateType::Mean,
            Self::BootstrappedQLearning { .. } => UpdateType::Distributional,
            Self::ParticleQLearning { update_type, .. } => update_type.clone(),
        }
    }

    /// Initialization of the tables used by the algorithm, for action values assumed
    /// to lie in `[q_min, q_max]`.
    ///
    /// Q-learning is initialized optimistically with `q_max`. Bootstrapped heads are
    /// drawn from a Gaussian centered in the interval, and particles are spread evenly
    /// over it.
    pub fn default_init(&self, q_min: f64, q_max: f64) -> TableInit {
        match self {
            Self::QLearning => TableInit::Constant { value: q_max },
            Self::BootstrappedQLearning { .. } => TableInit::Gaussian {
                mu: (q_max + q_min) / 2.0,
                sigma: q_max - q_min,
            },
            Self::ParticleQLearning { .. } => TableInit::Linspace { q_min, q_max },
        }
    }

    pub(super) fn validate(&self, n_approximators: usize) -> Result<(), AgentError> {
        let prob_ok = |p: f64| (0.0..=1.0).contains(&p);
        let update_mode = self.update_mode();
        if let UpdateMode::Randomized { mask_prob } = update_mode {
            if !prob_ok(mask_prob) {
                return Err(AgentError::InvalidConfig(format!(
                    "mask_prob must be in [0, 1], got {}",
                    mask_prob
                )));
            }
        }
        if let UpdateType::Weighted { mixing } = self.update_type() {
            if !prob_ok(mixing) {
                return Err(AgentError::InvalidConfig(format!(
                    "mixing must be in [0, 1], got {}",
                    mixing
                )));
            }
        }
        match self {
            Self::QLearning if n_approximators != 1 => Err(AgentError::InvalidConfig(format!(
                "ql uses a single table, got n_approximators = {}",
                n_approximators
            ))),
            _ => Ok(()),
        }
    }
}
