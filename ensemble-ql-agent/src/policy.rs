//! Exploration policies.
//!
//! A policy chooses an action from the current estimates of an ensemble of
//! action-value tables. Policies only read the ensemble; it is updated by
//! [`EnsembleQl`](crate::ql::EnsembleQl). In evaluation mode all policies act
//! greedily with respect to the ensemble mean.
mod boltzmann;
mod boot;
mod eps_greedy;
mod vpi;
mod weighted;
use crate::{parameter::Parameter, table::EnsembleTable, util::argmax_random_tie, AgentError};
pub use boltzmann::Boltzmann;
pub use boot::BootPolicy;
pub use eps_greedy::EpsGreedy;
use rand::Rng;
use serde::{Deserialize, Serialize};
pub use vpi::VpiPolicy;
pub use weighted::WeightedPolicy;

/// Configuration of exploration policies.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum PolicyConfig {
    /// Epsilon-greedy with a per-state schedule of epsilon.
    EpsGreedy {
        /// Probability of a random action.
        epsilon: Parameter,
    },

    /// Softmax over the action values with a per-state schedule of the inverse
    /// temperature.
    Boltzmann {
        /// Inverse temperature.
        beta: Parameter,
    },

    /// Greedy on a head of the ensemble sampled at the start of each episode.
    Boot,

    /// Majority vote of the greedy actions of the members, with values perturbed by
    /// Gaussian noise.
    Weighted {
        /// Standard deviation of the noise. Zero disables sampling.
        sampling_std: f64,
    },

    /// Greedy on the ensemble mean plus the value of perfect information.
    Vpi,
}

impl PolicyConfig {
    /// Name of the policy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EpsGreedy { .. } => "eps-greedy",
            Self::Boltzmann { .. } => "boltzmann",
            Self::Boot => "boot",
            Self::Weighted { .. } => "weighted",
            Self::Vpi => "vpi",
        }
    }

    /// Epsilon-greedy with epsilon decaying as `1 / sqrt(n)` in the visits of each state.
    pub fn eps_greedy() -> Self {
        Self::EpsGreedy {
            epsilon: Parameter::exponential_decay(1.0, 0.5),
        }
    }

    /// Boltzmann with the inverse temperature decaying as `1 / sqrt(n)`.
    pub fn boltzmann() -> Self {
        Self::Boltzmann {
            beta: Parameter::exponential_decay(1.0, 0.5),
        }
    }

    /// Weighted policy without sampling noise.
    pub fn weighted() -> Self {
        Self::Weighted { sampling_std: 0.0 }
    }
}

/// Exploration policy, selected once at construction of the agent.
#[derive(Debug, Clone)]
pub enum EnsemblePolicy {
    /// See [`EpsGreedy`].
    EpsGreedy(EpsGreedy),

    /// See [`Boltzmann`].
    Boltzmann(Boltzmann),

    /// See [`BootPolicy`].
    Boot(BootPolicy),

    /// See [`WeightedPolicy`].
    Weighted(WeightedPolicy),

    /// See [`VpiPolicy`].
    Vpi(VpiPolicy),
}

impl EnsemblePolicy {
    /// Builds the policy for an ensemble of `n_approximators` tables over `n_states`
    /// states.
    pub fn build(
        config: &PolicyConfig,
        n_states: usize,
        n_approximators: usize,
        rng: &mut impl Rng,
    ) -> Result<Self, AgentError> {
        let policy = match config {
            PolicyConfig::EpsGreedy { epsilon } => Self::EpsGreedy(EpsGreedy::new(epsilon.clone(), n_states)?),
            PolicyConfig::Boltzmann { beta } => Self::Boltzmann(Boltzmann::new(beta.clone(), n_states)?),
            PolicyConfig::Boot => Self::Boot(BootPolicy::new(n_approximators, rng)),
            PolicyConfig::Weighted { sampling_std } => Self::Weighted(WeightedPolicy::new(*sampling_std)?),
            PolicyConfig::Vpi => Self::Vpi(VpiPolicy::new()?),
        };
        Ok(policy)
    }

    /// Chooses an action in `state`.
    ///
    /// With `train == false`, exploration is disabled.
    pub fn action(
        &mut self,
        q: &EnsembleTable,
        state: usize,
        train: bool,
        rng: &mut impl Rng,
    ) -> usize {
        if !train {
            return greedy(q, state, rng);
        }
        match self {
            Self::EpsGreedy(p) => p.action(q, state, rng),
            Self::Boltzmann(p) => p.action(q, state, rng),
            Self::Boot(p) => p.action(q, state, rng),
            Self::Weighted(p) => p.action(q, state, rng),
            Self::Vpi(p) => p.action(q, state, rng),
        }
    }

    /// Called at the start of every episode.
    pub fn episode_start(&mut self, train: bool, rng: &mut impl Rng) {
        if let Self::Boot(p) = self {
            if train {
                p.sample_head(rng);
            }
        }
    }
}

/// Greedy action with respect to the ensemble mean, ties broken uniformly at random.
pub fn greedy(q: &EnsembleTable, state: usize, rng: &mut impl Rng) -> usize {
    argmax_random_tie(&q.mean_row(state), rng)
}
