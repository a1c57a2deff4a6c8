//! Weighted policy.
use crate::{table::EnsembleTable, util::argmax_random_tie, AgentError};
use rand::Rng;
use rand_distr::StandardNormal;

/// Each member votes for the action that is best under its estimates, optionally
/// perturbed by Gaussian noise. The action with the most votes is taken.
///
/// This approximates sampling actions with the probability of being optimal under
/// the distribution represented by the ensemble.
#[derive(Debug, Clone)]
pub struct WeightedPolicy {
    sampling_std: f64,
}

impl WeightedPolicy {
    /// Constructs the policy. `sampling_std` must be finite and non-negative.
    pub fn new(sampling_std: f64) -> Result<Self, AgentError> {
        if !(sampling_std.is_finite() && sampling_std >= 0.0) {
            return Err(AgentError::InvalidConfig(format!(
                "sampling_std must be non-negative, got {}",
                sampling_std
            )));
        }
        Ok(Self { sampling_std })
    }

    /// The number of members voting for each action in `state`.
    pub fn votes(&self, q: &EnsembleTable, state: usize, rng: &mut impl Rng) -> Vec<usize> {
        let mut votes = vec![0; q.n_actions()];
        for t in q.iter() {
            let best = match self.sampling_std {
                s if s > 0.0 => {
                    let sampled: Vec<f64> = t
                        .row(state)
                        .iter()
                        .map(|v| v + s * rng.sample::<f64, _>(StandardNormal))
                        .collect();
                    argmax_random_tie(&sampled, rng)
                }
                _ => argmax_random_tie(t.row(state), rng),
            };
            votes[best] += 1;
        }
        votes
    }

    pub(super) fn action(&mut self, q: &EnsembleTable, state: usize, rng: &mut impl Rng) -> usize {
        let votes = self.votes(q, state, rng);
        argmax_random_tie(&votes, rng)
    }
}
