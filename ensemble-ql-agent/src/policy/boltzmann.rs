//! Boltzmann (softmax) policy.
use crate::{
    parameter::{Parameter, ParameterTable},
    table::EnsembleTable,
    AgentError,
};
use rand::{distributions::WeightedIndex, prelude::Distribution, Rng};

/// Samples actions with probabilities proportional to `exp(beta * q)`, where `q` is
/// the ensemble mean.
///
/// The inverse temperature `beta` follows a [`Parameter`] counted separately for
/// each state.
#[derive(Debug, Clone)]
pub struct Boltzmann {
    beta: ParameterTable,
}

impl Boltzmann {
    /// Constructs the policy.
    pub fn new(beta: Parameter, n_states: usize) -> Result<Self, AgentError> {
        beta.validate("beta")?;
        Ok(Self {
            beta: ParameterTable::new(beta, n_states),
        })
    }

    pub(super) fn action(&mut self, q: &EnsembleTable, state: usize, rng: &mut impl Rng) -> usize {
        let beta = self.beta.next(state);
        let weights = softmax_weights(&q.mean_row(state), beta);
        let dist = WeightedIndex::new(&weights).expect("Action values must be finite");
        dist.sample(rng)
    }
}

/// Unnormalized softmax weights, shifted by the maximum for numerical stability.
fn softmax_weights(q: &[f64], beta: f64) -> Vec<f64> {
    let max = q.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    q.iter().map(|v| (beta * (v - max)).exp()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_softmax_weights() {
        let w = softmax_weights(&[0.0, 1.0], 2.0);
        assert_eq!(w[1], 1.0);
        assert!((w[0] - (-2f64).exp()).abs() < 1e-12);
        assert_eq!(softmax_weights(&[3.0, 1.0], 0.0), vec![1.0, 1.0]);
    }

    #[test]
    fn test_action_frequencies() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut t = Table::new(1, 2, 0.0);
        t.set(0, 1, 2f64.ln());
        let q = EnsembleTable::new(vec![t]).unwrap();
        let mut p = Boltzmann::new(Parameter::Constant { value: 1.0 }, 1).unwrap();

        // Action 1 is twice as likely as action 0
        let n = 6000;
        let ones = (0..n).filter(|_| p.action(&q, 0, &mut rng) == 1).count();
        let freq = ones as f64 / n as f64;
        assert!((freq - 2.0 / 3.0).abs() < 0.03, "{}", freq);
    }
}
