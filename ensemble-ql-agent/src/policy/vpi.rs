//! Value of perfect information policy.
use crate::{table::EnsembleTable, util::argmax_random_tie, AgentError};
use rand::Rng;
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Greedy with respect to the ensemble mean plus the myopic value of perfect
/// information of each action.
///
/// The values of each action are modeled as a normal distribution with the mean and
/// standard deviation of the ensemble. Let `mu1` and `mu2` be the best and second best
/// means. The gain of learning the true value of action `a` is
/// `mu2 - q` if `a` is the best action and `q < mu2`, or `q - mu1` if `a` is another
/// action and `q > mu1`. Its expectation has the closed form
/// `d * Phi(d / sigma) + sigma * phi(d / sigma)`, with `d = mu2 - mu_a` for the best
/// action and `d = mu_a - mu1` for the others.
#[derive(Debug, Clone)]
pub struct VpiPolicy {
    std_normal: Normal,
}

impl VpiPolicy {
    /// Constructs the policy.
    pub fn new() -> Result<Self, AgentError> {
        let std_normal = Normal::new(0.0, 1.0).map_err(|e| AgentError::InvalidConfig(format!("{}", e)))?;
        Ok(Self { std_normal })
    }

    /// Value of perfect information of each action, given the means and standard
    /// deviations of the action values.
    pub fn bonus(&self, mean: &[f64], std: &[f64]) -> Vec<f64> {
        if mean.len() < 2 {
            return vec![0.0; mean.len()];
        }

        // Best and second best means
        let mut best = 0;
        for (a, m) in mean.iter().enumerate() {
            if *m > mean[best] {
                best = a;
            }
        }
        let mu1 = mean[best];
        let mu2 = mean
            .iter()
            .enumerate()
            .filter(|(a, _)| *a != best)
            .map(|(_, m)| *m)
            .fold(f64::NEG_INFINITY, f64::max);

        mean.iter()
            .zip(std.iter())
            .enumerate()
            .map(|(a, (m, s))| {
                if *s <= 0.0 {
                    return 0.0;
                }
                let d = match a == best {
                    true => mu2 - m,
                    false => m - mu1,
                };
                let z = d / s;
                d * self.std_normal.cdf(z) + s * self.std_normal.pdf(z)
            })
            .collect()
    }

    pub(super) fn action(&mut self, q: &EnsembleTable, state: usize, rng: &mut impl Rng) -> usize {
        let mean = q.mean_row(state);
        let bonus = self.bonus(&mean, &q.std_row(state));
        let scores: Vec<f64> = mean.iter().zip(bonus.iter()).map(|(m, b)| m + b).collect();
        argmax_random_tie(&scores, rng)
    }
}
