//! Epsilon-greedy policy.
use super::greedy;
use crate::{
    parameter::{Parameter, ParameterTable},
    table::EnsembleTable,
    AgentError,
};
use rand::Rng;

/// Takes a uniformly random action with probability epsilon, otherwise the greedy
/// action on the ensemble mean.
///
/// Epsilon follows a [`Parameter`] counted separately for each state.
#[derive(Debug, Clone)]
pub struct EpsGreedy {
    epsilon: ParameterTable,
}

impl EpsGreedy {
    /// Constructs the policy.
    pub fn new(epsilon: Parameter, n_states: usize) -> Result<Self, AgentError> {
        epsilon.validate("epsilon")?;
        Ok(Self {
            epsilon: ParameterTable::new(epsilon, n_states),
        })
    }

    pub(super) fn action(&mut self, q: &EnsembleTable, state: usize, rng: &mut impl Rng) -> usize {
        let eps = self.epsilon.next(state);
        if rng.gen::<f64>() < eps {
            rng.gen_range(0..q.n_actions())
        } else {
            greedy(q, state, rng)
        }
    }
}
