//! Action-value tables.
use crate::AgentError;
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};

/// A dense table of action values, indexed by state and action.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    n_states: usize,
    n_actions: usize,
    values: Vec<f64>,
}

impl Table {
    /// Constructs a table with all entries set to `value`.
    pub fn new(n_states: usize, n_actions: usize, value: f64) -> Self {
        Self {
            n_states,
            n_actions,
            values: vec![value; n_states * n_actions],
        }
    }

    /// The number of states.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// The number of actions.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    #[inline]
    fn ix(&self, state: usize, action: usize) -> usize {
        assert!(
            state < self.n_states,
            "State index {} out of range (n_states = {})",
            state,
            self.n_states
        );
        assert!(
            action < self.n_actions,
            "Action index {} out of range (n_actions = {})",
            action,
            self.n_actions
        );
        state * self.n_actions + action
    }

    /// Value of the given state and action.
    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.values[self.ix(state, action)]
    }

    /// Sets the value of the given state and action.
    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        let ix = self.ix(state, action);
        self.values[ix] = value;
    }

    /// Values of all actions in the given state.
    pub fn row(&self, state: usize) -> &[f64] {
        let start = self.ix(state, 0);
        &self.values[start..start + self.n_actions]
    }

    /// Maximum value over the actions in the given state.
    pub fn max(&self, state: usize) -> f64 {
        self.row(state)
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// All values in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// An ensemble of action-value tables with the same shape.
///
/// Each member is called a particle or a head, depending on the algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleTable {
    members: Vec<Table>,
}

impl EnsembleTable {
    /// Constructs an ensemble from tables.
    ///
    /// Fails if `members` is empty or the tables differ in shape.
    pub fn new(members: Vec<Table>) -> Result<Self, AgentError> {
        let first = members
            .first()
            .ok_or_else(|| AgentError::InvalidConfig("An ensemble needs at least one table".into()))?;
        let shape = (first.n_states, first.n_actions);
        if members.iter().any(|t| (t.n_states, t.n_actions) != shape) {
            return Err(AgentError::InvalidConfig(
                "All tables of an ensemble must have the same shape".into(),
            ));
        }
        Ok(Self { members })
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`, an ensemble has at least one member.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The number of states.
    pub fn n_states(&self) -> usize {
        self.members[0].n_states
    }

    /// The number of actions.
    pub fn n_actions(&self) -> usize {
        self.members[0].n_actions
    }

    /// The `i`-th member.
    pub fn member(&self, i: usize) -> &Table {
        &self.members[i]
    }

    pub(crate) fn member_mut(&mut self, i: usize) -> &mut Table {
        &mut self.members[i]
    }

    /// Iterates over the members.
    pub fn iter(&self) -> std::slice::Iter<'_, Table> {
        self.members.iter()
    }

    /// Mean over the members of the values of each action in the given state.
    pub fn mean_row(&self, state: usize) -> Vec<f64> {
        let n = self.len() as f64;
        let mut sum = vec![0.0; self.n_actions()];
        for t in self.members.iter() {
            for (m, v) in sum.iter_mut().zip(t.row(state)) {
                *m += v;
            }
        }
        sum.into_iter().map(|s| s / n).collect()
    }

    /// Population standard deviation over the members of the values of each action
    /// in the given state.
    ///
    /// A deviation within the rounding error of summing `n` members is reported as
    /// zero, so members holding the same value always have zero spread.
    pub fn std_row(&self, state: usize) -> Vec<f64> {
        let n = self.len() as f64;
        let mean = self.mean_row(state);
        let mut var = vec![0.0; self.n_actions()];
        for t in self.members.iter() {
            for ((s, v), m) in var.iter_mut().zip(t.row(state)).zip(mean.iter()) {
                *s += (v - m) * (v - m);
            }
        }
        var.into_iter()
            .zip(mean.iter())
            .map(|(s, m)| {
                let std = (s / n).sqrt();
                match std <= n * f64::EPSILON * m.abs() {
                    true => 0.0,
                    false => std,
                }
            })
            .collect()
    }

    /// Maximum value over the actions in the given state, for each member.
    pub fn max_per_member(&self, state: usize) -> Vec<f64> {
        self.members.iter().map(|t| t.max(state)).collect()
    }
}

/// Initialization of the members of an ensemble.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum TableInit {
    /// All entries of all members set to `value`.
    Constant {
        /// The initial value.
        value: f64,
    },

    /// Member `i` filled with the `i`-th of `n` evenly spaced values in `[q_min, q_max]`.
    Linspace {
        /// Value of the first member.
        q_min: f64,
        /// Value of the last member.
        q_max: f64,
    },

    /// Every entry drawn from the uniform distribution on `[q_min, q_max]`.
    Uniform {
        /// Lower bound.
        q_min: f64,
        /// Upper bound.
        q_max: f64,
    },

    /// Every entry drawn from the normal distribution `N(mu, sigma^2)`.
    Gaussian {
        /// Mean.
        mu: f64,
        /// Standard deviation.
        sigma: f64,
    },
}

impl TableInit {
    /// Checks the parameters.
    pub fn validate(&self) -> Result<(), AgentError> {
        match self {
            Self::Constant { value } if !value.is_finite() => Err(AgentError::InvalidConfig(
                format!("Initial value must be finite, got {}", value),
            )),
            Self::Linspace { q_min, q_max } | Self::Uniform { q_min, q_max }
                if !(q_min.is_finite() && q_max.is_finite() && q_min <= q_max) =>
            {
                Err(AgentError::InvalidConfig(format!(
                    "q_min must not exceed q_max, got q_min = {}, q_max = {}",
                    q_min, q_max
                )))
            }
            Self::Gaussian { mu, sigma } if !(mu.is_finite() && sigma.is_finite() && *sigma >= 0.0) => {
                Err(AgentError::InvalidConfig(format!(
                    "Gaussian initialization needs finite mu and sigma >= 0, got mu = {}, sigma = {}",
                    mu, sigma
                )))
            }
            _ => Ok(()),
        }
    }

    /// Builds an ensemble of `n` tables.
    pub fn build(
        &self,
        n: usize,
        n_states: usize,
        n_actions: usize,
        rng: &mut impl Rng,
    ) -> Result<EnsembleTable, AgentError> {
        self.validate()?;
        let members: Vec<Table> = match self {
            Self::Constant { value } => (0..n).map(|_| Table::new(n_states, n_actions, *value)).collect(),
            Self::Linspace { q_min, q_max } => (0..n)
                .map(|i| {
                    let value = match n {
                        1 => *q_max,
                        _ => q_min + (q_max - q_min) * i as f64 / (n - 1) as f64,
                    };
                    Table::new(n_states, n_actions, value)
                })
                .collect(),
            Self::Uniform { q_min, q_max } => {
                let dist = Uniform::new_inclusive(*q_min, *q_max);
                (0..n).map(|_| sampled(n_states, n_actions, &dist, rng)).collect()
            }
            Self::Gaussian { mu, sigma } => {
                let dist = Normal::new(*mu, *sigma)
                    .map_err(|e| AgentError::InvalidConfig(format!("{}", e)))?;
                (0..n).map(|_| sampled(n_states, n_actions, &dist, rng)).collect()
            }
        };
        EnsembleTable::new(members)
    }
}

fn sampled(n_states: usize, n_actions: usize, dist: &impl Distribution<f64>, rng: &mut impl Rng) -> Table {
    Table {
        n_states,
        n_actions,
        values: (0..n_states * n_actions).map(|_| dist.sample(rng)).collect(),
    }
}
