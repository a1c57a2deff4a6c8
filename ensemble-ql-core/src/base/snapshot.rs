use crate::record::RecordValue;

/// A copy of the action-value tables of an agent.
///
/// `values[i]` holds the table of the `i`-th member of the ensemble in row-major
/// order, i.e., the value of state `s` and action `a` is at `s * n_actions + a`.
#[derive(Debug, Clone, PartialEq)]
pub struct QSnapshot {
    /// The number of states.
    pub n_states: usize,

    /// The number of actions.
    pub n_actions: usize,

    /// Tables of the members.
    pub values: Vec<Vec<f64>>,
}

impl QSnapshot {
    /// The number of members in the snapshot.
    pub fn n_members(&self) -> usize {
        self.values.len()
    }

    /// Value of the given member, state and action.
    pub fn get(&self, member: usize, state: usize, action: usize) -> f64 {
        self.values[member][state * self.n_actions + action]
    }

    /// Converts the snapshot into a 3-dimensional record value with shape
    /// `[n_members, n_states, n_actions]`.
    pub fn to_record_value(&self) -> RecordValue {
        let data = self
            .values
            .iter()
            .flat_map(|t| t.iter().map(|v| *v as f32))
            .collect();
        RecordValue::Array3(data, [self.n_members(), self.n_states, self.n_actions])
    }
}
