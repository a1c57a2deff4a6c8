use serde::{Deserialize, Serialize};

/// Static metadata of a finite MDP.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct MdpInfo {
    /// The number of states.
    pub n_states: usize,

    /// The number of actions.
    pub n_actions: usize,

    /// Discount factor.
    pub gamma: f64,

    /// The maximum length of an episode. `None` means no limit.
    pub horizon: Option<usize>,
}

impl MdpInfo {
    /// Constructs [`MdpInfo`].
    pub fn new(n_states: usize, n_actions: usize, gamma: f64, horizon: Option<usize>) -> Self {
        Self {
            n_states,
            n_actions,
            gamma,
            horizon,
        }
    }

    /// The number of state-action pairs.
    pub fn size(&self) -> usize {
        self.n_states * self.n_actions
    }
}
