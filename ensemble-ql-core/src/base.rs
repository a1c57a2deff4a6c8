//! Core functionalities.
mod agent;
mod env;
mod mdp_info;
mod policy;
mod snapshot;
mod step;
pub use agent::Agent;
pub use env::Env;
pub use mdp_info::MdpInfo;
pub use policy::{Configurable, Policy};
pub use snapshot::QSnapshot;
use std::fmt::Debug;
pub use step::{Info, Step, StepProcessor};

/// An observation of a finite environment.
///
/// Tabular agents only see the index of the observed state, which must be
/// smaller than [`MdpInfo::n_states`].
pub trait Obs: Clone + Debug {
    /// Returns the index of the state.
    fn index(&self) -> usize;
}

/// An action of a finite environment.
pub trait Act: Clone + Debug {
    /// Returns the index of the action.
    fn index(&self) -> usize;
}
