//! Ensemble Q-learning.
//!
//! [`EnsembleQl`] keeps `n_approximators` action-value tables and updates them with
//! one of the algorithms in [`Algorithm`]:
//!
//! * Q-learning with a single table,
//! * bootstrapped Q-learning, where heads bootstrap on themselves and see each
//!   transition with some probability,
//! * particle Q-learning, with a configurable [`UpdateMode`] and [`UpdateType`].
//!
//! The algorithm and the exploration policy are chosen once, when the agent is built
//! from [`EnsembleQlConfig`].
mod algorithm;
mod base;
mod config;
mod update;
pub use algorithm::{Algorithm, UpdateMode, UpdateType};
pub use base::EnsembleQl;
pub use config::EnsembleQlConfig;
