//! Finite MDPs defined by explicit transition and reward tables.
//!
//! [`FiniteMdp`] implements [`Env`](ensemble_ql_core::Env) for an MDP given by
//!
//! * `p[s][a][s']`, the probability of moving from `s` to `s'` with action `a`,
//! * `r[s][a][s']`, the reward of that transition,
//! * `mu[s]`, an optional initial state distribution (uniform over the states
//!   if omitted).
//!
//! A state whose transition probabilities are all zero is absorbing: reaching it
//! terminates the episode. Episodes are truncated after `horizon` steps.
//!
//! The tables are usually written in YAML and loaded with [`FiniteMdpConfig::load`].
mod base;
mod config;
mod error;
pub use base::{FiniteMdp, FiniteMdpAct, FiniteMdpObs};
pub use config::FiniteMdpConfig;
pub use error::MdpError;
