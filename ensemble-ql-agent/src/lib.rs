//! Tabular Q-learning agents with ensembles of action-value tables.
//!
//! * [`table`] - action-value tables and ensembles of them
//! * [`parameter`] - constant and decaying schedules of learning rates and exploration
//! * [`ql`] - the [`EnsembleQl`](ql::EnsembleQl) agent: Q-learning, bootstrapped
//!   Q-learning and particle Q-learning
//! * [`policy`] - exploration policies using the ensemble's uncertainty
pub mod error;
pub mod parameter;
pub mod policy;
pub mod ql;
pub mod table;
mod util;
pub use error::AgentError;

#[cfg(test)]
mod test_env;
