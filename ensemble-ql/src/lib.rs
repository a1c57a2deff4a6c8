//! Tabular ensemble Q-learning with uncertainty-aware exploration.
//!
//! This crate collects the following crates:
//!
//! * [`ensemble-ql-core`](ensemble_ql_core) provides the environment, policy and agent
//!   traits, and the experiment loop alternating training and evaluation phases.
//! * [`ensemble-ql-agent`](ensemble_ql_agent) implements the
//!   [`EnsembleQl`](ensemble_ql_agent::ql::EnsembleQl) agent, which keeps an ensemble of
//!   action-value tables updated with Q-learning, bootstrapped Q-learning or particle
//!   Q-learning, and the exploration policies using the ensemble:
//!   bootstrapped, weighted and VPI, together with epsilon-greedy and Boltzmann.
//! * [`ensemble-ql-mdp`](ensemble_ql_mdp) is a finite MDP defined by transition and
//!   reward tables.
//!
//! [`experiment`] puts them together. The `tabular_mdp` example is a command line
//! interface to it.
pub mod experiment;
pub use ensemble_ql_agent as agent;
pub use ensemble_ql_core as core;
pub use ensemble_ql_mdp as mdp;
