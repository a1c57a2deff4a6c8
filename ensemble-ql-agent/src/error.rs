//! Errors in the agent configuration.
use thiserror::Error;

/// Errors raised while building an agent.
#[derive(Error, Debug, PartialEq)]
pub enum AgentError {
    /// The policy cannot be used with the algorithm.
    #[error("{algorithm} is available only with {available} policies, got {policy}")]
    IncompatiblePolicy {
        /// Name of the algorithm.
        algorithm: String,
        /// Name of the requested policy.
        policy: String,
        /// Names of the policies the algorithm supports.
        available: String,
    },

    /// A parameter is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
