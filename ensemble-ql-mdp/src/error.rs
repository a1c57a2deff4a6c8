//! Errors in the definition of finite MDPs.
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
/// Errors raised while building a [`FiniteMdp`](crate::FiniteMdp).
pub enum MdpError {
    /// The tables have inconsistent dimensions.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A row of the tables is not a probability distribution.
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    /// A scalar parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
