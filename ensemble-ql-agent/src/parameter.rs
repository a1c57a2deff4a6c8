//! Schedules of learning rates and exploration parameters.
use crate::AgentError;
use serde::{Deserialize, Serialize};

/// A parameter whose value may depend on how many times an index was visited.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum Parameter {
    /// A fixed value.
    Constant {
        /// The value.
        value: f64,
    },

    /// `max(value / n^decay_exp, min_value)`, where `n` is the visit count of the
    /// index including the current visit.
    ExponentialDecay {
        /// The value at the first visit.
        value: f64,
        /// The exponent of the decay.
        decay_exp: f64,
        /// Lower bound of the value.
        #[serde(default)]
        min_value: Option<f64>,
    },
}

impl Parameter {
    /// Constructs an exponentially decaying parameter without lower bound.
    pub fn exponential_decay(value: f64, decay_exp: f64) -> Self {
        Self::ExponentialDecay {
            value,
            decay_exp,
            min_value: None,
        }
    }

    /// Checks the parameter.
    pub fn validate(&self, name: &str) -> Result<(), AgentError> {
        let ok = match self {
            Self::Constant { value } => value.is_finite() && *value >= 0.0,
            Self::ExponentialDecay {
                value,
                decay_exp,
                min_value,
            } => {
                value.is_finite()
                    && *value >= 0.0
                    && decay_exp.is_finite()
                    && *decay_exp >= 0.0
                    && min_value.map_or(true, |v| v.is_finite() && v >= 0.0)
            }
        };
        match ok {
            true => Ok(()),
            false => Err(AgentError::InvalidConfig(format!(
                "Invalid {}: {:?}",
                name, self
            ))),
        }
    }

    /// The value at the `n`-th visit, `n >= 1`.
    pub fn value(&self, n: usize) -> f64 {
        match self {
            Self::Constant { value } => *value,
            Self::ExponentialDecay {
                value,
                decay_exp,
                min_value,
            } => {
                let v = value / (n.max(1) as f64).powf(*decay_exp);
                match min_value {
                    Some(min) => v.max(*min),
                    None => v,
                }
            }
        }
    }
}

/// A [`Parameter`] with a visit counter for each index.
#[derive(Debug, Clone)]
pub struct ParameterTable {
    parameter: Parameter,
    counts: Vec<usize>,
}

impl ParameterTable {
    /// Constructs a table with `size` indices, all unvisited.
    pub fn new(parameter: Parameter, size: usize) -> Self {
        Self {
            parameter,
            counts: vec![0; size],
        }
    }

    /// Counts a visit of `ix` and returns the value for this visit.
    pub fn next(&mut self, ix: usize) -> f64 {
        assert!(
            ix < self.counts.len(),
            "Parameter index {} out of range (size = {})",
            ix,
            self.counts.len()
        );
        self.counts[ix] += 1;
        self.parameter.value(self.counts[ix])
    }

    /// The value the next visit of `ix` would get, without counting it.
    pub fn peek(&self, ix: usize) -> f64 {
        self.parameter.value(self.counts[ix] + 1)
    }

    /// The number of visits of `ix`.
    pub fn count(&self, ix: usize) -> usize {
        self.counts[ix]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let mut p = ParameterTable::new(Parameter::Constant { value: 0.5 }, 2);
        assert_eq!(p.next(0), 0.5);
        assert_eq!(p.next(0), 0.5);
        assert_eq!(p.count(0), 2);
        assert_eq!(p.count(1), 0);
    }

    #[test]
    fn test_exponential_decay_strictly_decreases() {
        let mut p = ParameterTable::new(Parameter::exponential_decay(1.0, 0.3), 3);
        let first = p.next(1);
        assert_eq!(first, 1.0);
        let mut prev = first;
        for _ in 0..20 {
            let v = p.next(1);
            assert!(v < prev);
            prev = v;
        }
        assert!((p.peek(1) - 1.0 / 22f64.powf(0.3)).abs() < 1e-12);
        // Other indices are not affected
        assert_eq!(p.peek(0), 1.0);
    }

    #[test]
    fn test_min_value() {
        let param = Parameter::ExponentialDecay {
            value: 1.0,
            decay_exp: 1.0,
            min_value: Some(0.2),
        };
        assert_eq!(param.value(2), 0.5);
        assert_eq!(param.value(10), 0.2);
    }

    #[test]
    fn test_validate() {
        assert!(Parameter::Constant { value: 0.1 }.validate("lr").is_ok());
        assert!(Parameter::Constant { value: -0.1 }.validate("lr").is_err());
        assert!(Parameter::exponential_decay(1.0, -0.5).validate("lr").is_err());
    }

    #[test]
    fn test_serde() {
        let p: Parameter =
            serde_yaml::from_str("ExponentialDecay:\n  value: 1.0\n  decay_exp: 0.3\n").unwrap();
        assert_eq!(p, Parameter::exponential_decay(1.0, 0.3));
    }
}
