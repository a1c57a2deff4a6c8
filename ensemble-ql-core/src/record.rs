//! Types and traits for recording metrics of experiments.
//!
//! * [`Record`] - A container for storing key-value pairs of various data types
//! * [`RecordValue`] - The types of values that can be stored
//! * [`AggregateRecorder`] - Stores records and flushes them at given steps
//! * [`BufferedRecorder`] - Keeps records in memory
//! * [`NullRecorder`] - Discards all records
//!
//! ```rust
//! use ensemble_ql_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("epoch", RecordValue::Scalar(1.0));
//! record.insert("train_mean_return", RecordValue::Scalar(-3.5));
//! assert_eq!(record.get_scalar("epoch").unwrap(), 1.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::AggregateRecorder;
