use super::{AggregateRecorder, Record};

/// A recorder that ignores any record.
#[derive(Default)]
pub struct NullRecorder {}

impl AggregateRecorder for NullRecorder {
    fn store(&mut self, _record: Record) {}

    fn flush(&mut self, _step: i64) {}
}
