use super::{AggregateRecorder, Record, RecordValue};
use log::trace;

/// Buffered recorder.
///
/// Records given to [`AggregateRecorder::store`] are merged until the next
/// [`AggregateRecorder::flush`], which pushes the merged record, tagged with key
/// `"step"`, to the buffer.
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
    pending: Option<Record>,
}

impl BufferedRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<Record> {
        self.buf.iter()
    }

    /// The number of records in the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no record has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl AggregateRecorder for BufferedRecorder {
    fn store(&mut self, record: Record) {
        match self.pending.as_mut() {
            Some(pending) => pending.merge_inplace(record),
            None => self.pending = Some(record),
        }
    }

    fn flush(&mut self, step: i64) {
        if let Some(mut record) = self.pending.take() {
            trace!("Flush {} values at step {}", record.len(), step);
            record.insert("step", RecordValue::Scalar(step as f32));
            self.buf.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_flush() {
        let mut recorder = BufferedRecorder::new();
        recorder.store(Record::from_scalar("a", 1.0));
        recorder.store(Record::from_scalar("b", 2.0));
        assert!(recorder.is_empty());

        recorder.flush(10);
        assert_eq!(recorder.len(), 1);
        let record = recorder.iter().next().unwrap();
        assert_eq!(record.get_scalar("a").unwrap(), 1.0);
        assert_eq!(record.get_scalar("b").unwrap(), 2.0);
        assert_eq!(record.get_scalar("step").unwrap(), 10.0);

        // Nothing pending
        recorder.flush(11);
        assert_eq!(recorder.len(), 1);
    }
}
