use super::Record;

/// Stores records and writes them at the given steps.
pub trait AggregateRecorder {
    /// Store the record.
    fn store(&mut self, record: Record);

    /// Writes the stored records, tagged with `step`.
    fn flush(&mut self, step: i64);
}
