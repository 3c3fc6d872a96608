use std::sync::Mutex;

use crate::motion::MotionSample;

/// Append-only in-memory sample log for one capture session.
///
/// The delivery drain task is the only writer; display and export readers
/// take a cloned snapshot, so they never observe a half-written record.
#[derive(Debug, Default)]
pub struct CaptureLog {
    samples: Mutex<Vec<MotionSample>>,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, sample: MotionSample) {
        self.samples.lock().unwrap().push(sample);
    }

    /// Consistent copy of the log at the time of the call.
    pub fn snapshot(&self) -> Vec<MotionSample> {
        self.samples.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.samples.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards all samples. Only a fresh session start does this.
    pub(crate) fn clear(&self) {
        self.samples.lock().unwrap().clear();
    }
}
