use std::fmt;

/// Faults raised by a motion source.
#[derive(Debug)]
pub enum SensorError {
    /// The motion capability is absent (e.g. no motion-capable headphones
    /// connected). Fatal to the start attempt; not retried automatically.
    Unavailable,
    /// A single delivery failed. The faulted reading is dropped and the
    /// session continues.
    ReadFailed(String),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Unavailable => write!(f, "motion sensor is not available"),
            SensorError::ReadFailed(e) => write!(f, "sensor read failed: {}", e),
        }
    }
}

impl std::error::Error for SensorError {}

/// Failures while serializing or persisting an export.
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Csv(e) => write!(f, "CSV serialization error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            ExportError::Csv(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err)
    }
}
