//! CSV export of a recorded sample log.
//!
//! The one persisted artifact of the system: UTF-8 text, a header row then
//! one row per sample, fixed column order. Output is staged into a
//! temporary file next to the destination and renamed into place, so the
//! destination either receives the complete content or is left untouched.

use std::path::Path;

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error_handling::types::ExportError;
use crate::motion::MotionSample;

/// Export column names, in the order fields appear in every row.
pub const CSV_COLUMNS: [&str; 8] = [
    "Time (s)",
    "Quaternion W",
    "Quaternion X",
    "Quaternion Y",
    "Quaternion Z",
    "Accelerometer X (g)",
    "Accelerometer Y (g)",
    "Accelerometer Z (g)",
];

/// Serializes `samples` as CSV at `destination`.
///
/// Values use f64's default formatting (shortest round-trippable text), so
/// exporting the same log twice produces byte-identical files. The input is
/// borrowed read-only; callers may hold an active session elsewhere.
pub fn write_samples(samples: &[MotionSample], destination: &Path) -> Result<(), ExportError> {
    let dir = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let staged = NamedTempFile::new_in(dir)?;
    debug!(
        "staging export of {} sample(s) in {}",
        samples.len(),
        staged.path().display()
    );

    let mut writer = csv::Writer::from_writer(staged);
    writer.write_record(CSV_COLUMNS)?;
    for sample in samples {
        writer.write_record([
            sample.elapsed_seconds.to_string(),
            sample.orientation.w.to_string(),
            sample.orientation.x.to_string(),
            sample.orientation.y.to_string(),
            sample.orientation.z.to_string(),
            sample.acceleration.x.to_string(),
            sample.acceleration.y.to_string(),
            sample.acceleration.z.to_string(),
        ])?;
    }
    writer.flush()?;
    let staged = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    // On failure the staging file is dropped and removed; the destination
    // is never left half-written.
    staged
        .persist(destination)
        .map_err(|e| ExportError::Io(e.error))?;

    info!(
        "exported {} sample(s) to {}",
        samples.len(),
        destination.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Quaternion, Vector3};
    use tempfile::TempDir;

    fn sample(t: f64, q: (f64, f64, f64, f64), a: (f64, f64, f64)) -> MotionSample {
        MotionSample {
            elapsed_seconds: t,
            orientation: Quaternion {
                w: q.0,
                x: q.1,
                y: q.2,
                z: q.3,
            },
            acceleration: Vector3 {
                x: a.0,
                y: a.1,
                z: a.2,
            },
        }
    }

    fn three_samples() -> Vec<MotionSample> {
        vec![
            sample(0.1, (1.0, 0.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
            sample(0.5, (0.99, 0.1, 0.0, 0.0), (0.01, 0.0, -0.02)),
            sample(1.2, (0.95, 0.2, 0.1, 0.0), (0.0, 0.03, 0.0)),
        ]
    }

    #[test]
    fn writes_header_and_one_row_per_sample() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.csv");
        write_samples(&three_samples(), &dest).expect("export ok");

        let content = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(content.lines().count(), 4);
        assert_eq!(
            content,
            "Time (s),Quaternion W,Quaternion X,Quaternion Y,Quaternion Z,\
             Accelerometer X (g),Accelerometer Y (g),Accelerometer Z (g)\n\
             0.1,1,0,0,0,0,0,0\n\
             0.5,0.99,0.1,0,0,0.01,0,-0.02\n\
             1.2,0.95,0.2,0.1,0,0,0.03,0\n"
        );
    }

    #[test]
    fn empty_log_exports_header_only() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("empty.csv");
        write_samples(&[], &dest).expect("export ok");

        let content = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("Time (s),"));
    }

    #[test]
    fn repeated_exports_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let samples = three_samples();

        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        write_samples(&samples, &first).unwrap();
        write_samples(&samples, &second).unwrap();
        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );

        // Overwriting in place yields the same bytes as well.
        write_samples(&samples, &first).unwrap();
        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[test]
    fn gravity_compensated_z_is_rendered_verbatim() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("z.csv");
        write_samples(&[sample(0.0, (1.0, 0.0, 0.0, 0.0), (0.0, 0.0, -0.68))], &dest).unwrap();

        let content = std::fs::read_to_string(&dest).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.ends_with(",-0.68"));
    }

    #[test]
    fn invalid_destination_fails_and_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("missing").join("out.csv");
        let err = write_samples(&three_samples(), &dest).expect_err("must fail");
        assert!(matches!(err, ExportError::Io(_)));
        assert!(!err.to_string().is_empty());
        assert!(!dest.exists());
    }
}
