//! Capture session lifecycle.
//!
//! `CaptureSession` bridges a push-based [`MotionSource`] into an in-memory
//! [`CaptureLog`] and publishes the most recent sample for live display.
//! One producer (the source feed) and one consumer (the drain task) meet at
//! a bounded channel, so samples land in the log in delivery order without
//! any further coordination.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::data_export::csv_writer;
use crate::error_handling::types::{ExportError, SensorError};
use crate::motion::MotionSample;

use super::sample_log::CaptureLog;
use super::source::MotionSource;

/// Delivery channel depth. The source awaits on a full channel rather than
/// dropping, so no sample is ever discarded intentionally.
const DELIVERY_CHANNEL_CAPACITY: usize = 256;

/// Capture lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Recording,
}

struct Inner {
    state: SessionState,
    started_at: Option<DateTime<Utc>>,
    drain: Option<JoinHandle<()>>,
}

/// Records motion telemetry from a [`MotionSource`] into a [`CaptureLog`].
///
/// Operations:
/// - [`start`](CaptureSession::start): begins asynchronous delivery; returns
///   immediately without waiting for a sample.
/// - [`stop`](CaptureSession::stop): ends delivery, retains the log; awaits
///   the drain task so in-flight samples are appended before it returns.
/// - [`latest`](CaptureSession::latest): watch receiver the presentation
///   layer observes on its own execution context.
/// - [`export_csv`](CaptureSession::export_csv): serializes a snapshot of
///   the log; read-only, usable while recording.
pub struct CaptureSession {
    session_id: Uuid,
    source: Arc<dyn MotionSource>,
    log: Arc<CaptureLog>,
    latest_tx: watch::Sender<Option<MotionSample>>,
    inner: Mutex<Inner>,
}

impl CaptureSession {
    pub fn new(source: Arc<dyn MotionSource>) -> Self {
        let session_id = Uuid::new_v4();
        let (latest_tx, _) = watch::channel(None);
        debug!("[{}] CaptureSession created", session_id);
        Self {
            session_id,
            source,
            log: Arc::new(CaptureLog::new()),
            latest_tx,
            inner: Mutex::new(Inner {
                state: SessionState::Idle,
                started_at: None,
                drain: None,
            }),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().unwrap().state
    }

    /// Wall-clock time of the current or most recent recording start.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.inner.lock().unwrap().started_at
    }

    /// Starts recording.
    ///
    /// Fails with [`SensorError::Unavailable`] when the source capability is
    /// absent; the attempt is not retried. A fresh start discards samples
    /// from any previous run, so elapsed timestamps stay monotonic within
    /// one log. Calling this while already recording is a no-op.
    pub fn start(&self) -> Result<(), SensorError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == SessionState::Recording {
            debug!("[{}] start requested while already recording", self.session_id);
            return Ok(());
        }
        if !self.source.is_available() {
            warn!("[{}] motion source unavailable", self.session_id);
            return Err(SensorError::Unavailable);
        }

        let (tx, rx) = mpsc::channel(DELIVERY_CHANNEL_CAPACITY);
        self.source.start_updates(tx)?;

        self.log.clear();
        self.latest_tx.send_replace(None);
        inner.state = SessionState::Recording;
        inner.started_at = Some(Utc::now());
        inner.drain = Some(self.spawn_drain(rx, Instant::now()));

        info!("[{}] recording started", self.session_id);
        Ok(())
    }

    fn spawn_drain(
        &self,
        mut rx: mpsc::Receiver<super::source::SensorDelivery>,
        start: Instant,
    ) -> JoinHandle<()> {
        let session_id = self.session_id;
        let log = Arc::clone(&self.log);
        let latest = self.latest_tx.clone();
        tokio::spawn(async move {
            while let Some(delivery) = rx.recv().await {
                match delivery {
                    Ok(raw) => {
                        let sample =
                            MotionSample::from_raw(start.elapsed().as_secs_f64(), &raw);
                        log.append(sample);
                        latest.send_replace(Some(sample));
                    }
                    Err(e) => {
                        // Faulted delivery: dropped, never aborts the session.
                        warn!("[{}] dropping faulted sensor delivery: {}", session_id, e);
                    }
                }
            }
            debug!("[{}] delivery channel closed", session_id);
        })
    }

    /// Stops recording. Idempotent; the log is retained.
    ///
    /// Awaits the drain task, so every delivery the source accepted before
    /// stopping is in the log when this returns.
    pub async fn stop(&self) {
        let drain = {
            let mut inner = self.inner.lock().unwrap();
            if inner.state == SessionState::Idle && inner.drain.is_none() {
                debug!("[{}] stop requested with no active recording", self.session_id);
                return;
            }
            self.source.stop_updates();
            inner.state = SessionState::Idle;
            inner.drain.take()
        };
        if let Some(handle) = drain {
            if let Err(e) = handle.await {
                warn!("[{}] delivery drain task failed: {}", self.session_id, e);
            }
        }
        info!(
            "[{}] recording stopped, {} sample(s) retained",
            self.session_id,
            self.log.len()
        );
    }

    /// Watch receiver for the most recent sample. `None` until the first
    /// delivery of the current session.
    pub fn latest(&self) -> watch::Receiver<Option<MotionSample>> {
        self.latest_tx.subscribe()
    }

    /// Read-only snapshot of the log in delivery order.
    pub fn samples(&self) -> Vec<MotionSample> {
        self.log.snapshot()
    }

    pub fn sample_count(&self) -> usize {
        self.log.len()
    }

    /// Exports a snapshot of the log as CSV at `destination`, returning the
    /// number of samples written. Does not mutate the log or disturb an
    /// active recording.
    pub fn export_csv(&self, destination: &Path) -> Result<usize, ExportError> {
        let samples = self.log.snapshot();
        csv_writer::write_samples(&samples, destination)?;
        Ok(samples.len())
    }
}
