//! Synthetic motion feed for the CLI and tests.
//!
//! The platform headphone-motion service only exists behind an OS API, so
//! the binary records from this source: a slow head turn with a small
//! acceleration wobble, delivered at a fixed rate on its own task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc;

use crate::error_handling::types::SensorError;
use crate::motion::{Quaternion, RawMotion, Vector3};

use super::source::{MotionSource, SensorDelivery};

/// Gravity magnitude reported along z, in g.
const GRAVITY_Z: f64 = 0.98;
/// Yaw rate of the simulated head turn, radians per second.
const YAW_RATE: f64 = 0.2;

pub struct SimulatedSource {
    rate_hz: f64,
    stop: Mutex<Option<Arc<AtomicBool>>>,
}

impl SimulatedSource {
    pub fn new(rate_hz: f64) -> Self {
        Self {
            rate_hz: rate_hz.max(1.0),
            stop: Mutex::new(None),
        }
    }

    fn reading_at(t: f64) -> RawMotion {
        let half_yaw = YAW_RATE * t / 2.0;
        RawMotion {
            attitude: Quaternion {
                w: half_yaw.cos(),
                x: 0.0,
                y: 0.0,
                z: half_yaw.sin(),
            },
            user_acceleration: Vector3 {
                x: 0.01 * (t * 3.0).sin(),
                y: 0.01 * (t * 2.0).cos(),
                z: GRAVITY_Z + 0.02 * (t * 5.0).sin(),
            },
            gravity: Vector3 {
                x: 0.0,
                y: 0.0,
                z: GRAVITY_Z,
            },
        }
    }
}

impl MotionSource for SimulatedSource {
    fn is_available(&self) -> bool {
        true
    }

    fn start_updates(&self, tx: mpsc::Sender<SensorDelivery>) -> Result<(), SensorError> {
        let stop = Arc::new(AtomicBool::new(false));
        *self.stop.lock().unwrap() = Some(Arc::clone(&stop));

        let period = Duration::from_secs_f64(1.0 / self.rate_hz);
        let rate_hz = self.rate_hz;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            let mut tick: u64 = 0;
            loop {
                interval.tick().await;
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                let t = tick as f64 / rate_hz;
                if tx.send(Ok(Self::reading_at(t))).await.is_err() {
                    break;
                }
                tick += 1;
            }
            debug!("simulated feed ended after {} tick(s)", tick);
        });
        Ok(())
    }

    fn stop_updates(&self) {
        if let Some(stop) = self.stop.lock().unwrap().take() {
            stop.store(true, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn delivers_plausible_readings_until_stopped() {
        let source = SimulatedSource::new(50.0);
        let (tx, mut rx) = mpsc::channel(64);
        source.start_updates(tx).expect("start ok");

        let mut seen = 0;
        while seen < 5 {
            let raw = rx.recv().await.expect("delivery").expect("no fault");
            let q = raw.attitude;
            let norm = (q.w * q.w + q.x * q.x + q.y * q.y + q.z * q.z).sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
            assert_eq!(raw.gravity.z, GRAVITY_Z);
            seen += 1;
        }

        source.stop_updates();
        // The feed drops its sender after the stop flag is observed.
        while rx.recv().await.is_some() {}
    }

    #[test]
    fn readings_start_at_identity_orientation() {
        let raw = SimulatedSource::reading_at(0.0);
        assert_eq!(raw.attitude.w, 1.0);
        assert_eq!(raw.attitude.z, 0.0);
    }
}
