use tokio::sync::mpsc;

use crate::error_handling::types::SensorError;
use crate::motion::RawMotion;

/// One delivery from a motion feed: a raw reading, or a per-delivery fault
/// that the session drops without aborting.
pub type SensorDelivery = Result<RawMotion, SensorError>;

/// Push-based motion feed, e.g. the headphone motion service.
///
/// Implementations deliver readings on their own task or thread through the
/// channel handed to [`start_updates`](MotionSource::start_updates), in
/// hardware order and at the hardware rate. The feed signals its end by
/// dropping the sender; [`stop_updates`](MotionSource::stop_updates) must
/// cause that to happen.
pub trait MotionSource: Send + Sync {
    /// Whether the underlying motion capability is present right now.
    fn is_available(&self) -> bool;

    /// Begins asynchronous delivery into `tx`. Must not block and must not
    /// wait for the first reading.
    fn start_updates(&self, tx: mpsc::Sender<SensorDelivery>) -> Result<(), SensorError>;

    /// Stops delivery and releases the sender. Safe to call when delivery
    /// was never started or has already stopped.
    fn stop_updates(&self);
}
