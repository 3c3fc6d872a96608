pub mod sample_log;
pub mod session;
pub mod simulator;
pub mod source;

pub use sample_log::CaptureLog;
pub use session::{CaptureSession, SessionState};
pub use simulator::SimulatedSource;
pub use source::{MotionSource, SensorDelivery};
