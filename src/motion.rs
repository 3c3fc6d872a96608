pub mod types;

pub use types::{MotionSample, Quaternion, RawMotion, Vector3};
