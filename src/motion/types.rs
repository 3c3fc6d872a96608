//! Telemetry data types shared by the capture and export subsystems.

use serde::{Deserialize, Serialize};

/// Attitude quaternion describing head orientation relative to the
/// orientation at session start. The sensor is trusted to deliver unit
/// quaternions; no normalization is applied here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Three-axis vector in the device frame, in units of g.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One raw reading as delivered by a motion source, before timestamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawMotion {
    /// Attitude relative to the reference frame at session start.
    pub attitude: Quaternion,
    /// Linear acceleration with gravity already excluded by the sensor.
    pub user_acceleration: Vector3,
    /// Gravity vector as reported alongside the reading.
    pub gravity: Vector3,
}

/// One recorded observation: session-relative timestamp plus
/// gravity-compensated motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Seconds since session start; non-decreasing across the log.
    pub elapsed_seconds: f64,
    pub orientation: Quaternion,
    pub acceleration: Vector3,
}

impl MotionSample {
    /// Builds a sample from a raw reading, subtracting the reported gravity
    /// component from the z acceleration axis. x and y pass through.
    pub fn from_raw(elapsed_seconds: f64, raw: &RawMotion) -> Self {
        Self {
            elapsed_seconds,
            orientation: raw.attitude,
            acceleration: Vector3 {
                x: raw.user_acceleration.x,
                y: raw.user_acceleration.y,
                z: raw.user_acceleration.z - raw.gravity.z,
            },
        }
    }
}
