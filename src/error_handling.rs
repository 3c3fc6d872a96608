//! Error types for the capture and export subsystems.

pub mod types;
