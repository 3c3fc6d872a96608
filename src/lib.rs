pub mod motion;
pub use motion::*;

pub mod data_capture;
pub use data_capture::*;

pub mod data_export;
pub use data_export::*;

pub mod error_handling;
