//! Microphone capture and clip recording

pub mod capture;
pub mod recorder;

pub use capture::{list_input_devices, MicCapture};
pub use recorder::ClipRecorder;
