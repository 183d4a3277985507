//! Error types for the saywhat pipeline

use thiserror::Error;

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Label error: {0}")]
    Labels(#[from] LabelError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Microphone capture and clip writing errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No audio input device available")]
    NoInputDevice,

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to query device configuration: {0}")]
    DeviceConfig(String),

    #[error("Failed to build audio stream: {0}")]
    StreamBuild(String),

    #[error("Stream playback error: {0}")]
    StreamPlay(String),

    #[error("Failed to write clip: {0}")]
    ClipWrite(String),
}

/// Model runtime errors
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model file not found: {0}")]
    NotFound(String),

    #[error("Failed to load model: {0}")]
    Load(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Feature vector has {got} elements, model expects {expected}")]
    InputShape { got: usize, expected: usize },

    #[error("Model produced an empty output vector")]
    EmptyOutput,
}

/// Label table errors
#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Failed to read label file: {0}")]
    Read(String),

    #[error("Failed to parse label file: {0}")]
    Parse(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
