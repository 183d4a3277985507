//! Configuration structures for saywhat

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub recording: RecordingConfig,
    pub model: ModelConfig,
    pub labels: LabelsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, crate::error::ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| {
            crate::error::ConfigError::FileNotFound(path.display().to_string())
        })?;

        toml::from_str(&content).map_err(|e| crate::error::ConfigError::Parse(e.to_string()))
    }
}

/// Microphone capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Preferred sample rate (Hz); the device may pick another
    pub sample_rate: u32,
    /// Requested channel count (captured audio is downmixed to mono)
    pub channels: u16,
    /// Stream buffer size in samples
    pub buffer_size: u32,
    /// Input device name (None = default device)
    pub device: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            channels: 1,
            buffer_size: 512,
            device: None,
        }
    }
}

/// Where the finished clip is written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Directory for recorded clips
    pub output_dir: PathBuf,
    /// Fixed clip file name
    pub file_name: String,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./recordings"),
            file_name: "clip.wav".to_string(),
        }
    }
}

/// Model runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the bundled classifier model (ONNX)
    pub model_path: PathBuf,
    /// Fixed feature vector length expected by the model
    pub input_len: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./assets/pet_sounds.onnx"),
            input_len: 128,
        }
    }
}

/// Label table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    /// Path to the bundled index-to-phrase JSON table
    pub labels_path: PathBuf,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            labels_path: PathBuf::from("./assets/labels.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.audio.channels, 1);
        assert_eq!(config.model.input_len, 128);
        assert_eq!(config.recording.file_name, "clip.wav");
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
            [audio]
            sample_rate = 44100
            device = "USB Microphone"

            [model]
            model_path = "/opt/models/pets.onnx"
            input_len = 64

            [labels]
            labels_path = "/opt/models/labels.json"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.audio.sample_rate, 44100);
        assert_eq!(config.audio.device.as_deref(), Some("USB Microphone"));
        assert_eq!(config.model.input_len, 64);
        assert_eq!(
            config.labels.labels_path,
            PathBuf::from("/opt/models/labels.json")
        );
        // Untouched sections keep their defaults
        assert_eq!(config.recording.file_name, "clip.wav");
    }
}
