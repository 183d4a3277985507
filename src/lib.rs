//! Pet Sound Translator
//!
//! Records a short clip from the microphone, runs a bundled classifier
//! model over a fixed-size feature vector, and maps the winning class to a
//! human-readable phrase from a bundled JSON label table.
//!
//! # Architecture
//!
//! - `audio`: microphone capture and clip recording
//! - `model`: classifier runtime (ONNX Runtime) and arg-max selection
//! - `labels`: index-to-phrase label table
//! - `features`: placeholder feature extraction (deliberate stub)
//! - `app`: the record/translate controller and its display texts
//! - `config`: configuration structures
//! - `error`: error types
//!
//! # Example
//!
//! ```no_run
//! use saywhat::{App, Config, Phase};
//!
//! let mut app = App::new(Config::default());
//! assert_eq!(app.phase(), Phase::Idle);
//!
//! // First press starts recording, second press stops and translates
//! app.press();
//! let text = app.press();
//! println!("{}", text);
//! ```

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod features;
pub mod labels;
pub mod model;

// Re-exports for convenience
pub use app::{App, Phase};
pub use audio::{ClipRecorder, MicCapture};
pub use config::{AudioConfig, Config, LabelsConfig, ModelConfig, RecordingConfig};
pub use error::{AudioError, ConfigError, Error, LabelError, ModelError, Result};
pub use labels::{LabelTable, UNKNOWN_SOUND};
pub use model::{arg_max, SoundClassifier};
