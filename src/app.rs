//! Record/translate controller
//!
//! Orchestrates the clip recorder, the classifier, and the label table in
//! response to a single toggle control. Holds an explicit two-state machine:
//! the first press starts a recording session, the next press stops it, runs
//! one inference, and replaces the display text with the translation or a
//! static error message. Every failure degrades to a message; none abort.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::features::placeholder_features;
use crate::labels::LabelTable;
use crate::model::{arg_max, SoundClassifier};

/// Display text when the classifier model could not be loaded
pub const MODEL_LOAD_ERROR: &str = "Error loading model.";
/// Display text when a loaded model fails at inference time
pub const MODEL_RUN_ERROR: &str = "Error running model.";
/// Display text when the microphone session could not be started
pub const RECORDING_ERROR: &str = "Error starting recording.";
/// Display text when the label table cannot be read or parsed
pub const LABELS_ERROR: &str = "Error reading labels.";

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Recording,
}

impl Phase {
    /// The state after one press of the toggle control
    pub fn toggled(self) -> Self {
        match self {
            Phase::Idle => Phase::Recording,
            Phase::Recording => Phase::Idle,
        }
    }

    /// Label shown on the toggle control in this state
    pub fn button_label(self) -> &'static str {
        match self {
            Phase::Idle => "Record",
            Phase::Recording => "Stop",
        }
    }
}

/// The record/translate application
pub struct App {
    phase: Phase,
    recorder: crate::audio::ClipRecorder,
    classifier: Option<SoundClassifier>,
    labels_path: PathBuf,
    display: String,
}

impl App {
    /// Build the application, loading the classifier up front
    ///
    /// A model-load failure does not abort: the app starts with the error
    /// message on display and inference stays disabled.
    pub fn new(config: Config) -> Self {
        let classifier = match SoundClassifier::load(&config.model) {
            Ok(c) => Some(c),
            Err(e) => {
                error!("Classifier unavailable: {}", e);
                None
            }
        };

        let display = if classifier.is_some() {
            String::new()
        } else {
            MODEL_LOAD_ERROR.to_string()
        };

        Self {
            phase: Phase::Idle,
            recorder: crate::audio::ClipRecorder::new(config.audio, config.recording),
            classifier,
            labels_path: config.labels.labels_path,
            display,
        }
    }

    /// Current controller state
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current display text
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Whether the classifier loaded and inference is possible
    pub fn model_ready(&self) -> bool {
        self.classifier.is_some()
    }

    /// Handle one press of the toggle control
    ///
    /// Returns the display text after the press.
    pub fn press(&mut self) -> &str {
        match self.phase {
            Phase::Idle => match self.recorder.start() {
                Ok(()) => {
                    self.phase = Phase::Recording;
                }
                Err(e) => {
                    error!("Could not start recording: {}", e);
                    self.display = RECORDING_ERROR.to_string();
                }
            },
            Phase::Recording => {
                match self.recorder.stop() {
                    Ok(Some(path)) => info!("Clip saved to {}", path.display()),
                    Ok(None) => {}
                    Err(e) => error!("Could not finalize clip: {}", e),
                }
                self.phase = Phase::Idle;
                self.display = self.translate();
            }
        }

        &self.display
    }

    /// Run one inference over placeholder features and resolve the label
    fn translate(&mut self) -> String {
        let Some(classifier) = self.classifier.as_mut() else {
            return MODEL_LOAD_ERROR.to_string();
        };

        let features = placeholder_features(classifier.input_len());
        match classifier.run(&features) {
            Ok(scores) => translate_scores(&scores, &self.labels_path),
            Err(e) => {
                error!("Inference failed: {}", e);
                MODEL_RUN_ERROR.to_string()
            }
        }
    }
}

/// Map class scores to display text via the label table at `labels_path`
///
/// The table is parsed per call; read or parse failures degrade to
/// [`LABELS_ERROR`] regardless of the scores.
pub fn translate_scores(scores: &[f32], labels_path: &Path) -> String {
    match LabelTable::from_path(labels_path) {
        Ok(table) => render_translation(scores, &table),
        Err(e) => {
            error!("Label table unavailable: {}", e);
            LABELS_ERROR.to_string()
        }
    }
}

/// Format the winning class as display text
pub fn render_translation(scores: &[f32], table: &LabelTable) -> String {
    let phrase = match arg_max(scores) {
        Some(index) => table.resolve(index),
        None => crate::labels::UNKNOWN_SOUND,
    };
    format!("Translation: {}", phrase)
}

/// One-shot translation: load the classifier, infer, resolve
///
/// Used by the non-interactive CLI path.
pub fn translate_once(config: &Config) -> Result<String> {
    let mut classifier = SoundClassifier::load(&config.model)?;
    let features = placeholder_features(classifier.input_len());
    let scores = classifier.run(&features)?;
    Ok(translate_scores(&scores, &config.labels.labels_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_toggle() {
        assert_eq!(Phase::Idle.toggled(), Phase::Recording);
        assert_eq!(Phase::Recording.toggled(), Phase::Idle);
    }

    #[test]
    fn test_phase_toggle_parity() {
        let mut phase = Phase::Idle;
        for _ in 0..6 {
            phase = phase.toggled();
        }
        assert_eq!(phase, Phase::Idle);

        phase = phase.toggled();
        assert_eq!(phase, Phase::Recording);
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(Phase::Idle.button_label(), "Record");
        assert_eq!(Phase::Recording.button_label(), "Stop");
    }

    #[test]
    fn test_render_translation() {
        let table = LabelTable::from_json(r#"{"0":"Meow","1":"Bark","2":"Purr"}"#).unwrap();
        assert_eq!(
            render_translation(&[0.1, 0.9, 0.0], &table),
            "Translation: Bark"
        );
    }

    #[test]
    fn test_render_translation_unknown_index() {
        let table = LabelTable::from_json(r#"{"0":"Meow"}"#).unwrap();
        assert_eq!(
            render_translation(&[0.1, 0.9], &table),
            "Translation: Unknown sound"
        );
    }

    #[test]
    fn test_translate_scores_with_missing_labels() {
        let text = translate_scores(&[0.1, 0.9, 0.0], Path::new("/nonexistent/labels.json"));
        assert_eq!(text, LABELS_ERROR);
    }
}
