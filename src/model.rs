//! Sound classifier backed by ONNX Runtime

use std::path::Path;

use ort::session::Session;
use tracing::{debug, info};

use crate::config::ModelConfig;
use crate::error::{ModelError, Result};

/// Fixed-shape sound classifier
///
/// Wraps an ONNX Runtime session over the bundled model file. The model
/// contract is `[1, input_len] f32 -> [1, n] f32` where `n` is the number
/// of classes in the label table.
pub struct SoundClassifier {
    session: Session,
    input_len: usize,
}

impl SoundClassifier {
    /// Load the classifier from the configured model file
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let model_path = &config.model_path;

        if !model_path.exists() {
            return Err(ModelError::NotFound(model_path.display().to_string()).into());
        }

        info!("Loading classifier model from: {}", model_path.display());

        let session = Session::builder()
            .map_err(|e| ModelError::Load(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| ModelError::Load(e.to_string()))?;

        info!("Classifier model loaded (input length: {})", config.input_len);

        Ok(Self {
            session,
            input_len: config.input_len,
        })
    }

    /// Load a classifier from a specific model path with default settings
    pub fn from_model_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = ModelConfig {
            model_path: path.as_ref().to_path_buf(),
            ..Default::default()
        };
        Self::load(&config)
    }

    /// Feature vector length the model expects
    pub fn input_len(&self) -> usize {
        self.input_len
    }

    /// Run one synchronous inference over a feature vector
    ///
    /// Returns the raw per-class scores.
    pub fn run(&mut self, features: &[f32]) -> Result<Vec<f32>> {
        if features.len() != self.input_len {
            return Err(ModelError::InputShape {
                got: features.len(),
                expected: self.input_len,
            }
            .into());
        }

        debug!("Running inference over {} features", features.len());

        let input = ort::value::Tensor::from_array((vec![1, self.input_len], features.to_vec()))
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let outputs = self
            .session
            .run(ort::inputs![input])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let (_shape, scores) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        if scores.is_empty() {
            return Err(ModelError::EmptyOutput.into());
        }

        debug!("Inference produced {} class scores", scores.len());
        Ok(scores.to_vec())
    }
}

/// Index of the highest score, ties broken toward the lowest index
///
/// Returns `None` for an empty score vector.
pub fn arg_max(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_max_picks_largest() {
        assert_eq!(arg_max(&[0.1, 0.9, 0.0]), Some(1));
        assert_eq!(arg_max(&[0.7, 0.2, 0.1]), Some(0));
        assert_eq!(arg_max(&[0.1, 0.2, 0.7]), Some(2));
    }

    #[test]
    fn test_arg_max_ties_resolve_to_lowest_index() {
        assert_eq!(arg_max(&[0.2, 0.5, 0.5]), Some(1));
        assert_eq!(arg_max(&[0.5, 0.5, 0.5]), Some(0));
    }

    #[test]
    fn test_arg_max_empty() {
        assert_eq!(arg_max(&[]), None);
    }

    #[test]
    fn test_arg_max_single_element() {
        assert_eq!(arg_max(&[-3.0]), Some(0));
    }

    #[test]
    fn test_classifier_missing_model() {
        let config = ModelConfig {
            model_path: "/nonexistent/pet_sounds.onnx".into(),
            ..Default::default()
        };

        let result = SoundClassifier::load(&config);
        assert!(result.is_err());
    }
}
