//! Feature extraction stub
//!
//! The source system feeds the classifier a zeroed placeholder vector; the
//! recorded clip is never read back into the inference path. That stub is
//! reproduced here deliberately rather than papered over, since no feature
//! specification exists for the bundled model.

// TODO: derive features from the recorded clip once the model's expected
// feature format (mel bins, window, hop) is documented.

/// Produce the fixed-length placeholder feature vector
pub fn placeholder_features(len: usize) -> Vec<f32> {
    vec![0.0; len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_shape() {
        let features = placeholder_features(128);
        assert_eq!(features.len(), 128);
        assert!(features.iter().all(|&f| f == 0.0));
    }
}
