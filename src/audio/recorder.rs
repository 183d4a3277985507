//! Clip recorder: one microphone session per recorded WAV file

use std::path::PathBuf;

use tracing::{info, warn};

use crate::audio::MicCapture;
use crate::config::{AudioConfig, RecordingConfig};
use crate::error::{AudioError, Result};

/// Records a single clip at a time to a fixed path
///
/// `start` acquires the microphone; `stop` finalizes the clip and writes it
/// as 32-bit float mono WAV. Stopping when idle is a no-op.
pub struct ClipRecorder {
    capture: MicCapture,
    output_dir: PathBuf,
    file_name: String,
}

impl ClipRecorder {
    pub fn new(audio: AudioConfig, recording: RecordingConfig) -> Self {
        Self {
            capture: MicCapture::new(audio),
            output_dir: recording.output_dir,
            file_name: recording.file_name,
        }
    }

    /// Path the next clip will be written to
    pub fn clip_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Whether a recording session is in progress
    pub fn is_recording(&self) -> bool {
        self.capture.is_active()
    }

    /// Begin a recording session
    pub fn start(&mut self) -> Result<()> {
        // Discard leftovers from an aborted session
        let stale = self.capture.drain();
        if !stale.is_empty() {
            warn!("Discarding {} stale samples", stale.len());
        }

        self.capture.start()
    }

    /// End the session and write the clip
    ///
    /// Returns the clip path, or `None` when no session was in progress.
    pub fn stop(&mut self) -> Result<Option<PathBuf>> {
        if !self.capture.is_active() {
            return Ok(None);
        }

        self.capture.stop();
        let samples = self.capture.drain();
        let sample_rate = self.capture.sample_rate();

        let path = self.clip_path();
        self.write_clip(&path, &samples, sample_rate)?;

        info!(
            "Recorded {} samples ({:.2}s) to {}",
            samples.len(),
            samples.len() as f32 / sample_rate.max(1) as f32,
            path.display()
        );

        Ok(Some(path))
    }

    fn write_clip(&self, path: &PathBuf, samples: &[f32], sample_rate: u32) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let mut writer = hound::WavWriter::create(path, spec)
            .map_err(|e| AudioError::ClipWrite(e.to_string()))?;

        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| AudioError::ClipWrite(e.to_string()))?;
        }

        writer
            .finalize()
            .map_err(|e| AudioError::ClipWrite(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn recorder_in(dir: &std::path::Path) -> ClipRecorder {
        let config = Config::default();
        let recording = RecordingConfig {
            output_dir: dir.to_path_buf(),
            file_name: "clip.wav".to_string(),
        };
        ClipRecorder::new(config.audio, recording)
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = recorder_in(dir.path());

        let result = recorder.stop().unwrap();
        assert!(result.is_none());
        assert!(!recorder.clip_path().exists());
    }

    #[test]
    fn test_clip_path_is_fixed() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = recorder_in(dir.path());
        assert_eq!(recorder.clip_path(), dir.path().join("clip.wav"));
    }

    #[test]
    fn test_write_clip_produces_readable_wav() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = recorder_in(dir.path());

        let samples = vec![0.0f32, 0.5, -0.5, 1.0];
        let path = recorder.clip_path();
        recorder.write_clip(&path, &samples, 16000).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16000);

        let read: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples);
    }
}
