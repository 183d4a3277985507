//! Microphone capture via cpal
//!
//! A capture session is bounded by explicit [`MicCapture::start`] and
//! [`MicCapture::stop`] calls. Samples arrive on the cpal callback thread
//! and are handed over through an unbounded channel; the consumer drains
//! them when the session ends.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::AudioConfig;
use crate::error::{AudioError, Result};

/// List the names of all available input devices
pub fn list_input_devices() -> Result<Vec<String>> {
    let host = cpal::default_host();
    let devices = host
        .input_devices()
        .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

    Ok(devices.filter_map(|d| d.name().ok()).collect())
}

/// Microphone capture handle
pub struct MicCapture {
    config: AudioConfig,
    stream: Option<Stream>,
    sender: Sender<Vec<f32>>,
    receiver: Receiver<Vec<f32>>,
    active: Arc<AtomicBool>,
    sample_rate: u32,
}

impl MicCapture {
    /// Create an idle capture handle; no device is touched until `start`
    pub fn new(config: AudioConfig) -> Self {
        let (sender, receiver) = unbounded();

        Self {
            config,
            stream: None,
            sender,
            receiver,
            active: Arc::new(AtomicBool::new(false)),
            sample_rate: 0,
        }
    }

    /// Acquire the microphone and begin capturing
    ///
    /// Fails if no input device is available, the configured device cannot
    /// be found, or the stream cannot be built or started.
    pub fn start(&mut self) -> Result<()> {
        let device = self.select_device()?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        let supported = self.pick_stream_config(&device)?;
        self.sample_rate = supported.sample_rate().0;
        let channels = supported.channels();
        info!(
            "Capturing from '{}': {} channels @ {} Hz",
            device_name, channels, self.sample_rate
        );

        let stream_config = StreamConfig {
            channels,
            sample_rate: SampleRate(self.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(self.config.buffer_size),
        };

        let sender = self.sender.clone();
        let active = self.active.clone();
        let n_channels = channels as usize;

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if !active.load(Ordering::Relaxed) {
                        return;
                    }

                    // Downmix to mono before handing over
                    let samples: Vec<f32> = if n_channels > 1 {
                        data.chunks(n_channels)
                            .map(|frame| frame.iter().sum::<f32>() / n_channels as f32)
                            .collect()
                    } else {
                        data.to_vec()
                    };

                    let _ = sender.send(samples);
                },
                move |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        self.active.store(true, Ordering::Relaxed);
        self.stream = Some(stream);

        info!("Microphone capture started");
        Ok(())
    }

    /// Release the microphone; a no-op when not capturing
    pub fn stop(&mut self) {
        if self.stream.is_none() {
            return;
        }
        self.active.store(false, Ordering::Relaxed);
        self.stream = None;
        info!("Microphone capture stopped");
    }

    /// Whether a capture session is in progress
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Sample rate of the current/last session (0 before the first start)
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Drain all samples captured so far
    pub fn drain(&self) -> Vec<f32> {
        let mut samples = Vec::new();
        while let Ok(chunk) = self.receiver.try_recv() {
            samples.extend(chunk);
        }
        samples
    }

    fn select_device(&self) -> Result<Device> {
        let host = cpal::default_host();

        let Some(ref name) = self.config.device else {
            return host
                .default_input_device()
                .ok_or_else(|| AudioError::NoInputDevice.into());
        };

        let devices = host
            .input_devices()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        for device in devices {
            if let Ok(device_name) = device.name() {
                if device_name.contains(name) {
                    return Ok(device);
                }
            }
        }

        Err(AudioError::DeviceNotFound(name.clone()).into())
    }

    fn pick_stream_config(
        &self,
        device: &Device,
    ) -> Result<cpal::SupportedStreamConfig> {
        let supported = device
            .supported_input_configs()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        let target_rate = SampleRate(self.config.sample_rate);
        let mut fallback = None;

        for cfg in supported {
            debug!(
                "Supported config: channels={}, rate={:?}..{:?}",
                cfg.channels(),
                cfg.min_sample_rate(),
                cfg.max_sample_rate()
            );

            if cfg.channels() == self.config.channels {
                if cfg.min_sample_rate() <= target_rate && target_rate <= cfg.max_sample_rate() {
                    return Ok(cfg.with_sample_rate(target_rate));
                }
                return Ok(cfg.with_max_sample_rate());
            }
            if fallback.is_none() {
                fallback = Some(cfg.with_max_sample_rate());
            }
        }

        fallback.ok_or_else(|| {
            AudioError::DeviceConfig("No suitable input configuration found".to_string()).into()
        })
    }
}

impl Drop for MicCapture {
    fn drop(&mut self) {
        self.stop();
    }
}
