use std::f64::consts::PI;

use rayon::prelude::*;
use tracing::info;

use crate::{
    audio::{AudioBuffer, MusicPattern},
    config::AudioConfig,
    error::{AudioError, Result},
};

/// Amplitude of the shared envelope
const ENVELOPE_GAIN: f64 = 0.3;

/// Fixed output attenuation
const OUTPUT_GAIN: f64 = 0.2;

/// Longest buffer a single channel may hold, in samples
const MAX_SAMPLES_PER_CHANNEL: f64 = u32::MAX as f64;

/// Additive sine synthesizer for background music
pub struct MusicSynthesizer {
    sample_rate: u32,
    channels: usize,
}

impl MusicSynthesizer {
    /// Stereo synthesizer at the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 2,
        }
    }

    pub fn from_config(config: &AudioConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            channels: config.channels as usize,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Render `duration_seconds` of music in the given style
    ///
    /// Unknown styles render as ambient. Each channel is generated on its own
    /// from the same pattern, so channels come out identical.
    pub fn synthesize_music(&self, style: &str, duration_seconds: f64) -> Result<AudioBuffer> {
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(AudioError::InvalidParameters {
                details: format!("duration must be a non-negative number of seconds, got {}", duration_seconds),
            }
            .into());
        }

        let samples = (self.sample_rate as f64 * duration_seconds).round();
        let length = samples as usize;
        if samples > MAX_SAMPLES_PER_CHANNEL || length.checked_mul(self.channels).is_none() {
            return Err(AudioError::InvalidParameters {
                details: format!(
                    "{}s at {} Hz needs {} samples per channel, limit is {}",
                    duration_seconds, self.sample_rate, samples, MAX_SAMPLES_PER_CHANNEL
                ),
            }
            .into());
        }

        let pattern = MusicPattern::lookup(style);
        let mut buffer = AudioBuffer::new(self.channels, length, self.sample_rate)?;

        info!(
            "Synthesizing {:.2}s of '{}' music ({} channels @ {} Hz)",
            duration_seconds,
            pattern.name,
            self.channels,
            self.sample_rate
        );

        let sample_rate = self.sample_rate;
        buffer
            .channels_mut()
            .par_iter_mut()
            .for_each(|channel| render_channel(pattern, sample_rate, channel));

        Ok(buffer)
    }
}

/// Fill one channel with the pattern's partials under the shared envelope
fn render_channel(pattern: &MusicPattern, sample_rate: u32, out: &mut [f32]) {
    let partials = pattern.frequencies.len() as f64;

    for (i, sample) in out.iter_mut().enumerate() {
        let time = i as f64 / sample_rate as f64;
        let envelope = (time * pattern.tempo * PI).sin() * ENVELOPE_GAIN;

        let mut acc = 0.0;
        for &frequency in pattern.frequencies {
            acc += (2.0 * PI * frequency * time).sin() * envelope / partials;
        }

        *sample = (acc * OUTPUT_GAIN) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_one_second_shape() {
        let synth = MusicSynthesizer::new(44100);
        let buffer = synth.synthesize_music("ambient", 1.0).unwrap();

        assert_eq!(buffer.number_of_channels(), 2);
        assert_eq!(buffer.len(), 44100);
        assert_eq!(buffer.sample_rate(), 44100);
        assert!(buffer.peak() <= 0.06 + 1e-6);
        assert!(buffer.peak() > 0.0);
    }

    #[test]
    fn test_unknown_style_matches_ambient() {
        let synth = MusicSynthesizer::new(8000);
        let ambient = synth.synthesize_music("ambient", 0.5).unwrap();
        let unknown = synth.synthesize_music("death-metal", 0.5).unwrap();
        assert_eq!(ambient, unknown);
    }

    #[test]
    fn test_starts_silent_and_channels_match() {
        let synth = MusicSynthesizer::new(8000);
        let buffer = synth.synthesize_music("upbeat", 0.25).unwrap();

        assert_eq!(buffer.channel_data(0)[0], 0.0);
        assert_eq!(buffer.channel_data(0), buffer.channel_data(1));
    }

    #[test]
    fn test_sample_count_rounds() {
        let synth = MusicSynthesizer::new(1000);
        assert_eq!(synth.synthesize_music("cinematic", 0.0125).unwrap().len(), 13);
        assert!(synth.synthesize_music("cinematic", 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_duration_rejected() {
        let synth = MusicSynthesizer::new(1000);
        assert!(synth.synthesize_music("ambient", -1.0).unwrap_err().is_invalid_input());
        assert!(synth.synthesize_music("ambient", f64::NAN).is_err());
        assert!(synth.synthesize_music("ambient", f64::INFINITY).is_err());
    }

    #[test]
    fn test_oversized_duration_rejected() {
        let synth = MusicSynthesizer::new(44100);
        let err = synth.synthesize_music("ambient", 1e15).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_from_config_channels() {
        let config = AudioConfig {
            sample_rate: 16000,
            channels: 1,
        };
        let buffer = MusicSynthesizer::from_config(&config)
            .synthesize_music("ambient", 0.1)
            .unwrap();
        assert_eq!(buffer.number_of_channels(), 1);
        assert_eq!(buffer.len(), 1600);
    }
}
