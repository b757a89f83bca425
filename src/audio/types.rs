use std::path::Path;

use crate::error::{AudioError, Result};

/// Multi-channel floating point waveform
///
/// Channels are stored planar, one `Vec<f32>` each, all the same length.
/// Samples are nominally in [-1.0, 1.0] but nothing clamps them.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Allocate a silent buffer
    pub fn new(channel_count: usize, length: usize, sample_rate: u32) -> Result<Self> {
        Self::check_format(channel_count, sample_rate)?;
        Ok(Self {
            channels: vec![vec![0.0; length]; channel_count],
            sample_rate,
        })
    }

    /// Wrap existing planar channel data
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        Self::check_format(channels.len(), sample_rate)?;

        let length = channels[0].len();
        if channels.iter().any(|channel| channel.len() != length) {
            return Err(AudioError::InvalidParameters {
                details: "all channels must have the same length".to_string(),
            }
            .into());
        }

        Ok(Self { channels, sample_rate })
    }

    /// Wrap a single mono channel
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        Self::from_channels(vec![samples], sample_rate)
    }

    fn check_format(channel_count: usize, sample_rate: u32) -> Result<()> {
        if channel_count == 0 {
            return Err(AudioError::InvalidParameters {
                details: "audio buffer needs at least one channel".to_string(),
            }
            .into());
        }
        if sample_rate == 0 {
            return Err(AudioError::InvalidParameters {
                details: "sample rate must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn number_of_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    /// Get samples for a specific channel (0-based)
    pub fn channel_data(&self, channel: usize) -> &[f32] {
        &self.channels[channel]
    }

    pub fn channel_data_mut(&mut self, channel: usize) -> &mut [f32] {
        &mut self.channels[channel]
    }

    pub(crate) fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }

    /// Largest absolute sample value across all channels
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flat_map(|channel| channel.iter())
            .fold(0.0f32, |peak, &sample| peak.max(sample.abs()))
    }

    /// Frame-interleaved samples (L, R, L, R, ...)
    pub fn interleaved(&self) -> Vec<f32> {
        let count = self.number_of_channels();
        let mut out = Vec::with_capacity(self.len() * count);
        for i in 0..self.len() {
            for channel in &self.channels {
                out.push(channel[i]);
            }
        }
        out
    }

    /// Add `other * gain` into this buffer
    ///
    /// A mono `other` is spread across every channel; otherwise channel counts
    /// must match. The buffer grows with silence if `other` is longer.
    pub fn mix_in(&mut self, other: &AudioBuffer, gain: f32) -> Result<()> {
        if other.sample_rate != self.sample_rate {
            return Err(AudioError::IncompatibleBuffers {
                details: format!("sample rate {} vs {}", self.sample_rate, other.sample_rate),
            }
            .into());
        }

        let spread = other.number_of_channels() == 1;
        if !spread && other.number_of_channels() != self.number_of_channels() {
            return Err(AudioError::IncompatibleBuffers {
                details: format!(
                    "cannot mix {} channels into {}",
                    other.number_of_channels(),
                    self.number_of_channels()
                ),
            }
            .into());
        }

        let length = self.len().max(other.len());
        for (index, channel) in self.channels.iter_mut().enumerate() {
            channel.resize(length, 0.0);
            let source = if spread { &other.channels[0] } else { &other.channels[index] };
            for (dst, &src) in channel.iter_mut().zip(source.iter()) {
                *dst += src * gain;
            }
        }

        Ok(())
    }

    /// Write the buffer as a 32-bit float WAV file
    pub fn save_wav<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let export_failed = |e: hound::Error| AudioError::ExportFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let channels = u16::try_from(self.number_of_channels()).map_err(|_| AudioError::ExportFailed {
            path: path.display().to_string(),
            reason: format!("WAV cannot hold {} channels", self.number_of_channels()),
        })?;
        let spec = hound::WavSpec {
            channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let mut writer = hound::WavWriter::create(path, spec).map_err(export_failed)?;
        for sample in self.interleaved() {
            writer.write_sample(sample).map_err(export_failed)?;
        }
        writer.finalize().map_err(export_failed)?;

        tracing::debug!("Wrote {:.2}s of audio to {}", self.duration(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_rejected() {
        assert!(AudioBuffer::new(0, 10, 44100).is_err());
        assert!(AudioBuffer::new(2, 10, 0).is_err());
        assert!(AudioBuffer::from_channels(vec![vec![0.0; 3], vec![0.0; 4]], 8000).is_err());
    }

    #[test]
    fn test_interleaving() {
        let buffer = AudioBuffer::from_channels(vec![vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]], 8000).unwrap();
        assert_eq!(buffer.interleaved(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.peak(), 6.0);
    }

    #[test]
    fn test_mix_mono_into_stereo_extends() {
        let mut music = AudioBuffer::from_channels(vec![vec![0.25, 0.25], vec![0.5, 0.5]], 100).unwrap();
        let voice = AudioBuffer::from_mono(vec![1.0, 1.0, 1.0], 100).unwrap();

        music.mix_in(&voice, 0.5).unwrap();
        assert_eq!(music.len(), 3);
        assert_eq!(music.channel_data(0), &[0.75, 0.75, 0.5]);
        assert_eq!(music.channel_data(1), &[1.0, 1.0, 0.5]);
    }

    #[test]
    fn test_mix_rejects_mismatch() {
        let mut stereo = AudioBuffer::new(2, 4, 100).unwrap();
        let other_rate = AudioBuffer::new(2, 4, 200).unwrap();
        let three = AudioBuffer::new(3, 4, 100).unwrap();

        assert!(stereo.mix_in(&other_rate, 1.0).is_err());
        assert!(stereo.mix_in(&three, 1.0).is_err());
    }

    #[test]
    fn test_wav_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        let buffer = AudioBuffer::from_channels(vec![vec![0.25, -0.5], vec![0.75, 0.0]], 22050).unwrap();
        buffer.save_wav(&path).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 22050);

        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0.25, 0.75, -0.5, 0.0]);
    }

    #[test]
    fn test_wav_export_rejects_too_many_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.wav");

        let buffer = AudioBuffer::from_channels(vec![vec![0.0]; u16::MAX as usize + 1], 8000).unwrap();
        let err = buffer.save_wav(&path).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ForgeError::Audio(AudioError::ExportFailed { .. })
        ));
        assert!(!path.exists());
    }
}
