use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    effects::EffectSpec,
    error::{ConfigError, Result},
    video::EncoderSettings,
};

/// Main configuration for VidForge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Encoder settings passed through to the external encoder
    pub video: EncoderSettings,

    /// Audio synthesis settings
    pub audio: AudioConfig,

    /// Frame effect settings
    pub effects: EffectsConfig,

    /// Narration settings
    pub narration: NarrationConfig,

    /// Worker pool settings
    pub processing: ProcessingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            tracing::debug!("TOML error in {}: {}", path.display(), e);
            ConfigError::ParseFailed { path: path.display().to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_encoder(&self.video)?;
        self.audio.validate()?;
        self.effects.validate()?;
        self.narration.validate()?;
        self.processing.validate()?;
        Ok(())
    }
}

fn invalid<V: ToString>(key: &str, value: V) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn validate_encoder(video: &EncoderSettings) -> Result<()> {
    if video.width == 0 || video.height == 0 {
        return Err(invalid("video.resolution", format!("{}x{}", video.width, video.height)).into());
    }
    if video.fps == 0 {
        return Err(invalid("video.fps", video.fps).into());
    }
    if video.bitrate == 0 {
        return Err(invalid("video.bitrate", video.bitrate).into());
    }
    Ok(())
}

/// Audio synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Sample rate for synthesized buffers (Hz)
    pub sample_rate: u32,

    /// Output channel count
    pub channels: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 2,
        }
    }
}

impl AudioConfig {
    fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(invalid("audio.sample_rate", self.sample_rate).into());
        }
        if self.channels == 0 {
            return Err(invalid("audio.channels", self.channels).into());
        }
        Ok(())
    }
}

/// Frame effect configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Fixed seed for film grain; random per run when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grain_seed: Option<u64>,

    /// Look applied before `chain`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub look: Option<String>,

    /// Effects applied to every frame, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<EffectSpec>,
}

impl EffectsConfig {
    fn validate(&self) -> Result<()> {
        for (index, spec) in self.chain.iter().enumerate() {
            if spec.validate().is_err() {
                return Err(invalid(&format!("effects.chain[{}]", index), spec).into());
            }
        }
        Ok(())
    }
}

/// Narration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Speaking rate multiplier
    pub rate: f32,

    /// Pitch multiplier
    pub pitch: f32,

    /// Upper bound on waiting for the speech provider
    pub timeout_ms: u64,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.0,
            timeout_ms: 30_000,
        }
    }
}

impl NarrationConfig {
    fn validate(&self) -> Result<()> {
        if self.rate.is_nan() || self.rate <= 0.0 {
            return Err(invalid("narration.rate", self.rate).into());
        }
        if self.pitch.is_nan() || self.pitch <= 0.0 {
            return Err(invalid("narration.pitch", self.pitch).into());
        }
        if self.timeout_ms == 0 {
            return Err(invalid("narration.timeout_ms", self.timeout_ms).into());
        }
        Ok(())
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of parallel processing threads
    pub threads: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
        }
    }
}

impl ProcessingConfig {
    fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(invalid("processing.threads", self.threads).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::ColorPreset;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.video.fps, 30);
        assert_eq!(config.video.bitrate, 5_000_000);
        assert_eq!(config.narration.timeout_ms, 30_000);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.effects.grain_seed = Some(99);
        original_config.effects.chain = vec![
            EffectSpec::vignette(0.5),
            EffectSpec::color_grade(ColorPreset::Cyberpunk),
        ];

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(loaded_config.video, original_config.video);
        assert_eq!(loaded_config.audio.sample_rate, 44100);
        assert_eq!(loaded_config.effects.grain_seed, Some(99));
        assert_eq!(loaded_config.effects.chain, original_config.effects.chain);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(
            &file_path,
            r#"
[audio]
sample_rate = 22050

[[effects.chain]]
type = "color_grade"
preset = "noir"
"#,
        )
        .unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.audio.sample_rate, 22050);
        assert_eq!(config.audio.channels, 2);
        assert_eq!(config.video.width, 1280);
        assert_eq!(config.effects.chain, vec![EffectSpec::color_grade(ColorPreset::Warm)]);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.user_message().contains("not found"));
    }

    #[test]
    fn test_invalid_audio_config() {
        let mut config = Config::default();
        config.audio.sample_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_effect_chain() {
        let mut config = Config::default();
        config.effects.chain = vec![EffectSpec::film_grain(3.0)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_narration_timeout() {
        let mut config = Config::default();
        config.narration.timeout_ms = 0;
        assert!(config.validate().is_err());
    }
}
