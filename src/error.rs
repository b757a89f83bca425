use thiserror::Error;

/// Main error type for the VidForge library
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Effect error: {0}")]
    Effect(#[from] EffectError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Narration error: {0}")]
    Narration(#[from] NarrationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Frame effect errors
#[derive(Error, Debug)]
pub enum EffectError {
    #[error("Invalid parameter for {effect}: {details}")]
    InvalidParameter { effect: String, details: String },

    #[error("Invalid pixel buffer: {details}")]
    InvalidBuffer { details: String },

    #[error("Unrecognized effect: {spec}")]
    UnknownEffect { spec: String },
}

/// Audio synthesis errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Invalid audio parameters: {details}")]
    InvalidParameters { details: String },

    #[error("Incompatible audio buffers: {details}")]
    IncompatibleBuffers { details: String },

    #[error("Failed to export audio to {path}: {reason}")]
    ExportFailed { path: String, reason: String },
}

/// Narration errors
#[derive(Error, Debug)]
pub enum NarrationError {
    #[error("Invalid narration request: {details}")]
    InvalidRequest { details: String },

    #[error("Speech synthesis not supported (provider: {provider})")]
    UnsupportedPlatform { provider: String },

    #[error("Speech synthesis failed: {reason}")]
    SynthesisFailed { reason: String },

    #[error("Speech synthesis timed out after {timeout_ms} ms")]
    TimedOut { timeout_ms: u64 },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using ForgeError
pub type Result<T> = std::result::Result<T, ForgeError>;

impl ForgeError {
    /// Malformed buffers, specs or requests. These are caller bugs, never retried.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::Effect(_)
                | Self::Audio(AudioError::InvalidParameters { .. })
                | Self::Audio(AudioError::IncompatibleBuffers { .. })
                | Self::Narration(NarrationError::InvalidRequest { .. })
        )
    }

    /// Check if this error is recoverable (the caller may retry)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Narration(NarrationError::SynthesisFailed { .. }) => true,
            Self::Narration(NarrationError::TimedOut { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Narration(NarrationError::UnsupportedPlatform { .. }) => {
                "Speech synthesis is not available in this environment.".to_string()
            }
            Self::Effect(EffectError::UnknownEffect { spec }) => {
                format!(
                    "Effect '{}' not recognized. Use blur:<0-1>, grain:<0-1>, vignette:<0-1> or grade:<preset>.",
                    spec
                )
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_classification() {
        let err: ForgeError = EffectError::InvalidParameter {
            effect: "vignette".to_string(),
            details: "intensity out of range".to_string(),
        }
        .into();
        assert!(err.is_invalid_input());
        assert!(!err.is_recoverable());

        let err: ForgeError = NarrationError::UnsupportedPlatform {
            provider: "none".to_string(),
        }
        .into();
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_timeout_is_recoverable() {
        let err: ForgeError = NarrationError::TimedOut { timeout_ms: 10 }.into();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("10 ms"));
    }
}
