use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    audio::AudioBuffer,
    config::NarrationConfig,
    error::{NarrationError, Result},
};

/// Requested voice gender, matched against provider voice names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceHint {
    #[default]
    Default,
    Female,
    Male,
}

impl VoiceHint {
    /// Substring a matching voice name must contain
    fn name_marker(self) -> Option<&'static str> {
        match self {
            VoiceHint::Default => None,
            VoiceHint::Female => Some("Female"),
            VoiceHint::Male => Some("Male"),
        }
    }

    /// Parse a hint; anything unrecognized means the provider default
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "female" => VoiceHint::Female,
            "male" => VoiceHint::Male,
            _ => VoiceHint::Default,
        }
    }
}

/// Text to narrate and the preferred voice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationRequest {
    pub text: String,
    pub voice: VoiceHint,
}

impl NarrationRequest {
    pub fn new<S: Into<String>>(text: S, voice: VoiceHint) -> Self {
        Self {
            text: text.into(),
            voice,
        }
    }
}

/// A voice as reported by the speech provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

impl Voice {
    pub fn new<N: Into<String>, L: Into<String>>(name: N, lang: L) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Fully resolved request handed to the provider
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,

    /// `None` leaves the choice to the provider
    pub voice: Option<Voice>,

    pub rate: f32,
    pub pitch: f32,
}

/// Failures reported by a speech provider
#[derive(Error, Debug)]
pub enum SpeechProviderError {
    #[error("speech engine unavailable")]
    Unavailable,

    #[error("{0}")]
    Failed(String),
}

/// Platform speech engine boundary
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Provider identifier, used in logs and errors
    fn name(&self) -> &str;

    /// Whether the engine exists on this platform
    fn is_available(&self) -> bool;

    /// Installed voices, in provider order
    fn list_voices(&self) -> Vec<Voice>;

    /// Render the utterance; resolves when the provider signals completion
    async fn speak(&self, utterance: &Utterance) -> std::result::Result<AudioBuffer, SpeechProviderError>;
}

/// Provider for environments with no speech engine at all
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSpeechProvider;

#[async_trait]
impl SpeechProvider for UnavailableSpeechProvider {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn list_voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    async fn speak(&self, _utterance: &Utterance) -> std::result::Result<AudioBuffer, SpeechProviderError> {
        Err(SpeechProviderError::Unavailable)
    }
}

/// Pick a voice for the hint
///
/// Female/Male take the first voice whose name contains "Female"/"Male"
/// (case-sensitive), else the first voice. Default picks nothing.
pub fn select_voice(voices: &[Voice], hint: VoiceHint) -> Option<Voice> {
    let marker = hint.name_marker()?;
    voices
        .iter()
        .find(|voice| voice.name.contains(marker))
        .or_else(|| voices.first())
        .cloned()
}

/// Narration adapter over an external speech provider
pub struct NarrationSynthesizer {
    provider: Arc<dyn SpeechProvider>,
    config: NarrationConfig,
}

impl NarrationSynthesizer {
    pub fn new(provider: Arc<dyn SpeechProvider>) -> Self {
        Self::with_config(provider, NarrationConfig::default())
    }

    pub fn with_config(provider: Arc<dyn SpeechProvider>, config: NarrationConfig) -> Self {
        Self { provider, config }
    }

    /// Synthesize narration for the request
    ///
    /// Waits at most `timeout_ms`; dropping the returned future cancels the
    /// provider call.
    pub async fn synthesize_narration(&self, request: NarrationRequest) -> Result<AudioBuffer> {
        if !self.provider.is_available() {
            return Err(NarrationError::UnsupportedPlatform {
                provider: self.provider.name().to_string(),
            }
            .into());
        }

        if request.text.trim().is_empty() {
            return Err(NarrationError::InvalidRequest {
                details: "narration text is empty".to_string(),
            }
            .into());
        }

        let voices = self.provider.list_voices();
        let utterance = Utterance {
            voice: select_voice(&voices, request.voice),
            text: request.text,
            rate: self.config.rate,
            pitch: self.config.pitch,
        };

        debug!(
            "Narrating {} chars with voice {:?} via {}",
            utterance.text.len(),
            utterance.voice.as_ref().map(|voice| voice.name.as_str()),
            self.provider.name()
        );

        let timeout_ms = self.config.timeout_ms;
        let outcome = tokio::time::timeout(Duration::from_millis(timeout_ms), self.provider.speak(&utterance)).await;

        match outcome {
            Ok(Ok(buffer)) => {
                info!("Narration ready: {:.2}s", buffer.duration());
                Ok(buffer)
            }
            Ok(Err(SpeechProviderError::Unavailable)) => Err(NarrationError::UnsupportedPlatform {
                provider: self.provider.name().to_string(),
            }
            .into()),
            Ok(Err(SpeechProviderError::Failed(reason))) => {
                warn!("Speech provider {} failed: {}", self.provider.name(), reason);
                Err(NarrationError::SynthesisFailed { reason }.into())
            }
            Err(_) => {
                warn!("Speech provider {} timed out after {} ms", self.provider.name(), timeout_ms);
                Err(NarrationError::TimedOut { timeout_ms }.into())
            }
        }
    }
}
