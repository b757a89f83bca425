//! # Audio Synthesis
//!
//! Procedural background music and a narration adapter over an external
//! speech engine.
//!
//! ## Core Features
//!
//! - **Music**: additive sine synthesis from a fixed table of styles
//! - **Narration**: voice selection and a bounded wait on a [`SpeechProvider`]
//! - **Buffers**: planar multi-channel waveforms with mixing and WAV export
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vidforge::audio::MusicSynthesizer;
//!
//! # fn main() -> vidforge::Result<()> {
//! let synth = MusicSynthesizer::new(44100);
//! let music = synth.synthesize_music("cinematic", 12.0)?;
//! music.save_wav("music.wav")?;
//! # Ok(())
//! # }
//! ```

pub mod narration;
pub mod patterns;
pub mod synth;
pub mod types;

pub use narration::{
    select_voice, NarrationRequest, NarrationSynthesizer, SpeechProvider, SpeechProviderError,
    UnavailableSpeechProvider, Utterance, Voice, VoiceHint,
};
pub use patterns::MusicPattern;
pub use synth::MusicSynthesizer;
pub use types::AudioBuffer;
