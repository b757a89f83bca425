//! # VidForge
//!
//! Frame effects and procedural audio for assembling short videos from
//! AI-generated images, background music and narration.
//!
//! This library covers the deterministic media-processing core: per-frame
//! pixel transforms and audio buffer synthesis. Image generation, the speech
//! engine and the final encoder are external collaborators.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vidforge::{
//!     audio::MusicSynthesizer,
//!     effects::{FrameEffectEngine, LookRegistry},
//!     video::PixelBuffer,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut frame = PixelBuffer::open("scene_01.png")?;
//! let looks = LookRegistry::new();
//! let chain = looks.get("cinematic").unwrap();
//!
//! let mut engine = FrameEffectEngine::new();
//! engine.apply_chain(&mut frame, chain)?;
//! frame.save_png("scene_01_graded.png")?;
//!
//! let music = MusicSynthesizer::new(44100).synthesize_music("ambient", 10.0)?;
//! music.save_wav("music.wav")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`effects`] - Frame effect engine, effect specs and named looks
//! - [`audio`] - Music synthesis, narration adapter and audio buffers
//! - [`video`] - Pixel buffers and pass-through encoder settings
//! - [`config`] - Configuration management
//!
//! ## Custom Effects
//!
//! Effects implement the [`FrameEffect`](effects::FrameEffect) trait:
//!
//! ```rust,no_run
//! use vidforge::effects::{EffectContext, FrameEffect};
//! use vidforge::video::PixelBuffer;
//!
//! struct Invert;
//!
//! impl FrameEffect for Invert {
//!     fn name(&self) -> &str {
//!         "invert"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Inverts the color channels"
//!     }
//!
//!     fn apply(&self, buffer: &mut PixelBuffer, _ctx: &mut EffectContext) {
//!         for pixel in buffer.samples_mut().chunks_exact_mut(4) {
//!             for channel in &mut pixel[..3] {
//!                 *channel = 255 - *channel;
//!             }
//!         }
//!     }
//! }
//! ```

pub mod audio;
pub mod config;
pub mod effects;
pub mod error;
pub mod util;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    audio::{AudioBuffer, MusicSynthesizer, NarrationRequest, NarrationSynthesizer, SpeechProvider},
    config::Config,
    effects::{EffectSpec, FrameEffectEngine, LookRegistry},
    error::{ForgeError, Result},
    video::PixelBuffer,
};
