//! # Frame Buffers
//!
//! The in-memory frame representation shared by every effect, plus the
//! encoder settings that are handed to the external encoder unchanged.

pub mod types;

pub use types::{EncoderSettings, PixelBuffer};
