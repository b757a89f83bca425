//! # Frame Effects
//!
//! Per-frame pixel transforms applied in a caller-chosen order.
//!
//! ## Built-in Effects
//!
//! - **Motion blur**: uniform attenuation standing in for directional blur
//! - **Film grain**: per-pixel luminance noise
//! - **Vignette**: black radial gradient composited over the frame
//! - **Color grade**: per-channel multiplier presets
//!
//! Every effect only writes R, G and B, and saturates its output to the 8-bit range.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vidforge::effects::{ColorPreset, EffectSpec, FrameEffectEngine};
//! use vidforge::video::PixelBuffer;
//!
//! # fn main() -> vidforge::Result<()> {
//! let mut frame = PixelBuffer::new_filled(1280, 720, [120, 80, 60, 255])?;
//! let mut engine = FrameEffectEngine::new();
//! engine.apply_chain(&mut frame, &[
//!     EffectSpec::vignette(0.5),
//!     EffectSpec::color_grade(ColorPreset::Cool),
//! ])?;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod registry;
pub mod spec;
pub mod traits;

mod blur;
mod grade;
mod grain;
mod vignette;

pub use blur::MotionBlur;
pub use engine::FrameEffectEngine;
pub use grade::ColorGrade;
pub use grain::FilmGrain;
pub use registry::LookRegistry;
pub use spec::{ColorPreset, EffectSpec};
pub use traits::{quantize, EffectContext, FrameEffect};
pub use vignette::Vignette;

use crate::error::{EffectError, Result};

/// Strength parameters live in [0, 1]; NaN is rejected too.
pub(crate) fn check_unit_range(effect: &str, parameter: &str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(EffectError::InvalidParameter {
            effect: effect.to_string(),
            details: format!("{} must be within 0.0-1.0, got {}", parameter, value),
        }
        .into());
    }
    Ok(())
}
