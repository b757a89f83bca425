use rand::{rngs::SmallRng, SeedableRng};

use crate::{error::Result, video::PixelBuffer};

/// Core trait that all frame effects implement
pub trait FrameEffect: Send + Sync {
    /// Returns the unique name of this effect
    fn name(&self) -> &str;

    /// Returns a human-readable description of this effect
    fn description(&self) -> &str;

    /// Check the effect parameters before any pixel is touched
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Apply the effect to the buffer in place
    ///
    /// # Arguments
    ///
    /// * `buffer` - The frame to modify. Only R, G and B are written.
    /// * `ctx` - Per-engine state such as the noise source
    fn apply(&self, buffer: &mut PixelBuffer, ctx: &mut EffectContext);
}

/// Mutable state shared by the effects of one engine
pub struct EffectContext {
    rng: SmallRng,
}

impl EffectContext {
    /// Context seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Context with a fixed seed, for reproducible grain
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

impl Default for EffectContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp to the 8-bit range and truncate toward zero.
///
/// Every effect funnels its output through here so the overflow policy is the
/// same everywhere: saturate, never wrap.
#[inline]
pub fn quantize(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_quantize_saturates() {
        assert_eq!(quantize(-12.0), 0);
        assert_eq!(quantize(280.5), 255);
        assert_eq!(quantize(229.9), 229);
    }

    #[test]
    fn test_seeded_context_is_reproducible() {
        let mut a = EffectContext::with_seed(7);
        let mut b = EffectContext::with_seed(7);
        let xs: Vec<f32> = (0..8).map(|_| a.rng().gen()).collect();
        let ys: Vec<f32> = (0..8).map(|_| b.rng().gen()).collect();
        assert_eq!(xs, ys);
    }
}
