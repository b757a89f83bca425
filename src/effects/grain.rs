use rand::Rng;

use crate::{
    effects::{check_unit_range, quantize, EffectContext, FrameEffect},
    error::Result,
    video::{types::CHANNELS, PixelBuffer},
};

/// Monochrome film grain
///
/// One noise sample per pixel, `(u - 0.5) * intensity * 255` with `u` uniform
/// in [0, 1), added identically to R, G and B. Results saturate at 0 and 255.
/// Runs sequentially so a seeded context always yields the same frame.
pub struct FilmGrain {
    intensity: f32,
}

impl FilmGrain {
    pub fn new(intensity: f32) -> Self {
        Self { intensity }
    }
}

impl FrameEffect for FilmGrain {
    fn name(&self) -> &str {
        "film_grain"
    }

    fn description(&self) -> &str {
        "Adds luminance noise shared across the color channels of each pixel"
    }

    fn validate(&self) -> Result<()> {
        check_unit_range(self.name(), "intensity", self.intensity)
    }

    fn apply(&self, buffer: &mut PixelBuffer, ctx: &mut EffectContext) {
        let scale = self.intensity * 255.0;
        let rng = ctx.rng();

        for pixel in buffer.samples_mut().chunks_exact_mut(CHANNELS) {
            let noise = (rng.gen::<f32>() - 0.5) * scale;
            for channel in &mut pixel[..3] {
                *channel = quantize(*channel as f32 + noise);
            }
        }
    }
}
