use rayon::prelude::*;

use crate::{
    effects::{check_unit_range, quantize, EffectContext, FrameEffect},
    error::Result,
    video::{types::CHANNELS, PixelBuffer},
};

/// Cheap stand-in for directional blur: uniform per-pixel attenuation
///
/// `channel' = channel * (1 - amount)`. No spatial convolution happens, so
/// `amount = 0` is the identity and `amount = 1` blacks out the color channels.
pub struct MotionBlur {
    amount: f32,
}

impl MotionBlur {
    pub fn new(amount: f32) -> Self {
        Self { amount }
    }
}

impl FrameEffect for MotionBlur {
    fn name(&self) -> &str {
        "motion_blur"
    }

    fn description(&self) -> &str {
        "Darkens every pixel uniformly to suggest motion streaks"
    }

    fn validate(&self) -> Result<()> {
        check_unit_range(self.name(), "amount", self.amount)
    }

    fn apply(&self, buffer: &mut PixelBuffer, _ctx: &mut EffectContext) {
        let keep = 1.0 - self.amount;
        let stride = buffer.stride();

        buffer.samples_mut().par_chunks_mut(stride).for_each(|row| {
            for pixel in row.chunks_exact_mut(CHANNELS) {
                for channel in &mut pixel[..3] {
                    *channel = quantize(*channel as f32 * keep);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> PixelBuffer {
        let mut buffer = PixelBuffer::new(16, 9).unwrap();
        for y in 0..9 {
            for x in 0..16 {
                buffer.set_pixel(x, y, [(x * 16) as u8, (y * 28) as u8, 255 - (x * 8) as u8, 200]);
            }
        }
        buffer
    }

    #[test]
    fn test_zero_amount_is_identity() {
        let original = gradient();
        let mut buffer = original.clone();
        MotionBlur::new(0.0).apply(&mut buffer, &mut EffectContext::with_seed(1));
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_full_amount_zeroes_color_keeps_alpha() {
        let mut buffer = gradient();
        MotionBlur::new(1.0).apply(&mut buffer, &mut EffectContext::with_seed(1));
        for pixel in buffer.samples().chunks_exact(CHANNELS) {
            assert_eq!(pixel, &[0, 0, 0, 200]);
        }
    }

    #[test]
    fn test_partial_amount_truncates() {
        let mut buffer = PixelBuffer::new_filled(2, 2, [255, 100, 3, 255]).unwrap();
        MotionBlur::new(0.5).apply(&mut buffer, &mut EffectContext::with_seed(1));
        assert_eq!(buffer.get_pixel(0, 0), [127, 50, 1, 255]);
    }
}
