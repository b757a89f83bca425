use rayon::prelude::*;

use crate::{
    effects::{quantize, ColorPreset, EffectContext, FrameEffect},
    video::{types::CHANNELS, PixelBuffer},
};

/// Per-channel color grading with a fixed multiplier preset
pub struct ColorGrade {
    preset: ColorPreset,
}

impl ColorGrade {
    pub fn new(preset: ColorPreset) -> Self {
        Self { preset }
    }
}

impl FrameEffect for ColorGrade {
    fn name(&self) -> &str {
        "color_grade"
    }

    fn description(&self) -> &str {
        "Scales R, G and B by a preset and clamps to the 8-bit range"
    }

    fn apply(&self, buffer: &mut PixelBuffer, _ctx: &mut EffectContext) {
        let [r, g, b] = self.preset.multipliers();
        let stride = buffer.stride();

        buffer.samples_mut().par_chunks_mut(stride).for_each(|row| {
            for pixel in row.chunks_exact_mut(CHANNELS) {
                pixel[0] = quantize(pixel[0] as f32 * r);
                pixel[1] = quantize(pixel[1] as f32 * g);
                pixel[2] = quantize(pixel[2] as f32 * b);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graded(color: [u8; 4], preset: ColorPreset) -> [u8; 4] {
        let mut buffer = PixelBuffer::new_filled(3, 3, color).unwrap();
        ColorGrade::new(preset).apply(&mut buffer, &mut EffectContext::with_seed(0));
        buffer.get_pixel(1, 1)
    }

    #[test]
    fn test_warm_on_white() {
        assert_eq!(graded([255, 255, 255, 255], ColorPreset::Warm), [255, 255, 229, 255]);
    }

    #[test]
    fn test_presets() {
        let grey = [100, 100, 100, 128];
        assert_eq!(graded(grey, ColorPreset::Cool), [90, 100, 110, 128]);
        assert_eq!(graded(grey, ColorPreset::Vintage), [120, 100, 80, 128]);
        assert_eq!(graded(grey, ColorPreset::Cyberpunk), [100, 90, 130, 128]);
    }

    #[test]
    fn test_unknown_preset_matches_warm() {
        let color = [180, 90, 240, 255];
        assert_eq!(
            graded(color, ColorPreset::from_name("noir")),
            graded(color, ColorPreset::Warm)
        );
    }
}
