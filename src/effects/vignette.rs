use rayon::prelude::*;

use crate::{
    effects::{check_unit_range, quantize, EffectContext, FrameEffect},
    error::Result,
    video::{types::CHANNELS, PixelBuffer},
};

/// Radial darkening toward the frame edges
///
/// A black radial gradient centered on the frame, transparent at the center and
/// reaching `intensity` opacity at half the longer side (and beyond), is
/// composited over the frame with the "over" operator. Black over a color `c`
/// at opacity `a` leaves `c * (1 - a)`. Alpha is not modified.
pub struct Vignette {
    intensity: f32,
}

impl Vignette {
    pub fn new(intensity: f32) -> Self {
        Self { intensity }
    }

    /// Gradient opacity at distance `distance` from the center
    pub fn opacity_at(&self, distance: f32, radius: f32) -> f32 {
        if radius <= 0.0 {
            return self.intensity;
        }
        self.intensity * (distance / radius).min(1.0)
    }
}

impl FrameEffect for Vignette {
    fn name(&self) -> &str {
        "vignette"
    }

    fn description(&self) -> &str {
        "Composites a black radial gradient over the frame"
    }

    fn validate(&self) -> Result<()> {
        check_unit_range(self.name(), "intensity", self.intensity)
    }

    fn apply(&self, buffer: &mut PixelBuffer, _ctx: &mut EffectContext) {
        let width = buffer.width();
        let height = buffer.height();
        let stride = buffer.stride();

        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;
        let radius = width.max(height) as f32 / 2.0;

        buffer
            .samples_mut()
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                let dy = y as f32 + 0.5 - center_y;
                for (x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
                    let dx = x as f32 + 0.5 - center_x;
                    let alpha = self.opacity_at(dx.hypot(dy), radius);
                    let keep = 1.0 - alpha;
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

    #[test]
    fn test_opacity_ramp() {
        let vignette = Vignette::new(0.5);
        assert_eq!(vignette.opacity_at(0.0, 10.0), 0.0);
        assert_eq!(vignette.opacity_at(5.0, 10.0), 0.25);
        assert_eq!(vignette.opacity_at(10.0, 10.0), 0.5);
        assert_eq!(vignette.opacity_at(40.0, 10.0), 0.5);
    }

    #[test]
    fn test_center_untouched_corners_darkened() {
        // Odd dimensions put a pixel center exactly on the gradient center
        let mut buffer = PixelBuffer::new_filled(33, 21, [200, 200, 200, 255]).unwrap();
        Vignette::new(0.5).apply(&mut buffer, &mut EffectContext::with_seed(0));

        assert_eq!(buffer.get_pixel(16, 10), [200, 200, 200, 255]);
        // Corner lies beyond the radius: full 0.5 opacity
        assert_eq!(buffer.get_pixel(0, 0), [100, 100, 100, 255]);
        assert_eq!(buffer.get_pixel(32, 20), [100, 100, 100, 255]);
    }

    #[test]
    fn test_darkening_increases_outward() {
        let mut buffer = PixelBuffer::new_filled(41, 41, [255, 255, 255, 255]).unwrap();
        Vignette::new(0.8).apply(&mut buffer, &mut EffectContext::with_seed(0));

        let row: Vec<u8> = (20..41).map(|x| buffer.get_pixel(x, 20)[0]).collect();
        assert!(row.windows(2).all(|pair| pair[0] >= pair[1]));
        assert!(row[0] > row[row.len() - 1]);
    }

    #[test]
    fn test_zero_intensity_is_identity() {
        let original = PixelBuffer::new_filled(7, 5, [1, 2, 3, 4]).unwrap();
        let mut buffer = original.clone();
        Vignette::new(0.0).apply(&mut buffer, &mut EffectContext::with_seed(0));
        assert_eq!(buffer, original);
    }
}
