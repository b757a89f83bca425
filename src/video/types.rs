use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EffectError, Result};

/// Bytes per RGBA pixel
pub const CHANNELS: usize = 4;

/// A single video frame as a row-major RGBA grid
///
/// Width and height are always non-zero; every constructor enforces it, so
/// effects can treat the buffer as well-formed.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    buffer: RgbaImage,
}

impl PixelBuffer {
    /// Create a transparent black buffer
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        Ok(Self {
            buffer: ImageBuffer::new(width, height),
        })
    }

    /// Create a buffer filled with the given RGBA color
    pub fn new_filled(width: u32, height: u32, color: [u8; 4]) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        Ok(Self {
            buffer: ImageBuffer::from_pixel(width, height, Rgba(color)),
        })
    }

    /// Wrap raw RGBA bytes; the length must be exactly `width * height * 4`
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(EffectError::InvalidBuffer {
                details: format!("expected {} bytes for {}x{}, got {}", expected, width, height, data.len()),
            }
            .into());
        }

        ImageBuffer::from_raw(width, height, data)
            .map(|buffer| Self { buffer })
            .ok_or_else(|| {
                EffectError::InvalidBuffer {
                    details: "raw data does not match dimensions".to_string(),
                }
                .into()
            })
    }

    /// Convert any decoded image into an RGBA buffer
    pub fn from_image(image: DynamicImage) -> Result<Self> {
        let buffer = image.to_rgba8();
        Self::check_dimensions(buffer.width(), buffer.height())?;
        Ok(Self { buffer })
    }

    /// Decode an image file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_image(image::open(path)?)
    }

    fn check_dimensions(width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(EffectError::InvalidBuffer {
                details: format!("zero-sized buffer {}x{}", width, height),
            }
            .into());
        }
        Ok(())
    }

    /// Get the width of the buffer
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Get the height of the buffer
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width() as usize * CHANNELS
    }

    /// Get a pixel at the given coordinates
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.buffer.get_pixel(x, y).0
    }

    /// Get a mutable reference to a pixel at the given coordinates
    pub fn get_pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        &mut self.buffer.get_pixel_mut(x, y).0
    }

    /// Set a pixel at the given coordinates
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        self.buffer.put_pixel(x, y, Rgba(color));
    }

    /// Raw RGBA samples, row-major
    pub fn samples(&self) -> &[u8] {
        &self.buffer
    }

    /// Mutable raw RGBA samples, row-major
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Consume the buffer and return the raw RGBA bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.buffer.into_raw()
    }

    /// Save the buffer as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.buffer
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Encoder parameters carried through to the external encoder untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderSettings {
    /// Output frame width
    pub width: u32,

    /// Output frame height
    pub height: u32,

    /// Frames per second
    pub fps: u32,

    /// Target bitrate in bits per second
    pub bitrate: u64,

    /// Container format (webm, mp4, ...)
    pub format: String,

    /// Video codec identifier
    pub codec: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
            bitrate: 5_000_000,
            format: "webm".to_string(),
            codec: "vp9".to_string(),
        }
    }
}

impl EncoderSettings {
    /// Frames needed to cover `duration` seconds
    pub fn frame_count(&self, duration: f64) -> usize {
        (duration.max(0.0) * self.fps as f64).round() as usize
    }

    /// Allocate a black, opaque frame at the configured resolution
    pub fn blank_frame(&self) -> Result<PixelBuffer> {
        PixelBuffer::new_filled(self.width, self.height, [0, 0, 0, 255])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(PixelBuffer::new(0, 10).is_err());
        assert!(PixelBuffer::new_filled(10, 0, [0, 0, 0, 255]).is_err());
        assert!(PixelBuffer::from_raw(0, 0, vec![]).is_err());
    }

    #[test]
    fn test_from_raw_length_mismatch() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(err.is_invalid_input());

        let buffer = PixelBuffer::from_raw(2, 2, vec![7; 16]).unwrap();
        assert_eq!(buffer.get_pixel(1, 1), [7, 7, 7, 7]);
    }

    #[test]
    fn test_pixel_access() {
        let mut buffer = PixelBuffer::new_filled(3, 2, [10, 20, 30, 255]).unwrap();
        buffer.set_pixel(2, 1, [1, 2, 3, 4]);
        assert_eq!(buffer.get_pixel(2, 1), [1, 2, 3, 4]);
        assert_eq!(buffer.stride(), 12);
        // Row-major: last pixel is the last four bytes
        assert_eq!(&buffer.samples()[20..24], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let buffer = PixelBuffer::new_filled(4, 3, [200, 100, 50, 255]).unwrap();
        buffer.save_png(&path).unwrap();

        let loaded = PixelBuffer::open(&path).unwrap();
        assert_eq!(loaded, buffer);
    }

    #[test]
    fn test_encoder_defaults() {
        let settings = EncoderSettings::default();
        assert_eq!((settings.width, settings.height), (1280, 720));
        assert_eq!(settings.frame_count(2.0), 60);
        assert_eq!(settings.blank_frame().unwrap().width(), 1280);
    }
}
