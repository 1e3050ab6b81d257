//! Raster primitives - RGBA8 pixel buffers and convolution kernels

mod kernel;

pub use kernel::Kernel;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::core::errors::CoreError;

/// Bytes per RGBA8 pixel
pub const CHANNELS: usize = 4;

/// A single straight (non-premultiplied) RGBA8 pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channel by index (0 = R, 1 = G, 2 = B, 3 = A)
    #[inline]
    pub fn channel(&self, index: usize) -> u8 {
        match index {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            _ => self.a,
        }
    }

    /// Squared Euclidean distance over the RGB channels
    #[inline]
    pub fn rgb_distance_sq(&self, other: &Rgba8) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Normalized float color (0.0 - 1.0)
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Fixed-size, row-major RGBA8 raster.
///
/// All reads go through [`PixelBuffer::get`], which clamps coordinates to the
/// buffer extent (edge replication), so out-of-range reads never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zero-initialized buffer
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        let len = Self::byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            bytes: vec![0; len],
        })
    }

    /// Wrap existing RGBA8 bytes
    pub fn from_raw(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, CoreError> {
        let expected = Self::byte_len(width, height)?;
        if bytes.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    /// Buffer filled with a single color
    pub fn filled(width: u32, height: u32, color: Rgba8) -> Result<Self, CoreError> {
        let mut buffer = Self::new(width, height)?;
        for px in buffer.bytes.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Ok(buffer)
    }

    fn byte_len(width: u32, height: u32) -> Result<usize, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(width as usize * height as usize * CHANNELS)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Clamped sample: coordinates outside the extent read the nearest edge pixel
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Rgba8 {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        let idx = (y * self.width as usize + x) * CHANNELS;
        Rgba8::new(
            self.bytes[idx],
            self.bytes[idx + 1],
            self.bytes[idx + 2],
            self.bytes[idx + 3],
        )
    }

    /// Write a pixel. Out-of-range coordinates are ignored.
    pub fn put(&mut self, x: u32, y: u32, color: Rgba8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.bytes[idx..idx + CHANNELS].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    /// Mutable rows, for filters that fill a fresh output buffer
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = CoreError;

    fn try_from(img: RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, img.into_raw())
    }
}

impl TryFrom<PixelBuffer> for RgbaImage {
    type Error = CoreError;

    fn try_from(buffer: PixelBuffer) -> Result<Self, Self::Error> {
        let expected = buffer.bytes.len();
        RgbaImage::from_raw(buffer.width, buffer.height, buffer.bytes).ok_or(
            CoreError::BufferSize {
                expected,
                actual: expected,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_buffer(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                buffer.put(x, y, Rgba8::new((x * 10) as u8, (y * 10) as u8, 7, 255));
            }
        }
        buffer
    }

    #[test]
    fn test_new_is_zeroed() {
        let buffer = PixelBuffer::new(3, 2).unwrap();
        assert_eq!(buffer.as_bytes().len(), 3 * 2 * 4);
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            PixelBuffer::new(0, 5),
            Err(CoreError::InvalidDimensions { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_from_raw_size_mismatch() {
        let result = PixelBuffer::from_raw(2, 2, vec![0; 15]);
        assert!(matches!(
            result,
            Err(CoreError::BufferSize {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_clamped_sampling() {
        let buffer = gradient_buffer(4, 3);
        assert_eq!(buffer.get(-1, -1), buffer.get(0, 0));
        assert_eq!(buffer.get(4, 3), buffer.get(3, 2));
        assert_eq!(buffer.get(-50, 1), buffer.get(0, 1));
        assert_eq!(buffer.get(2, 99), buffer.get(2, 2));
        assert_eq!(buffer.get(2, 1), Rgba8::new(20, 10, 7, 255));
    }

    #[test]
    fn test_put_out_of_range_ignored() {
        let mut buffer = PixelBuffer::new(2, 2).unwrap();
        buffer.put(5, 0, Rgba8::new(1, 2, 3, 4));
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rgb_distance_ignores_alpha() {
        let a = Rgba8::new(10, 20, 30, 0);
        let b = Rgba8::new(13, 24, 30, 255);
        assert_eq!(a.rgb_distance_sq(&b), 9 + 16);
    }

    #[test]
    fn test_image_interop() {
        let buffer = gradient_buffer(5, 4);
        let img: RgbaImage = buffer.clone().try_into().unwrap();
        assert_eq!(img.dimensions(), (5, 4));
        assert_eq!(PixelBuffer::try_from(img).unwrap(), buffer);
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(matches!(
            PixelBuffer::try_from(RgbaImage::new(0, 3)),
            Err(CoreError::InvalidDimensions { width: 0, height: 3 })
        ));
        assert!(PixelBuffer::try_from(RgbaImage::new(0, 0)).is_err());
    }
}
