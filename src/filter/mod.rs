//! Filter engine - convolution-style filters over RGBA8 buffers
//!
//! Every filter:
//! - reads the source through the clamped sampler (edge replication)
//! - writes a freshly allocated buffer of the same size
//! - filters RGB only and copies alpha verbatim
//! - rounds and clamps each channel to `[0, 255]`
//!
//! Output rows are computed in parallel; each pixel depends only on the
//! immutable source, so the result is independent of scheduling.

mod bilateral;
mod convolve;
mod gaussian;

pub use bilateral::{bilateral_gaussian, bilateral_mean};
pub use convolve::convolve_kernel;
pub use gaussian::{gaussian_blur, DEFAULT_SIGMA};

use rayon::prelude::*;

use crate::raster::{PixelBuffer, CHANNELS};

/// Spatial radius covering three standard deviations
fn radius_for_sigma(sigma: f32) -> i64 {
    (3.0 * sigma).round() as i64
}

#[inline]
fn to_byte(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Build an output buffer by evaluating `rgb_at(x, y)` for every pixel.
fn map_rgb<F>(source: &PixelBuffer, rgb_at: F) -> PixelBuffer
where
    F: Fn(i64, i64) -> [f32; 3] + Sync,
{
    let mut dest = source.clone();
    let stride = source.stride();
    let src = source.as_bytes();

    dest.bytes_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            for (x, px) in row_out.chunks_exact_mut(CHANNELS).enumerate() {
                let [r, g, b] = rgb_at(x as i64, y as i64);
                px[0] = to_byte(r);
                px[1] = to_byte(g);
                px[2] = to_byte(b);
                px[3] = src[y * stride + x * CHANNELS + 3];
            }
        });

    dest
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::raster::{PixelBuffer, Rgba8};

    /// Left half `left`, right half `right`, with a per-pixel alpha ramp
    pub fn two_tone(width: u32, height: u32, left: Rgba8, right: Rgba8) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                let base = if x < width / 2 { left } else { right };
                let alpha = ((x + y * width) * 13 % 256) as u8;
                buffer.put(x, y, Rgba8 { a: alpha, ..base });
            }
        }
        buffer
    }

    /// Deterministic pseudo-noise image
    pub fn noise(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                let v = x * 31 + y * 17;
                buffer.put(
                    x,
                    y,
                    Rgba8::new((v % 251) as u8, (v * 7 % 253) as u8, (v * 3 % 241) as u8, (v % 256) as u8),
                );
            }
        }
        buffer
    }

    pub fn assert_alpha_preserved(input: &PixelBuffer, output: &PixelBuffer) {
        assert_eq!(input.width(), output.width());
        assert_eq!(input.height(), output.height());
        for (a, b) in input
            .as_bytes()
            .chunks_exact(4)
            .zip(output.as_bytes().chunks_exact(4))
        {
            assert_eq!(a[3], b[3]);
        }
    }
}
