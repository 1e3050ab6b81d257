//! Filter commands - raw RGBA byte interface for external dialogs
//!
//! Each command validates the incoming buffer, runs the filter and returns a
//! freshly allocated buffer of the same dimensions. Errors are reported as
//! strings for the caller's message box.

use crate::core::config::EngineConfig;
use crate::core::errors::CoreError;
use crate::filter;
use crate::raster::{Kernel, PixelBuffer};

/// Largest accepted width or height
pub const MAX_DIMENSION: u32 = 16384;

fn wrap(src: &[u8], width: u32, height: u32) -> Result<PixelBuffer, CoreError> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(CoreError::InvalidDimensions { width, height });
    }
    PixelBuffer::from_raw(width, height, src.to_vec())
}

/// Convolve with a kernel entered row by row.
///
/// Weights are divided by `divisor` first (a divisor below 1e-7 counts as 1),
/// then by their sum when `normalize` is set.
pub fn convolve_kernel(
    src: &[u8],
    width: u32,
    height: u32,
    kernel: &[Vec<f32>],
    divisor: f32,
    offset: i32,
    normalize: bool,
) -> Result<Vec<u8>, String> {
    let source = wrap(src, width, height)?;
    let kernel = Kernel::from_rows(kernel)?.scaled(divisor);
    Ok(filter::convolve_kernel(&source, &kernel, offset, normalize).into_bytes())
}

/// Gaussian blur; `sigma` falls back to the configured default
pub fn gaussian_blur(
    src: &[u8],
    width: u32,
    height: u32,
    sigma: Option<f32>,
    config: &EngineConfig,
) -> Result<Vec<u8>, String> {
    let source = wrap(src, width, height)?;
    let sigma = sigma.unwrap_or(config.default_sigma);
    Ok(filter::gaussian_blur(&source, sigma)?.into_bytes())
}

pub fn bilateral_mean(
    src: &[u8],
    width: u32,
    height: u32,
    domain_half_width: u32,
    range: u32,
) -> Result<Vec<u8>, String> {
    let source = wrap(src, width, height)?;
    Ok(filter::bilateral_mean(&source, domain_half_width, range).into_bytes())
}

pub fn bilateral_gaussian(
    src: &[u8],
    width: u32,
    height: u32,
    sigma_space: f32,
    sigma_range: f32,
) -> Result<Vec<u8>, String> {
    let source = wrap(src, width, height)?;
    Ok(filter::bilateral_gaussian(&source, sigma_space, sigma_range)?.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, v: u8) -> Vec<u8> {
        (0..width * height).flat_map(|_| [v, v, v, 255]).collect()
    }

    #[test]
    fn test_gaussian_blur_black_4x4() {
        let src = gray(4, 4, 0);
        let out = gaussian_blur(&src, 4, 4, None, &EngineConfig::default()).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_convolve_identity_with_divisor() {
        let src: Vec<u8> = (0..3 * 3 * 4).map(|i| (i * 7) as u8).collect();
        let mut rows = vec![vec![0.0; 5]; 5];
        rows[2][2] = 4.0;
        let out = convolve_kernel(&src, 3, 3, &rows, 4.0, 0, false).unwrap();
        for (i, (a, b)) in out.iter().zip(&src).enumerate() {
            assert_eq!(a, b, "byte {}", i);
        }

        // Zero divisor is treated as 1
        rows[2][2] = 1.0;
        let out = convolve_kernel(&src, 3, 3, &rows, 0.0, 0, false).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_rejects_bad_buffers() {
        let err = bilateral_mean(&[0u8; 10], 2, 2, 1, 10).unwrap_err();
        assert!(err.contains("Buffer size mismatch"), "{}", err);

        let err = bilateral_mean(&[], 0, 2, 1, 10).unwrap_err();
        assert!(err.contains("Invalid dimensions"), "{}", err);

        let err = bilateral_mean(&[], MAX_DIMENSION + 1, 1, 1, 10).unwrap_err();
        assert!(err.contains("Invalid dimensions"), "{}", err);
    }

    #[test]
    fn test_rejects_bad_sigma_and_kernel() {
        let src = gray(2, 2, 128);
        assert!(gaussian_blur(&src, 2, 2, Some(0.0), &EngineConfig::default()).is_err());
        assert!(bilateral_gaussian(&src, 2, 2, 1.0, -1.0).is_err());

        let ragged = vec![vec![1.0; 3], vec![1.0; 2], vec![1.0; 3]];
        let err = convolve_kernel(&src, 2, 2, &ragged, 1.0, 0, false).unwrap_err();
        assert!(err.contains("Invalid kernel"), "{}", err);
    }

    #[test]
    fn test_bilateral_gaussian_flat() {
        let src = gray(5, 3, 90);
        let out = bilateral_gaussian(&src, 5, 3, 1.5, 20.0).unwrap();
        assert_eq!(out, src);
    }
}
