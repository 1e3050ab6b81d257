//! Normalized 2-D Gaussian blur

use std::time::Instant;

use super::{map_rgb, radius_for_sigma};
use crate::core::errors::{ensure_positive, CoreError};
use crate::raster::PixelBuffer;

/// Sigma applied when the caller does not choose one
pub const DEFAULT_SIGMA: f32 = 1.0;

/// Spatial Gaussian weights for offsets in `[-radius, radius]^2`, row-major
pub(super) fn spatial_weights(sigma: f32, radius: i64) -> Vec<f32> {
    let two_sigma_sq = 2.0 * sigma * sigma;
    let side = (2 * radius + 1) as usize;
    let mut weights = Vec::with_capacity(side * side);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let dist_sq = (dx * dx + dy * dy) as f32;
            weights.push((-dist_sq / two_sigma_sq).exp());
        }
    }
    weights
}

/// Blur with a `(2r+1)^2` Gaussian window, `r = round(3 * sigma)`.
///
/// Each channel is the weighted sum divided by the total weight, so flat
/// regions keep their color exactly.
pub fn gaussian_blur(source: &PixelBuffer, sigma: f32) -> Result<PixelBuffer, CoreError> {
    let sigma = ensure_positive("sigma", sigma)?;
    let start = Instant::now();
    let radius = radius_for_sigma(sigma);
    let weights = spatial_weights(sigma, radius);
    let total: f32 = weights.iter().sum();

    let dest = map_rgb(source, |x, y| {
        let mut acc = [0.0f32; 3];
        let mut w = weights.iter();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let weight = w.next().copied().unwrap_or(0.0);
                let px = source.get(x + dx, y + dy);
                acc[0] += px.r as f32 * weight;
                acc[1] += px.g as f32 * weight;
                acc[2] += px.b as f32 * weight;
            }
        }
        acc.map(|v| v / total)
    });

    tracing::debug!(
        "gaussian_blur {}x{} sigma={} radius={} in {:?}",
        source.width(),
        source.height(),
        sigma,
        radius,
        start.elapsed()
    );

    Ok(dest)
}
