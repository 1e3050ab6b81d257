//! Edge-preserving bilateral filters
//!
//! Both filters compare neighbours to the centre pixel by squared Euclidean
//! RGB distance. The mean variant uses it as a hard cut-off, the Gaussian
//! variant as a soft falloff.

use std::time::Instant;

use super::gaussian::spatial_weights;
use super::{map_rgb, radius_for_sigma};
use crate::core::errors::{ensure_positive, CoreError};
use crate::raster::PixelBuffer;

/// Average the neighbours inside a `(2d+1)^2` window whose RGB distance to
/// the centre is at most `range` (compared as `dist^2 <= range^2`).
///
/// The centre always qualifies, so the mean is always defined.
pub fn bilateral_mean(source: &PixelBuffer, domain_half_width: u32, range: u32) -> PixelBuffer {
    let start = Instant::now();
    let half = domain_half_width as i64;
    let range_sq = range as u64 * range as u64;

    let dest = map_rgb(source, |x, y| {
        let center = source.get(x, y);
        let mut sum = [0u64; 3];
        let mut count = 0u64;
        for dy in -half..=half {
            for dx in -half..=half {
                let px = source.get(x + dx, y + dy);
                if center.rgb_distance_sq(&px) as u64 <= range_sq {
                    sum[0] += px.r as u64;
                    sum[1] += px.g as u64;
                    sum[2] += px.b as u64;
                    count += 1;
                }
            }
        }
        let count = count.max(1) as f32;
        sum.map(|v| v as f32 / count)
    });

    tracing::debug!(
        "bilateral_mean {}x{} domain={} range={} in {:?}",
        source.width(),
        source.height(),
        domain_half_width,
        range,
        start.elapsed()
    );

    dest
}

/// Joint spatial/range Gaussian filter.
///
/// Neighbour weight is `exp(-d^2 / 2 sigma_space^2) * exp(-c^2 / 2 sigma_range^2)`
/// where `d` is the pixel offset and `c` the RGB distance to the centre, over
/// a window of radius `round(3 * sigma_space)`.
pub fn bilateral_gaussian(
    source: &PixelBuffer,
    sigma_space: f32,
    sigma_range: f32,
) -> Result<PixelBuffer, CoreError> {
    let sigma_space = ensure_positive("sigma_space", sigma_space)?;
    let sigma_range = ensure_positive("sigma_range", sigma_range)?;
    let start = Instant::now();
    let radius = radius_for_sigma(sigma_space);
    let spatial = spatial_weights(sigma_space, radius);
    let two_range_sq = 2.0 * sigma_range * sigma_range;

    let dest = map_rgb(source, |x, y| {
        let center = source.get(x, y);
        let mut acc = [0.0f32; 3];
        let mut total = 0.0f32;
        let mut w = spatial.iter();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let spatial_weight = w.next().copied().unwrap_or(0.0);
                let px = source.get(x + dx, y + dy);
                let color_dist_sq = center.rgb_distance_sq(&px) as f32;
                let weight = spatial_weight * (-color_dist_sq / two_range_sq).exp();
                acc[0] += px.r as f32 * weight;
                acc[1] += px.g as f32 * weight;
                acc[2] += px.b as f32 * weight;
                total += weight;
            }
        }
        // The centre contributes weight 1, so total is never zero
        acc.map(|v| v / total)
    });

    tracing::debug!(
        "bilateral_gaussian {}x{} sigma_space={} sigma_range={} in {:?}",
        source.width(),
        source.height(),
        sigma_space,
        sigma_range,
        start.elapsed()
    );

    Ok(dest)
}
