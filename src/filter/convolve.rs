//! Generic kernel convolution

use std::time::Instant;

use super::map_rgb;
use crate::raster::{Kernel, PixelBuffer};

/// Convolve the RGB channels of `source` with `kernel`, then add `offset`.
///
/// The neighbour at spatial offset `(dx, dy)` is weighted by
/// `kernel[cy - dy][cx + dx]`: kernel rows run bottom-to-top relative to the
/// image, so row 0 of the kernel weights the row *below* the pixel. Directional
/// kernels depend on this orientation.
///
/// With `normalize`, weights are divided by their sum first (skipped when the
/// sum is not positive, e.g. for edge detectors).
pub fn convolve_kernel(source: &PixelBuffer, kernel: &Kernel, offset: i32, normalize: bool) -> PixelBuffer {
    let start = Instant::now();
    let kernel = if normalize {
        kernel.normalized()
    } else {
        kernel.clone()
    };
    let (cy, cx) = kernel.center();
    let (cy, cx) = (cy as i64, cx as i64);

    let dest = map_rgb(source, |x, y| {
        let mut acc = [0.0f32; 3];
        for dy in -cy..=cy {
            let row = (cy - dy) as usize;
            for dx in -cx..=cx {
                let weight = kernel.get(row, (dx + cx) as usize);
                if weight == 0.0 {
                    continue;
                }
                let px = source.get(x + dx, y + dy);
                acc[0] += px.r as f32 * weight;
                acc[1] += px.g as f32 * weight;
                acc[2] += px.b as f32 * weight;
            }
        }
        acc.map(|v| v + offset as f32)
    });

    tracing::debug!(
        "convolve_kernel {}x{} kernel={}x{} offset={} normalize={} in {:?}",
        source.width(),
        source.height(),
        kernel.rows(),
        kernel.cols(),
        offset,
        normalize,
        start.elapsed()
    );

    dest
}
