//! Per-point color resolution: a solid color or a sampled reference image

use serde::{Deserialize, Serialize};

use super::Vec2;
use crate::raster::PixelBuffer;

/// How to get the color to draw with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    #[default]
    Solid,
    Sample,
}

/// Color lookup for brush strokes.
///
/// The reference image is borrowed read-only; it must outlive the source
/// (enforced by `'img`). Unbinding it (`None`) falls back to the solid color.
#[derive(Debug, Clone)]
pub struct ColorSource<'img> {
    mode: ColorMode,
    solid: [f32; 3],
    reference: Option<&'img PixelBuffer>,
}

impl<'img> ColorSource<'img> {
    /// Solid black, no reference bound
    pub fn new() -> Self {
        Self {
            mode: ColorMode::Solid,
            solid: [0.0, 0.0, 0.0],
            reference: None,
        }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ColorMode) {
        self.mode = mode;
    }

    /// Set the solid color (RGB, 0.0-1.0)
    pub fn set_color(&mut self, rgb: [f32; 3]) {
        self.solid = rgb.map(|c| c.clamp(0.0, 1.0));
    }

    pub fn solid(&self) -> [f32; 3] {
        self.solid
    }

    /// Bind or unbind the image sampled in `Sample` mode
    pub fn set_image(&mut self, reference: Option<&'img PixelBuffer>) {
        self.reference = reference;
    }

    pub fn image(&self) -> Option<&'img PixelBuffer> {
        self.reference
    }

    /// Color at `pos` (RGBA, 0.0-1.0).
    ///
    /// Samples the nearest reference pixel (clamped to the image) including
    /// its alpha, or returns the solid color with alpha 1. Brush opacity is
    /// applied by the caller.
    pub fn resolve(&self, pos: Vec2) -> [f32; 4] {
        match (self.mode, self.reference) {
            (ColorMode::Sample, Some(image)) => image
                .get(pos.x.round() as i64, pos.y.round() as i64)
                .to_f32(),
            _ => {
                let [r, g, b] = self.solid;
                [r, g, b, 1.0]
            }
        }
    }
}

impl Default for ColorSource<'_> {
    fn default() -> Self {
        Self::new()
    }
}
