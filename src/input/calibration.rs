//! Size/angle calibration via a secondary-button drag

use super::angle::{normalize_degrees, whole_degrees};
use crate::brush::{Brush, Vec2};

/// Brush size and angle measured by a calibration drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Drag length in pixels
    pub size: f32,
    /// Drag direction in degrees, `[0, 360)`
    pub angle: f32,
}

impl Calibration {
    /// Measure the drag from `press` to `release`.
    ///
    /// The angle points from the release point back to the press point.
    pub fn measure(press: Vec2, release: Vec2) -> Self {
        let dx = press.x - release.x;
        let dy = press.y - release.y;
        Self {
            size: (dx * dx + dy * dy).sqrt(),
            angle: normalize_degrees(dy.atan2(dx).to_degrees()),
        }
    }

    /// Write size and angle into the brush (size is clamped by the brush)
    pub fn apply(&self, brush: &mut Brush<'_>) {
        brush.set_size(self.size.round() as u32);
        brush.set_angle(whole_degrees(self.angle));
    }
}

/// Tracks the press point of an in-progress calibration drag
#[derive(Debug, Clone, Default)]
pub struct CalibrationGesture {
    anchor: Option<Vec2>,
}

impl CalibrationGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, pos: Vec2) {
        self.anchor = Some(pos);
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Finish the drag; `None` if no drag was started
    pub fn end(&mut self, pos: Vec2) -> Option<Calibration> {
        self.anchor
            .take()
            .map(|anchor| Calibration::measure(anchor, pos))
    }
}
