//! Brush angle control - direct, image-gradient and cursor-direction policies

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::brush::{Brush, ColorSource, Vec2};

/// How to control the angle of the brush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AngleMode {
    /// Keep whatever angle the brush already has
    #[default]
    Direct,
    /// Orient strokes along local edges of the color image
    Gradient,
    /// Follow the smoothed direction of pointer movement
    CursorMovement,
}

/// Wrap degrees into `[0, 360)`
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Round to whole degrees in `[0, 360)`
pub fn whole_degrees(degrees: f32) -> u32 {
    (degrees.round() as i64).rem_euclid(360) as u32
}

/// Direction of travel from `from` to `to` in degrees, `[0, 360)`
pub fn direction_degrees(from: Vec2, to: Vec2) -> f32 {
    normalize_degrees((to.y - from.y).atan2(to.x - from.x).to_degrees())
}

/// Luma weights used for gradient estimation
pub fn luminance(rgba: [f32; 4]) -> f32 {
    rgba[0] * 0.299 + rgba[1] * 0.578 + rgba[2] * 0.114
}

/// Stroke angle perpendicular to the luminance gradient at `pos`.
///
/// Samples the 3x3 neighbourhood through `color` and applies a Sobel pair;
/// the result is `90 - atan2(gy, gx)` in degrees, wrapped into `[0, 360)`.
/// `gy` is positive when the row above is brighter.
pub fn gradient_angle(color: &ColorSource<'_>, pos: Vec2) -> f32 {
    let lum = |dx: f32, dy: f32| luminance(color.resolve(pos.offset(dx, dy)));

    let (tl, t, tr) = (lum(-1.0, -1.0), lum(0.0, -1.0), lum(1.0, -1.0));
    let (l, r) = (lum(-1.0, 0.0), lum(1.0, 0.0));
    let (bl, b, br) = (lum(-1.0, 1.0), lum(0.0, 1.0), lum(1.0, 1.0));

    let gx = -tl + tr - 2.0 * l + 2.0 * r - bl + br;
    let gy = tl + 2.0 * t + tr - bl - 2.0 * b - br;

    normalize_degrees(90.0 - gy.atan2(gx).to_degrees())
}

/// Bounded FIFO of recent raw cursor angles (degrees)
#[derive(Debug, Clone)]
pub struct AngleHistory {
    capacity: usize,
    values: VecDeque<f32>,
}

impl AngleHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    /// Add an angle, evicting the oldest once full
    pub fn push(&mut self, degrees: f32) {
        if self.values.len() >= self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(degrees);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Circular mean of `latest` together with the stored angles.
    ///
    /// Averages unit vectors rather than raw degrees so that 350 and 10
    /// average to 0, not 180.
    pub fn circular_mean_with(&self, latest: f32) -> f32 {
        let (sin, cos) = self
            .values
            .iter()
            .chain(std::iter::once(&latest))
            .fold((0.0f32, 0.0f32), |(s, c), deg| {
                let (ds, dc) = deg.to_radians().sin_cos();
                (s + ds, c + dc)
            });
        normalize_degrees(sin.atan2(cos).to_degrees())
    }
}

impl Default for AngleHistory {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Updates a brush's angle during a gesture according to an [`AngleMode`]
#[derive(Debug, Clone)]
pub struct AngleController {
    mode: AngleMode,
    history: AngleHistory,
    last_pos: Option<Vec2>,
}

impl AngleController {
    pub fn new(mode: AngleMode, smoothing_window: usize) -> Self {
        Self {
            mode,
            history: AngleHistory::new(smoothing_window),
            last_pos: None,
        }
    }

    pub fn mode(&self) -> AngleMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AngleMode) {
        self.mode = mode;
    }

    pub fn history(&self) -> &AngleHistory {
        &self.history
    }

    /// Reset per-gesture state and apply the policy at the press point.
    ///
    /// In cursor mode the brush's current angle seeds the history so the
    /// first step is blended with it.
    pub fn begin(&mut self, brush: &mut Brush<'_>, pos: Vec2) {
        self.history.clear();
        self.last_pos = Some(pos);
        match self.mode {
            AngleMode::Direct => {}
            AngleMode::Gradient => self.apply_gradient(brush, pos),
            AngleMode::CursorMovement => self.history.push(brush.params().angle as f32),
        }
    }

    /// Apply the policy for a pointer move
    pub fn update(&mut self, brush: &mut Brush<'_>, pos: Vec2) {
        match self.mode {
            AngleMode::Direct => {}
            AngleMode::Gradient => self.apply_gradient(brush, pos),
            AngleMode::CursorMovement => self.apply_cursor(brush, pos),
        }
    }

    fn apply_gradient(&self, brush: &mut Brush<'_>, pos: Vec2) {
        let angle = gradient_angle(brush.color_source(), pos);
        brush.set_angle(whole_degrees(angle));
    }

    fn apply_cursor(&mut self, brush: &mut Brush<'_>, pos: Vec2) {
        let Some(last) = self.last_pos else {
            self.last_pos = Some(pos);
            return;
        };
        if last == pos {
            return;
        }

        let raw = direction_degrees(last, pos);
        let smoothed = self.history.circular_mean_with(raw);
        self.history.push(raw);
        self.last_pos = Some(pos);

        tracing::trace!("cursor angle raw={:.1} smoothed={:.1}", raw, smoothed);
        brush.set_angle(whole_degrees(smoothed));
    }
}

impl Default for AngleController {
    fn default() -> Self {
        Self::new(AngleMode::Direct, 5)
    }
}
