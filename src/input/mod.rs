//! Input module - pointer gestures, angle control and calibration

mod angle;
mod calibration;
mod controller;

pub use angle::{
    direction_degrees, gradient_angle, luminance, normalize_degrees, whole_degrees,
    AngleController, AngleHistory, AngleMode,
};
pub use calibration::{Calibration, CalibrationGesture};
pub use controller::{PaintController, PointerButton, PointerOutput};

use serde::{Deserialize, Serialize};

use crate::brush::Vec2;

/// Stage of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Press,
    Move,
    Release,
}

/// Raw pointer event from the canvas view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// X coordinate in canvas space
    pub x: f32,
    /// Y coordinate in canvas space (grows downwards)
    pub y: f32,
    pub phase: PointerPhase,
    /// Button held; only consulted on press
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32, phase: PointerPhase, button: PointerButton) -> Self {
        Self {
            x,
            y,
            phase,
            button,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
