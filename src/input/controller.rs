//! Pointer controller - routes press/move/release events to brushes, angle
//! control and the calibration gesture

use serde::{Deserialize, Serialize};

use super::angle::{AngleController, AngleMode};
use super::calibration::{Calibration, CalibrationGesture};
use super::{PointerEvent, PointerPhase};
use crate::brush::{point, Brush, BrushEngine, BrushKind, ColorMode, Primitive, Vec2};
use crate::core::config::EngineConfig;
use crate::raster::PixelBuffer;

const INDICATOR_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
const MARKER_SIZE: f32 = 4.0;

/// Pointer button driving a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    /// Paints with the active brush
    Primary,
    /// Calibrates brush size and angle
    Secondary,
}

/// Geometry produced by one pointer event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerOutput {
    /// Primitives for the painting canvas
    pub canvas: Vec<Primitive>,
    /// Primitives for the canvas overlay layer
    pub overlay: Vec<Primitive>,
    /// Overlay must be cleared before drawing `overlay`
    pub clear_overlay: bool,
    /// Cursor marker for the reference view
    pub marker: Option<Primitive>,
    /// Calibration applied to the active brush on release
    pub calibration: Option<Calibration>,
}

/// Orchestrates a gesture across the brush engine, the angle policy and the
/// calibration drag. Events must arrive as press, moves, release.
#[derive(Debug, Clone)]
pub struct PaintController<'img> {
    brushes: BrushEngine<'img>,
    angle: AngleController,
    calibration: CalibrationGesture,
    indicator: Brush<'img>,
    reference: Option<&'img PixelBuffer>,
    button: Option<PointerButton>,
}

impl<'img> PaintController<'img> {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        let mut indicator = Brush::with_config(BrushKind::LineSegment, config);
        indicator.set_color(INDICATOR_COLOR);
        Self {
            brushes: BrushEngine::with_config(config),
            angle: AngleController::new(AngleMode::Direct, config.angle_smoothing_window),
            calibration: CalibrationGesture::new(),
            indicator,
            reference: None,
            button: None,
        }
    }

    pub fn brushes(&self) -> &BrushEngine<'img> {
        &self.brushes
    }

    pub fn brushes_mut(&mut self) -> &mut BrushEngine<'img> {
        &mut self.brushes
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle.mode()
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle.set_mode(mode);
    }

    /// Bind the reference image painted strokes sample from
    pub fn set_reference(&mut self, reference: Option<&'img PixelBuffer>) {
        self.reference = reference;
    }

    /// Whether a gesture is in progress
    pub fn is_pressed(&self) -> bool {
        self.button.is_some()
    }

    /// Dispatch a raw event to `press`, `moved` or `released`
    pub fn handle(&mut self, event: PointerEvent) -> PointerOutput {
        let pos = event.position();
        match event.phase {
            PointerPhase::Press => self.press(event.button, pos),
            PointerPhase::Move => self.moved(pos),
            PointerPhase::Release => self.released(pos),
        }
    }

    pub fn press(&mut self, button: PointerButton, pos: Vec2) -> PointerOutput {
        if let Some(current) = self.button {
            tracing::warn!("{:?} press during {:?} gesture ignored", button, current);
            return PointerOutput::default();
        }
        self.button = Some(button);

        let mut out = PointerOutput::default();
        match button {
            PointerButton::Primary => out.canvas = self.begin_stroke(pos),
            PointerButton::Secondary => {
                self.calibration.begin(pos);
                out.overlay = self.indicator.stroke_begin(pos);
            }
        }
        out
    }

    pub fn moved(&mut self, pos: Vec2) -> PointerOutput {
        let mut out = PointerOutput {
            marker: Some(point(pos, MARKER_SIZE, [1.0, 0.0, 0.0, 1.0])),
            ..Default::default()
        };
        match self.button {
            Some(PointerButton::Primary) => {
                let brush = self.brushes.active_mut();
                if brush.is_active() {
                    out.canvas = brush.stroke_move(pos);
                    self.angle.update(brush, pos);
                } else {
                    // Selection changed mid-gesture: continue on the new brush
                    tracing::debug!("Restarting stroke on {}", brush.name());
                    out.canvas = self.begin_stroke(pos);
                }
            }
            Some(PointerButton::Secondary) => {
                out.clear_overlay = true;
                out.overlay = self.indicator.stroke_move(pos);
            }
            None => {}
        }
        out
    }

    /// Start the active brush's stroke. The brush paints with its current
    /// angle; the angle policy then adjusts it for the next event.
    fn begin_stroke(&mut self, pos: Vec2) -> Vec<Primitive> {
        let brush = self.brushes.active_mut();
        if let Some(reference) = self.reference {
            brush.set_color_mode(ColorMode::Sample);
            brush.set_color_image(Some(reference));
        }
        let canvas = brush.stroke_begin(pos);
        self.angle.begin(brush, pos);
        canvas
    }

    pub fn released(&mut self, pos: Vec2) -> PointerOutput {
        let mut out = PointerOutput::default();
        match self.button.take() {
            Some(PointerButton::Primary) => {
                out.canvas = self.brushes.active_mut().stroke_end(pos);
            }
            Some(PointerButton::Secondary) => {
                self.indicator.stroke_end(pos);
                out.clear_overlay = true;
                out.calibration = self.calibration.end(pos);
                if let Some(calibration) = out.calibration {
                    let brush = self.brushes.active_mut();
                    calibration.apply(brush);
                    tracing::debug!(
                        "Calibrated {}: size={} angle={}",
                        brush.name(),
                        brush.params().size,
                        brush.params().angle
                    );
                }
            }
            None => tracing::warn!("Release without press ignored"),
        }
        out
    }
}

impl Default for PaintController<'_> {
    fn default() -> Self {
        Self::new()
    }
}
