//! Brush engine module - turns pointer trajectories into colored geometry

mod color;
mod engine;
mod geometry;

pub use color::{ColorMode, ColorSource};
pub use engine::{Brush, BrushEngine, BrushParams, Tessellation};
pub use geometry::{disk, oriented_rect, point, segment, star, zigzag};

use serde::{Deserialize, Serialize};

/// A 2-D position in canvas pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// How the external rasterizer should assemble a primitive's vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveKind {
    /// Independent points, drawn with `point_size`
    Points,
    /// Vertex pairs forming line segments
    Lines,
    /// Fan around the first vertex
    TriangleFan,
    /// Strip of triangles sharing edges
    TriangleStrip,
    /// Independent vertex triples
    Triangles,
    /// Open connected polyline
    Polyline,
}

/// One drawable, uniformly colored piece of stroke geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub vertices: Vec<Vec2>,
    /// RGBA, 0.0 - 1.0, alpha already set from brush opacity
    pub color: [f32; 4],
    /// Rasterized point diameter for `Points`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_size: Option<f32>,
}

/// Available brush variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrushKind {
    Point,
    Line,
    Circle,
    ScatterPoint,
    ScatterLine,
    ScatterCircle,
    /// Fixed-proportion W-shaped polyline ("UW")
    FreeformPolyline,
    /// Lens-flare highlight: small disk with radiating spikes
    Star,
    /// Rubber-band segment from the press point to the pointer
    LineSegment,
}

impl BrushKind {
    pub const ALL: [BrushKind; 9] = [
        BrushKind::Point,
        BrushKind::Line,
        BrushKind::Circle,
        BrushKind::ScatterPoint,
        BrushKind::ScatterLine,
        BrushKind::ScatterCircle,
        BrushKind::FreeformPolyline,
        BrushKind::Star,
        BrushKind::LineSegment,
    ];

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point => "Points",
            Self::Line => "Lines",
            Self::Circle => "Circles",
            Self::ScatterPoint => "Scattered Points",
            Self::ScatterLine => "Scattered Lines",
            Self::ScatterCircle => "Scattered Circles",
            Self::FreeformPolyline => "UW",
            Self::Star => "Star",
            Self::LineSegment => "Line Segment",
        }
    }

    /// Whether each move event paints several jittered copies
    pub fn is_scatter(&self) -> bool {
        matches!(
            self,
            Self::ScatterPoint | Self::ScatterLine | Self::ScatterCircle
        )
    }
}
