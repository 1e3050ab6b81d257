//! Stroke geometry generators
//!
//! Pure functions: position and brush dimensions in, primitives out. Angles
//! are in degrees; canvas y grows downwards.

use std::f32::consts::PI;

use super::{Primitive, PrimitiveKind, Vec2};

/// Star core disk radius as a fraction of brush size
const STAR_CORE_RATIO: f32 = 0.02;
/// Half-width of a star spike base as a fraction of brush size
const STAR_SPIKE_BASE_RATIO: f32 = 0.04;

/// Single point rasterized with diameter `size`
pub fn point(pos: Vec2, size: f32, color: [f32; 4]) -> Primitive {
    Primitive {
        kind: PrimitiveKind::Points,
        vertices: vec![pos],
        color,
        point_size: Some(size),
    }
}

/// Rectangle of `length x thickness` centred at `pos`, rotated by `angle`.
///
/// Brush angles are measured counter-clockwise on screen, so the rotation
/// applied is `360 - angle`. Vertices are in triangle-strip order.
pub fn oriented_rect(pos: Vec2, length: f32, thickness: f32, angle: f32, color: [f32; 4]) -> Primitive {
    let theta = (360.0 - angle).to_radians();
    let (sin, cos) = theta.sin_cos();
    let half_len = length * 0.5;
    let half_thick = thickness * 0.5;

    let along_x = half_len * cos;
    let along_y = half_len * sin;
    let across_x = half_thick * sin;
    let across_y = half_thick * cos;

    let v1 = Vec2::new(pos.x - along_x + across_x, pos.y + along_y + across_y);
    let v2 = Vec2::new(pos.x - along_x - across_x, pos.y + along_y - across_y);
    let v3 = Vec2::new(pos.x + along_x - across_x, pos.y - along_y - across_y);
    let v4 = Vec2::new(pos.x + along_x + across_x, pos.y - along_y + across_y);

    Primitive {
        kind: PrimitiveKind::TriangleStrip,
        vertices: vec![v1, v2, v4, v3],
        color,
        point_size: None,
    }
}

/// Triangle fan approximating a disk: centre plus `segments + 1` rim
/// vertices (the first rim vertex is repeated to close the fan).
pub fn disk(center: Vec2, radius: f32, segments: u32, color: [f32; 4]) -> Primitive {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(segments as usize + 2);
    vertices.push(center);
    for i in 0..=segments {
        let t = i as f32 * 2.0 * PI / segments as f32;
        vertices.push(center.offset(radius * t.cos(), radius * t.sin()));
    }
    Primitive {
        kind: PrimitiveKind::TriangleFan,
        vertices,
        color,
        point_size: None,
    }
}

/// Open five-vertex "W" zigzag scaled to `size`
pub fn zigzag(pos: Vec2, size: f32, color: [f32; 4]) -> Primitive {
    let half = size * 0.5;
    let quarter = size * 0.25;
    Primitive {
        kind: PrimitiveKind::Polyline,
        vertices: vec![
            pos.offset(-half, -half),
            pos.offset(-quarter, half),
            pos,
            pos.offset(quarter, half),
            pos.offset(half, -half),
        ],
        color,
        point_size: None,
    }
}

/// Straight segment between two points
pub fn segment(from: Vec2, to: Vec2, color: [f32; 4]) -> Primitive {
    Primitive {
        kind: PrimitiveKind::Lines,
        vertices: vec![from, to],
        color,
        point_size: None,
    }
}

/// Lens-flare star: a small core disk plus thin spikes of length `size / 2`.
///
/// Spikes sit at `spikes` evenly spaced directions offset by half a step;
/// the sweep is inclusive, so the first direction is drawn twice
/// (`spikes + 1` triangles) and the highlight along it is brighter.
pub fn star(pos: Vec2, size: f32, core_segments: u32, spikes: u32, color: [f32; 4]) -> Vec<Primitive> {
    let spikes = spikes.max(1);
    let mut prims = Vec::with_capacity(spikes as usize + 2);
    prims.push(disk(pos, size * STAR_CORE_RATIO, core_segments, color));

    let base = size * STAR_SPIKE_BASE_RATIO;
    let length = size * 0.5;
    let step = 2.0 * PI / spikes as f32;
    let mut vertices = Vec::with_capacity((spikes as usize + 1) * 3);
    for i in 0..=spikes {
        let alpha = i as f32 * step + step * 0.5;
        let (sin, cos) = alpha.sin_cos();
        vertices.push(pos.offset(-length * cos, -length * sin));
        vertices.push(pos.offset(base * sin, -base * cos));
        vertices.push(pos.offset(-base * sin, base * cos));
    }
    prims.push(Primitive {
        kind: PrimitiveKind::Triangles,
        vertices,
        color,
        point_size: None,
    });
    prims
}
