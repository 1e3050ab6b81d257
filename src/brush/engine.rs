//! Brush engine - stroke lifecycle and per-variant dispatch

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::color::{ColorMode, ColorSource};
use super::geometry::{disk, oriented_rect, point, segment, star, zigzag};
use super::{BrushKind, Primitive, Vec2};
use crate::core::config::EngineConfig;
use crate::raster::PixelBuffer;

/// Brush parameters, written by the parameter UI and read at stroke time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushParams {
    /// Stroke extent in pixels (1 - 100)
    pub size: u32,
    /// Opacity percentage (0 - 100)
    pub opacity: u32,
    /// Rotation in degrees (0 - 359)
    pub angle: u32,
    /// Line width for line variants (1 - 100)
    pub thickness: u32,
    /// Scatter spread for scatter variants (1 - 100)
    pub scatter_radius: u32,
    /// Copies per event for scatter variants (1 - 50)
    pub density: u32,
}

impl BrushParams {
    /// Defaults tuned per variant
    pub fn for_kind(kind: BrushKind) -> Self {
        let size = match kind {
            BrushKind::Line | BrushKind::ScatterLine => 24,
            BrushKind::ScatterPoint => 5,
            _ => 12,
        };
        Self {
            size,
            ..Self::default()
        }
    }

    /// Opacity as an alpha value (0.0 - 1.0)
    pub fn alpha(&self) -> f32 {
        self.opacity as f32 / 100.0
    }
}

impl Default for BrushParams {
    fn default() -> Self {
        Self {
            size: 12,
            opacity: 100,
            angle: 0,
            thickness: 2,
            scatter_radius: 20,
            density: 3,
        }
    }
}

/// Tessellation detail for round shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tessellation {
    pub circle_segments: u32,
    pub star_core_segments: u32,
    pub star_spikes: u32,
}

impl From<&EngineConfig> for Tessellation {
    fn from(config: &EngineConfig) -> Self {
        Self {
            circle_segments: config.circle_segments,
            star_core_segments: config.star_core_segments,
            star_spikes: config.star_spikes,
        }
    }
}

impl Default for Tessellation {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

/// Per-gesture state, alive between `stroke_begin` and `stroke_end`
#[derive(Debug, Clone, Copy, PartialEq)]
struct StrokeSession {
    anchor: Vec2,
    events: u32,
}

/// A brush instance of one variant.
///
/// Call sequence per gesture: `stroke_begin`, any number of `stroke_move`,
/// one `stroke_end`. Each call returns the primitives to rasterize.
#[derive(Debug, Clone)]
pub struct Brush<'img> {
    kind: BrushKind,
    params: BrushParams,
    color: ColorSource<'img>,
    tessellation: Tessellation,
    rng: StdRng,
    session: Option<StrokeSession>,
}

impl<'img> Brush<'img> {
    /// Create a brush with default parameters for `kind`
    pub fn new(kind: BrushKind) -> Self {
        Self::with_config(kind, &EngineConfig::default())
    }

    /// Create with tessellation and scatter seed taken from `config`
    pub fn with_config(kind: BrushKind, config: &EngineConfig) -> Self {
        let rng = match config.scatter_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            kind,
            params: BrushParams::for_kind(kind),
            color: ColorSource::new(),
            tessellation: Tessellation::from(config),
            rng,
            session: None,
        }
    }

    pub fn kind(&self) -> BrushKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn params(&self) -> &BrushParams {
        &self.params
    }

    pub fn color_source(&self) -> &ColorSource<'img> {
        &self.color
    }

    /// Whether a gesture is in progress
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn set_size(&mut self, size: u32) {
        self.params.size = size.clamp(1, 100);
    }

    pub fn set_opacity(&mut self, opacity: u32) {
        self.params.opacity = opacity.min(100);
    }

    pub fn set_angle(&mut self, angle: u32) {
        self.params.angle = angle % 360;
    }

    pub fn set_thickness(&mut self, thickness: u32) {
        self.params.thickness = thickness.clamp(1, 100);
    }

    pub fn set_scatter_radius(&mut self, radius: u32) {
        self.params.scatter_radius = radius.clamp(1, 100);
    }

    pub fn set_density(&mut self, density: u32) {
        self.params.density = density.clamp(1, 50);
    }

    /// Set the solid color (RGB, 0.0-1.0)
    pub fn set_color(&mut self, rgb: [f32; 3]) {
        self.color.set_color(rgb);
    }

    /// Bind (or unbind with `None`) the reference image for `Sample` mode
    pub fn set_color_image(&mut self, image: Option<&'img PixelBuffer>) {
        self.color.set_image(image);
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color.set_mode(mode);
    }

    /// Restart the scatter generator from a fixed seed
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Color at `pos` with alpha replaced by the brush opacity
    pub fn color_at(&self, pos: Vec2) -> [f32; 4] {
        let [r, g, b, _] = self.color.resolve(pos);
        [r, g, b, self.params.alpha()]
    }

    /// Start a gesture. Paints at `pos`, except for `LineSegment`, which
    /// only records the anchor.
    pub fn stroke_begin(&mut self, pos: Vec2) -> Vec<Primitive> {
        tracing::trace!("{} stroke begin at ({}, {})", self.name(), pos.x, pos.y);
        self.session = Some(StrokeSession {
            anchor: pos,
            events: 0,
        });
        match self.kind {
            BrushKind::LineSegment => Vec::new(),
            _ => self.stroke_move(pos),
        }
    }

    /// Continue a gesture at `pos`
    pub fn stroke_move(&mut self, pos: Vec2) -> Vec<Primitive> {
        if let Some(session) = self.session.as_mut() {
            session.events += 1;
        }
        self.paint(pos)
    }

    /// Finish the gesture. Draws nothing.
    pub fn stroke_end(&mut self, pos: Vec2) -> Vec<Primitive> {
        if let Some(session) = self.session.take() {
            tracing::trace!(
                "{} stroke end at ({}, {}) after {} events",
                self.name(),
                pos.x,
                pos.y,
                session.events
            );
        }
        Vec::new()
    }

    fn paint(&mut self, pos: Vec2) -> Vec<Primitive> {
        let size = self.params.size as f32;
        let thickness = self.params.thickness as f32;
        let angle = self.params.angle as f32;
        let tess = self.tessellation;

        match self.kind {
            BrushKind::Point => vec![point(pos, size, self.color_at(pos))],
            BrushKind::Line => {
                vec![oriented_rect(pos, size, thickness, angle, self.color_at(pos))]
            }
            BrushKind::Circle => {
                vec![disk(pos, size * 0.5, tess.circle_segments, self.color_at(pos))]
            }
            BrushKind::ScatterPoint => self.scatter(pos, |at, color| point(at, size, color)),
            BrushKind::ScatterLine => self.scatter(pos, |at, color| {
                oriented_rect(at, size, thickness, angle, color)
            }),
            BrushKind::ScatterCircle => self.scatter(pos, |at, color| {
                disk(at, size * 0.5, tess.circle_segments, color)
            }),
            BrushKind::FreeformPolyline => vec![zigzag(pos, size, self.color_at(pos))],
            BrushKind::Star => star(
                pos,
                size,
                tess.star_core_segments,
                tess.star_spikes,
                self.color_at(pos),
            ),
            BrushKind::LineSegment => match self.session {
                Some(session) => vec![segment(session.anchor, pos, self.color_at(pos))],
                None => {
                    tracing::trace!("line segment move without anchor ignored");
                    Vec::new()
                }
            },
        }
    }

    /// `density` copies of a shape, each jittered independently and colored
    /// at its own position
    fn scatter<F>(&mut self, pos: Vec2, shape: F) -> Vec<Primitive>
    where
        F: Fn(Vec2, [f32; 4]) -> Primitive,
    {
        (0..self.params.density)
            .map(|_| {
                let at = self.jitter(pos);
                shape(at, self.color_at(at))
            })
            .collect()
    }

    /// Uniform offset in `[-0.5, 0.5] * (scatter_radius / 2)` per axis
    fn jitter(&mut self, pos: Vec2) -> Vec2 {
        let spread = self.params.scatter_radius as f32 * 0.5;
        let dx = spread * (self.rng.gen::<f32>() - 0.5);
        let dy = spread * (self.rng.gen::<f32>() - 0.5);
        pos.offset(dx, dy)
    }
}

/// All brush variants with one selected as active
#[derive(Debug, Clone)]
pub struct BrushEngine<'img> {
    brushes: Vec<Brush<'img>>,
    active: BrushKind,
}

impl<'img> BrushEngine<'img> {
    /// Create a brush engine with default settings
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Create with custom settings
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            brushes: BrushKind::ALL
                .iter()
                .map(|&kind| Brush::with_config(kind, config))
                .collect(),
            active: BrushKind::Point,
        }
    }

    pub fn active_kind(&self) -> BrushKind {
        self.active
    }

    /// Switch the active brush; an unfinished gesture on the old brush is ended
    pub fn select(&mut self, kind: BrushKind) {
        if kind == self.active {
            return;
        }
        let current = self.active_mut();
        if current.is_active() {
            current.stroke_end(Vec2::default());
        }
        tracing::debug!("Active brush: {}", kind.name());
        self.active = kind;
    }

    pub fn brush(&self, kind: BrushKind) -> &Brush<'img> {
        &self.brushes[Self::index(kind)]
    }

    pub fn brush_mut(&mut self, kind: BrushKind) -> &mut Brush<'img> {
        &mut self.brushes[Self::index(kind)]
    }

    pub fn active(&self) -> &Brush<'img> {
        self.brush(self.active)
    }

    pub fn active_mut(&mut self) -> &mut Brush<'img> {
        self.brush_mut(self.active)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brush<'img>> {
        self.brushes.iter()
    }

    fn index(kind: BrushKind) -> usize {
        BrushKind::ALL
            .iter()
            .position(|&k| k == kind)
            .unwrap_or_default()
    }
}

impl Default for BrushEngine<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::PrimitiveKind;
    use crate::raster::Rgba8;

    fn seeded<'a>(kind: BrushKind, seed: u64) -> Brush<'a> {
        let config = EngineConfig {
            scatter_seed: Some(seed),
            ..Default::default()
        };
        Brush::with_config(kind, &config)
    }

    fn checkerboard() -> PixelBuffer {
        let mut image = PixelBuffer::new(8, 8).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                image.put(x, y, Rgba8::new(v, 255 - v, 0, 255));
            }
        }
        image
    }

    #[test]
    fn test_defaults_per_kind() {
        assert_eq!(Brush::new(BrushKind::Line).params().size, 24);
        assert_eq!(Brush::new(BrushKind::ScatterPoint).params().size, 5);
        let circle = Brush::new(BrushKind::Circle);
        assert_eq!(circle.params().size, 12);
        assert_eq!(circle.params().opacity, 100);
        assert_eq!(circle.params().density, 3);
    }

    #[test]
    fn test_setters_clamp() {
        let mut brush = Brush::new(BrushKind::Point);
        brush.set_size(0);
        assert_eq!(brush.params().size, 1);
        brush.set_size(500);
        assert_eq!(brush.params().size, 100);
        brush.set_opacity(150);
        assert_eq!(brush.params().opacity, 100);
        brush.set_angle(370);
        assert_eq!(brush.params().angle, 10);
        brush.set_density(0);
        assert_eq!(brush.params().density, 1);
        brush.set_density(99);
        assert_eq!(brush.params().density, 50);
        brush.set_thickness(0);
        assert_eq!(brush.params().thickness, 1);
        brush.set_scatter_radius(1000);
        assert_eq!(brush.params().scatter_radius, 100);
    }

    #[test]
    fn test_opacity_overrides_alpha() {
        let image = PixelBuffer::filled(2, 2, Rgba8::new(255, 0, 0, 10)).unwrap();
        let mut brush = Brush::new(BrushKind::Point);
        brush.set_color_mode(ColorMode::Sample);
        brush.set_color_image(Some(&image));
        brush.set_opacity(40);

        let prims = brush.stroke_begin(Vec2::new(1.0, 1.0));
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].color, [1.0, 0.0, 0.0, 0.4]);
        assert_eq!(prims[0].point_size, Some(12.0));
    }

    #[test]
    fn test_begin_paints_for_most_variants() {
        for kind in BrushKind::ALL {
            let mut brush = seeded(kind, 1);
            let prims = brush.stroke_begin(Vec2::new(10.0, 10.0));
            if kind == BrushKind::LineSegment {
                assert!(prims.is_empty());
            } else {
                assert!(!prims.is_empty(), "{} painted nothing", kind.name());
            }
            assert!(brush.is_active());
        }
    }

    #[test]
    fn test_end_draws_nothing() {
        for kind in BrushKind::ALL {
            let mut brush = seeded(kind, 1);
            brush.stroke_begin(Vec2::new(0.0, 0.0));
            brush.stroke_move(Vec2::new(4.0, 0.0));
            assert!(brush.stroke_end(Vec2::new(5.0, 0.0)).is_empty());
            assert!(!brush.is_active());
        }
    }

    #[test]
    fn test_line_segment_lifecycle() {
        let mut brush = Brush::new(BrushKind::LineSegment);
        brush.set_color([1.0, 0.0, 0.0]);
        let begin = Vec2::new(2.0, 3.0);
        assert!(brush.stroke_begin(begin).is_empty());

        let prims = brush.stroke_move(Vec2::new(12.0, 8.0));
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].kind, PrimitiveKind::Lines);
        assert_eq!(prims[0].vertices, vec![begin, Vec2::new(12.0, 8.0)]);

        // Anchor stays at the press point
        let prims = brush.stroke_move(Vec2::new(0.0, 0.0));
        assert_eq!(prims[0].vertices[0], begin);

        brush.stroke_end(Vec2::new(0.0, 0.0));
        assert!(brush.stroke_move(Vec2::new(1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_variant_geometry_kinds() {
        let cases = [
            (BrushKind::Point, PrimitiveKind::Points, 1),
            (BrushKind::Line, PrimitiveKind::TriangleStrip, 1),
            (BrushKind::Circle, PrimitiveKind::TriangleFan, 1),
            (BrushKind::FreeformPolyline, PrimitiveKind::Polyline, 1),
            (BrushKind::ScatterPoint, PrimitiveKind::Points, 3),
            (BrushKind::ScatterLine, PrimitiveKind::TriangleStrip, 3),
            (BrushKind::ScatterCircle, PrimitiveKind::TriangleFan, 3),
        ];
        for (kind, prim_kind, count) in cases {
            let mut brush = seeded(kind, 9);
            let prims = brush.stroke_begin(Vec2::new(20.0, 20.0));
            assert_eq!(prims.len(), count, "{}", kind.name());
            assert!(prims.iter().all(|p| p.kind == prim_kind));
        }

        let mut star = Brush::new(BrushKind::Star);
        let prims = star.stroke_begin(Vec2::new(20.0, 20.0));
        assert_eq!(prims[0].kind, PrimitiveKind::TriangleFan);
        assert_eq!(prims[1].kind, PrimitiveKind::Triangles);
        assert_eq!(prims[1].vertices.len(), 17 * 3);
    }

    #[test]
    fn test_circle_radius_is_half_size() {
        let mut brush = Brush::new(BrushKind::Circle);
        brush.set_size(30);
        let center = Vec2::new(50.0, 50.0);
        let prims = brush.stroke_begin(center);
        assert_eq!(prims[0].vertices.len(), 92);
        assert!((prims[0].vertices[1].distance(center) - 15.0).abs() < 1e-3);
    }

    #[test]
    fn test_scatter_offsets_within_spread() {
        let mut brush = seeded(BrushKind::ScatterPoint, 3);
        brush.set_scatter_radius(40);
        brush.set_density(50);
        let pos = Vec2::new(100.0, 100.0);
        let prims = brush.stroke_begin(pos);
        assert_eq!(prims.len(), 50);
        for p in &prims {
            let v = p.vertices[0];
            assert!((v.x - pos.x).abs() <= 10.0);
            assert!((v.y - pos.y).abs() <= 10.0);
        }
    }

    #[test]
    fn test_scatter_deterministic_with_seed() {
        let run = |seed| {
            let mut brush = seeded(BrushKind::ScatterLine, seed);
            let mut out = brush.stroke_begin(Vec2::new(5.0, 5.0));
            out.extend(brush.stroke_move(Vec2::new(9.0, 7.0)));
            brush.stroke_end(Vec2::new(9.0, 7.0));
            out
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut brush = Brush::new(BrushKind::ScatterCircle);
        brush.reseed(7);
        let first = brush.stroke_begin(Vec2::new(0.0, 0.0));
        brush.reseed(7);
        let second = brush.stroke_begin(Vec2::new(0.0, 0.0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_scatter_samples_each_copy() {
        let image = checkerboard();
        let mut brush = seeded(BrushKind::ScatterPoint, 11);
        brush.set_color_mode(ColorMode::Sample);
        brush.set_color_image(Some(&image));
        brush.set_scatter_radius(100);
        brush.set_density(50);

        let prims = brush.stroke_begin(Vec2::new(4.0, 4.0));
        for p in &prims {
            assert_eq!(p.color, brush.color_at(p.vertices[0]));
        }
        let reds = prims.iter().filter(|p| p.color[0] == 1.0).count();
        assert!(reds > 0 && reds < prims.len());
    }

    #[test]
    fn test_line_uses_angle_and_thickness() {
        let mut brush = Brush::new(BrushKind::Line);
        brush.set_size(10);
        brush.set_thickness(4);
        brush.set_angle(90);
        let prims = brush.stroke_begin(Vec2::new(0.0, 0.0));
        let xs: Vec<f32> = prims[0].vertices.iter().map(|v| v.x.abs()).collect();
        let ys: Vec<f32> = prims[0].vertices.iter().map(|v| v.y.abs()).collect();
        assert!(xs.iter().all(|x| (x - 2.0).abs() < 1e-4));
        assert!(ys.iter().all(|y| (y - 5.0).abs() < 1e-4));
    }

    #[test]
    fn test_engine_selection() {
        let mut engine = BrushEngine::new();
        assert_eq!(engine.active_kind(), BrushKind::Point);
        assert_eq!(engine.iter().count(), 9);

        engine.active_mut().stroke_begin(Vec2::new(1.0, 1.0));
        engine.select(BrushKind::Star);
        assert_eq!(engine.active().kind(), BrushKind::Star);
        assert!(!engine.brush(BrushKind::Point).is_active());

        engine.brush_mut(BrushKind::Line).set_size(77);
        assert_eq!(engine.brush(BrushKind::Line).params().size, 77);
    }
}
