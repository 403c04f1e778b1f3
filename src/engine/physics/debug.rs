use glam::DVec2;

use super::transform::{resolve, WorldShape};
use super::world::{Entity, EntityRegistry};

/// RGBA color in the 0.0..=1.0 range
pub type DebugColor = [f32; 4];

/// Stroke color of zero-mass bodies
pub const STATIC_COLOR: DebugColor = [0.5, 0.5, 0.5, 0.8];
/// Stroke color of bodies with mass
pub const DYNAMIC_COLOR: DebugColor = [0.0, 1.0, 0.0, 0.8];
/// Fill color of entity labels
pub const LABEL_COLOR: DebugColor = [1.0, 1.0, 1.0, 1.0];

/// Drawing surface owned by the host renderer
///
/// Mirrors the handful of 2D canvas operations the debug overlay needs.
pub trait DrawSurface {
    fn set_fill_style(&mut self, color: DebugColor);
    fn set_stroke_style(&mut self, color: DebugColor);
    /// Stroke a closed outline through `points`
    fn stroke_polygon(&mut self, points: &[DVec2]);
    fn stroke_circle(&mut self, center: DVec2, radius: f64);
    fn fill_text(&mut self, text: &str, position: DVec2);
}

/// Draw an entity's collision outline and name onto `surface`
///
/// Presentation only; nothing here affects query results.
pub fn draw_entity(entity: &Entity, surface: &mut impl DrawSurface) {
    let color = if entity.body().is_static() {
        STATIC_COLOR
    } else {
        DYNAMIC_COLOR
    };
    surface.set_stroke_style(color);

    match resolve(entity.body(), entity.position()) {
        WorldShape::Rect { corners, .. } => surface.stroke_polygon(&corners),
        WorldShape::Circle { center, radius } => surface.stroke_circle(center, radius),
    }

    surface.set_fill_style(LABEL_COLOR);
    surface.fill_text(entity.name(), entity.position());
}

/// Draw a registered entity by name; unknown names are skipped
pub fn draw_named(registry: &EntityRegistry, name: &str, surface: &mut impl DrawSurface) {
    if let Some(entity) = registry.get(name) {
        draw_entity(entity, surface);
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Text queued by `fill_text`
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub position: DVec2,
    pub color: DebugColor,
}

/// Segments used to approximate a circle outline
const CIRCLE_SEGMENTS: usize = 16;

/// `DrawSurface` that records a line list ready for a GPU vertex/index buffer
#[derive(Debug, Clone)]
pub struct DebugLineBatch {
    width: f64,
    height: f64,
    vertices: Vec<DebugVertex>,
    indices: Vec<u16>,
    labels: Vec<TextLabel>,
    stroke: DebugColor,
    fill: DebugColor,
}

impl DebugLineBatch {
    /// Create an empty batch for a `width` x `height` surface
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            vertices: Vec::new(),
            indices: Vec::new(),
            labels: Vec::new(),
            stroke: [1.0, 1.0, 1.0, 0.8],
            fill: LABEL_COLOR,
        }
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    pub fn vertices(&self) -> &[DebugVertex] {
        &self.vertices
    }

    /// Index pairs, one pair per line segment
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Raw vertex bytes for uploading
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for uploading
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() && self.labels.is_empty()
    }

    /// Drop all recorded geometry, typically once per frame
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.labels.clear();
    }

    fn push_loop(&mut self, points: impl ExactSizeIterator<Item = DVec2>) {
        let count = points.len();
        // u16 indices: skip anything that would overflow the buffer
        if count < 2 || self.vertices.len() + count > usize::from(u16::MAX) {
            return;
        }

        let start_idx = self.vertices.len() as u16;
        for point in points {
            self.vertices.push(DebugVertex {
                position: [point.x as f32, point.y as f32],
                color: self.stroke,
            });
        }

        for i in 0..count as u16 {
            self.indices.push(start_idx + i);
            self.indices.push(start_idx + (i + 1) % count as u16);
        }
    }
}

impl DrawSurface for DebugLineBatch {
    fn set_fill_style(&mut self, color: DebugColor) {
        self.fill = color;
    }

    fn set_stroke_style(&mut self, color: DebugColor) {
        self.stroke = color;
    }

    fn stroke_polygon(&mut self, points: &[DVec2]) {
        self.push_loop(points.iter().copied());
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64) {
        self.push_loop((0..CIRCLE_SEGMENTS).map(|i| {
            let angle = (i as f64 / CIRCLE_SEGMENTS as f64) * std::f64::consts::TAU;
            center + DVec2::new(angle.cos(), angle.sin()) * radius
        }));
    }

    fn fill_text(&mut self, text: &str, position: DVec2) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            position,
            color: self.fill,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::shape::{CollisionBody, ShapeKind};
    use approx::assert_abs_diff_eq;

    /// Surface that only records which calls were made
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<String>,
    }

    impl DrawSurface for RecordingSurface {
        fn set_fill_style(&mut self, _color: DebugColor) {
            self.calls.push("fill_style".to_string());
        }
        fn set_stroke_style(&mut self, _color: DebugColor) {
            self.calls.push("stroke_style".to_string());
        }
        fn stroke_polygon(&mut self, points: &[DVec2]) {
            self.calls.push(format!("polygon:{}", points.len()));
        }
        fn stroke_circle(&mut self, _center: DVec2, radius: f64) {
            self.calls.push(format!("circle:{radius}"));
        }
        fn fill_text(&mut self, text: &str, _position: DVec2) {
            self.calls.push(format!("text:{text}"));
        }
    }

    fn registry() -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        registry
            .create(
                "box",
                CollisionBody::new(ShapeKind::Rect, 100.0, 50.0, 0.0, 0.0).unwrap(),
                10.0,
                20.0,
            )
            .unwrap();
        registry
            .create(
                "ball",
                CollisionBody::new(ShapeKind::Circle, 20.0, 20.0, 0.0, 0.0)
                    .unwrap()
                    .with_mass(1.0)
                    .unwrap(),
                200.0,
                200.0,
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_draw_rect_calls() {
        let registry = registry();
        let mut surface = RecordingSurface::default();
        draw_named(&registry, "box", &mut surface);

        assert_eq!(
            surface.calls,
            vec!["stroke_style", "polygon:4", "fill_style", "text:box"]
        );
    }

    #[test]
    fn test_draw_circle_calls() {
        let registry = registry();
        let mut surface = RecordingSurface::default();
        draw_named(&registry, "ball", &mut surface);

        assert_eq!(
            surface.calls,
            vec!["stroke_style", "circle:10", "fill_style", "text:ball"]
        );
    }

    #[test]
    fn test_draw_missing_is_noop() {
        let registry = registry();
        let mut surface = RecordingSurface::default();
        draw_named(&registry, "missing", &mut surface);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_line_batch_rect() {
        let registry = registry();
        let mut batch = DebugLineBatch::new(800.0, 600.0);
        draw_named(&registry, "box", &mut batch);

        assert_eq!(batch.vertices().len(), 4);
        assert_eq!(batch.indices(), &[0, 1, 1, 2, 2, 3, 3, 0]);
        assert_eq!(batch.segment_count(), 4);
        assert_eq!(batch.vertices()[0].position, [10.0, 20.0]);
        assert_eq!(batch.vertices()[2].position, [110.0, 70.0]);
        assert_eq!(batch.vertices()[0].color, STATIC_COLOR);

        assert_eq!(batch.labels().len(), 1);
        assert_eq!(batch.labels()[0].text, "box");
        assert_eq!(batch.labels()[0].position, DVec2::new(10.0, 20.0));
    }

    #[test]
    fn test_line_batch_circle() {
        let registry = registry();
        let mut batch = DebugLineBatch::new(800.0, 600.0);
        draw_named(&registry, "ball", &mut batch);

        assert_eq!(batch.vertices().len(), CIRCLE_SEGMENTS);
        assert_eq!(batch.segment_count(), CIRCLE_SEGMENTS);
        assert_eq!(batch.vertices()[0].color, DYNAMIC_COLOR);

        // Every vertex lies on the circle around (210, 210)
        for vertex in batch.vertices() {
            let p = DVec2::new(vertex.position[0] as f64, vertex.position[1] as f64);
            assert_abs_diff_eq!(p.distance(DVec2::new(210.0, 210.0)), 10.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_line_batch_bytes_and_clear() {
        let registry = registry();
        let mut batch = DebugLineBatch::new(800.0, 600.0);
        draw_named(&registry, "box", &mut batch);
        draw_named(&registry, "ball", &mut batch);

        assert_eq!(
            batch.vertex_bytes().len(),
            batch.vertices().len() * std::mem::size_of::<DebugVertex>()
        );
        assert_eq!(batch.index_bytes().len(), batch.indices().len() * 2);
        // Second loop indexes past the first one's vertices
        assert_eq!(batch.indices()[8], 4);

        batch.clear();
        assert!(batch.is_empty());
        assert_eq!(batch.size(), DVec2::new(800.0, 600.0));
    }
}
