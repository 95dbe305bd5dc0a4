//! Shape generation for 2D primitives
//!
//! All coordinates are canvas units (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::font;
use super::vertex::{SpriteVertex, Vertex};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a line of bitmap text with its top-left at `origin`.
/// `scale` is the size of one font pixel in canvas units.
pub fn text(text: &str, origin: Vec2, scale: f32, color: [f32; 4]) -> Vec<Vertex> {
    let runs = font::layout(text);
    let mut vertices = Vec::with_capacity(runs.len() * 6);

    for run in runs {
        let min = origin + Vec2::new(run.x as f32, run.y as f32) * scale;
        let size = Vec2::new(run.len as f32 * scale, scale);
        vertices.extend_from_slice(&rect(min, size, color));
    }

    vertices
}

/// Size of rendered text in canvas units
pub fn text_size(text: &str, scale: f32) -> Vec2 {
    Vec2::new(
        font::text_width(text) as f32 * scale,
        font::GLYPH_HEIGHT as f32 * scale,
    )
}

/// Generate a textured quad of `size` centered on `center`, sampling `layer`
pub fn sprite(center: Vec2, size: f32, layer: u32) -> [SpriteVertex; 6] {
    let half = size / 2.0;
    let (x0, y0) = (center.x - half, center.y - half);
    let (x1, y1) = (center.x + half, center.y + half);
    [
        SpriteVertex::new(x0, y0, 0.0, 0.0, layer),
        SpriteVertex::new(x1, y0, 1.0, 0.0, layer),
        SpriteVertex::new(x0, y1, 0.0, 1.0, layer),
        SpriteVertex::new(x0, y1, 0.0, 1.0, layer),
        SpriteVertex::new(x1, y0, 1.0, 0.0, layer),
        SpriteVertex::new(x1, y1, 1.0, 1.0, layer),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count_and_extent() {
        let verts = circle(Vec2::new(10.0, 10.0), 5.0, [1.0; 4], 12);
        assert_eq!(verts.len(), 36);
        for v in &verts {
            let d = Vec2::from(v.position).distance(Vec2::new(10.0, 10.0));
            assert!(d <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_text_size() {
        assert_eq!(text_size("AI", 2.0), Vec2::new(22.0, 14.0));
    }

    #[test]
    fn test_text_vertices_scaled() {
        // '-' is one 5-pixel run on row 3
        let verts = text("-", Vec2::new(100.0, 50.0), 3.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[0].position, [100.0, 59.0]);
        assert_eq!(verts[5].position, [115.0, 62.0]);
    }

    #[test]
    fn test_sprite_centered() {
        let quad = sprite(Vec2::new(400.0, 300.0), 30.0, 5);
        assert_eq!(quad[0].position, [385.0, 285.0]);
        assert_eq!(quad[5].position, [415.0, 315.0]);
        assert!(quad.iter().all(|v| v.layer == 5));
    }
}
