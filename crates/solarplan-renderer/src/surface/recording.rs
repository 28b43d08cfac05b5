use image::RgbaImage;
use solarplan_core::{Point, Rgba};
use tiny_skia::Transform;

use super::{map_point, DrawingSurface, Rect, StrokeStyle, TextStyle};

/// One draw call, with all geometry already mapped to surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rgba),
    Image { width: u32, height: u32 },
    FillRect { corners: [Point; 4], color: Rgba },
    StrokeRect { corners: [Point; 4], stroke: StrokeStyle },
    FillPolygon { points: Vec<Point>, color: Rgba },
    StrokePolygon { points: Vec<Point>, stroke: StrokeStyle },
    FillCircle { center: Point, radius: f64, color: Rgba },
    StrokeCircle { center: Point, radius: f64, stroke: StrokeStyle },
    Text { text: String, at: Point, style: TextStyle },
}

/// A surface that records draw calls instead of rasterizing them.
///
/// Useful for checking layout (label text, colors, rotated corners)
/// without fonts or pixel tolerances.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    transform: Transform,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            transform: Transform::identity(),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// All text drawn, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn map_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| map_point(&self.transform, *p)).collect()
    }

    fn map_corners(&self, rect: Rect) -> [Point; 4] {
        rect.corners().map(|p| map_point(&self.transform, p))
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn clear(&mut self, color: Rgba) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn blit_image(&mut self, image: &RgbaImage) {
        self.ops.push(DrawOp::Image {
            width: image.width(),
            height: image.height(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let corners = self.map_corners(rect);
        self.ops.push(DrawOp::FillRect { corners, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle) {
        let corners = self.map_corners(rect);
        self.ops.push(DrawOp::StrokeRect {
            corners,
            stroke: stroke.clone(),
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba) {
        let points = self.map_all(points);
        self.ops.push(DrawOp::FillPolygon { points, color });
    }

    fn stroke_polygon(&mut self, points: &[Point], stroke: &StrokeStyle) {
        let points = self.map_all(points);
        self.ops.push(DrawOp::StrokePolygon {
            points,
            stroke: stroke.clone(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        let center = map_point(&self.transform, center);
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &StrokeStyle) {
        let center = map_point(&self.transform, center);
        self.ops.push(DrawOp::StrokeCircle {
            center,
            radius,
            stroke: stroke.clone(),
        });
    }

    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let at = map_point(&self.transform, at);
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            style: *style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.clear(Rgba::WHITE);
        surface.draw_text("a", Point::new(1.0, 1.0), &TextStyle::new(12.0, Rgba::BLACK));
        surface.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba::BLACK);
        surface.draw_text("b", Point::new(2.0, 2.0), &TextStyle::new(12.0, Rgba::BLACK));
        assert_eq!(surface.ops().len(), 4);
        assert_eq!(surface.ops()[0], DrawOp::Clear(Rgba::WHITE));
        assert_eq!(surface.texts(), vec!["a", "b"]);
    }

    #[test]
    fn test_geometry_is_recorded_in_surface_space() {
        let mut surface = RecordingSurface::new(100, 100);
        surface.set_transform(Transform::from_translate(10.0, 20.0));
        surface.fill_circle(Point::new(1.0, 1.0), 3.0, Rgba::BLACK);
        match &surface.ops()[0] {
            DrawOp::FillCircle { center, radius, .. } => {
                assert_eq!(*center, Point::new(11.0, 21.0));
                assert_eq!(*radius, 3.0);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }
}
