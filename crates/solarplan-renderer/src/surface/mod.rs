//! Drawing surfaces.
//!
//! Every pipeline stage draws through [`DrawingSurface`], so the same
//! stages produce pixels on a [`RasterSurface`] or an inspectable op list
//! on a [`RecordingSurface`].

pub mod raster;
pub mod recording;

pub use raster::RasterSurface;
pub use recording::{DrawOp, RecordingSurface};

use image::RgbaImage;
use solarplan_core::{Point, Rgba};
use tiny_skia::Transform;

/// An axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Corners clockwise from top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
    /// Alternating dash and gap lengths; `None` for a solid line.
    pub dash: Option<Vec<f32>>,
}

impl StrokeStyle {
    pub fn new(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(mut self, pattern: Vec<f32>) -> Self {
        self.dash = Some(pattern);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    /// `y` is the baseline.
    Alphabetic,
    /// `y` is the vertical middle of the line box.
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Pixel size.
    pub size: f32,
    pub bold: bool,
    pub color: Rgba,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextStyle {
    pub fn new(size: f32, color: Rgba) -> Self {
        Self {
            size,
            bold: false,
            color,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    pub fn middle(mut self) -> Self {
        self.baseline = TextBaseline::Middle;
        self
    }
}

/// A 2D canvas the pipeline stages draw on.
///
/// Geometry passed to the drawing methods is mapped through the current
/// transform; [`blit_image`](Self::blit_image) and [`clear`](Self::clear)
/// always cover the whole surface.
pub trait DrawingSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn transform(&self) -> Transform;
    fn set_transform(&mut self, transform: Transform);

    fn clear(&mut self, color: Rgba);
    /// Draw `image` scaled to exactly fill the surface.
    fn blit_image(&mut self, image: &RgbaImage);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle);
    fn fill_polygon(&mut self, points: &[Point], color: Rgba);
    fn stroke_polygon(&mut self, points: &[Point], stroke: &StrokeStyle);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);
    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &StrokeStyle);
    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle);

    /// Full-surface rectangle.
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f64, self.height() as f64)
    }

    /// Run `draw` rotated by `degrees` about `center`, then restore the
    /// previous transform.
    fn with_rotation<F>(&mut self, center: Point, degrees: f64, draw: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        let saved = self.transform();
        let rotation =
            Transform::from_rotate_at(degrees as f32, center.x as f32, center.y as f32);
        self.set_transform(saved.pre_concat(rotation));
        draw(self);
        self.set_transform(saved);
    }
}

/// Map a point through a transform.
pub(crate) fn map_point(transform: &Transform, p: Point) -> Point {
    let mut pts = [tiny_skia::Point::from_xy(p.x as f32, p.y as f32)];
    transform.map_points(&mut pts);
    Point::new(pts[0].x as f64, pts[0].y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let r = Rect::centered(Point::new(100.0, 50.0), 20.0, 10.0);
        assert_eq!(r.x, 90.0);
        assert_eq!(r.y, 45.0);
        assert_eq!(r.center(), Point::new(100.0, 50.0));
        assert_eq!(r.corners()[2], Point::new(110.0, 55.0));
    }

    #[test]
    fn test_with_rotation_restores_transform() {
        let mut surface = RecordingSurface::new(100, 100);
        let before = surface.transform();
        surface.with_rotation(Point::new(50.0, 50.0), 30.0, |s| {
            assert_ne!(s.transform(), before);
        });
        assert_eq!(surface.transform(), before);
    }

    #[test]
    fn test_rotation_matches_point_rotation() {
        let t = Transform::from_rotate_at(45.0, 10.0, 10.0);
        let mapped = map_point(&t, Point::new(20.0, 10.0));
        let expected = Point::new(20.0, 10.0).rotate_about(&Point::new(10.0, 10.0), 45.0);
        assert!(mapped.distance_to(&expected) < 1e-3);
    }
}
