use image::RgbaImage;
use solarplan_core::{Point, Rgba};
use solarplan_io::FontSet;
use tiny_skia::{
    FillRule, FilterQuality, IntSize, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke,
    StrokeDash, Transform,
};

use super::{DrawingSurface, Rect, StrokeStyle, TextAlign, TextBaseline, TextStyle};
use crate::error::RenderError;

/// CPU framebuffer backed by a tiny-skia pixmap.
///
/// Text is rasterized with fontdue. Without a [`FontSet`], text draws are
/// skipped and only geometry reaches the pixels.
pub struct RasterSurface<'f> {
    pixmap: Pixmap,
    transform: Transform,
    fonts: Option<&'f FontSet>,
}

impl<'f> RasterSurface<'f> {
    pub fn new(width: u32, height: u32, fonts: Option<&'f FontSet>) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;
        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            fonts,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

impl DrawingSurface for RasterSurface<'_> {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn clear(&mut self, color: Rgba) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    fn blit_image(&mut self, image: &RgbaImage) {
        let Some(source) = image_to_pixmap(image) else {
            log::warn!("skipping empty {}x{} image", image.width(), image.height());
            return;
        };
        let sx = self.pixmap.width() as f32 / source.width() as f32;
        let sy = self.pixmap.height() as f32 / source.height() as f32;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            Transform::from_scale(sx, sy),
            None,
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if let Some(r) = skia_rect(rect) {
            self.pixmap.fill_rect(r, &paint(color), self.transform, None);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle) {
        if let Some(r) = skia_rect(rect) {
            let path = PathBuilder::from_rect(r);
            self.stroke_path(&path, stroke);
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba) {
        if let Some(path) = polygon_path(points) {
            self.pixmap
                .fill_path(&path, &paint(color), FillRule::Winding, self.transform, None);
        }
    }

    fn stroke_polygon(&mut self, points: &[Point], stroke: &StrokeStyle) {
        if let Some(path) = polygon_path(points) {
            self.stroke_path(&path, stroke);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32) {
            self.pixmap
                .fill_path(&path, &paint(color), FillRule::Winding, self.transform, None);
        }
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &StrokeStyle) {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32) {
            self.stroke_path(&path, stroke);
        }
    }

    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let Some(fonts) = self.fonts else {
            return;
        };
        let Some(line) = TextLine::rasterize(fonts.face(style.bold), text, style) else {
            return;
        };

        let left = match style.align {
            TextAlign::Left => at.x as f32,
            TextAlign::Center => at.x as f32 - line.advance / 2.0,
        };
        let top = match style.baseline {
            TextBaseline::Alphabetic => at.y as f32 - line.baseline,
            TextBaseline::Middle => at.y as f32 - line.pixmap.height() as f32 / 2.0,
        };

        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            line.pixmap.as_ref(),
            &paint,
            self.transform.pre_translate(left, top),
            None,
        );
    }
}

impl RasterSurface<'_> {
    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle) {
        let stroke = Stroke {
            width: style.width,
            dash: style
                .dash
                .as_ref()
                .and_then(|pattern| StrokeDash::new(pattern.clone(), 0.0)),
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &paint(style.color), &stroke, self.transform, None);
    }
}

/// One line of text rendered into its own premultiplied pixmap.
struct TextLine {
    pixmap: Pixmap,
    /// Pen advance, which is the logical width used for alignment.
    advance: f32,
    /// Distance from the pixmap top to the baseline.
    baseline: f32,
}

impl TextLine {
    fn rasterize(font: &fontdue::Font, text: &str, style: &TextStyle) -> Option<Self> {
        let size = style.size;
        let (ascent, descent) = match font.horizontal_line_metrics(size) {
            Some(m) => (m.ascent, m.descent),
            None => (size * 0.8, -size * 0.2),
        };

        let glyphs: Vec<(fontdue::Metrics, Vec<u8>)> =
            text.chars().map(|c| font.rasterize(c, size)).collect();
        let advance: f32 = glyphs.iter().map(|(m, _)| m.advance_width).sum();

        // One pixel of padding on each side for antialiased edges.
        let baseline = ascent.ceil() + 1.0;
        let width = (advance.ceil() as u32).saturating_add(2).max(1);
        let height = ((ascent - descent).ceil() as u32).saturating_add(2);

        let size = IntSize::from_wh(width, height)?;
        let mut coverage = vec![0u8; pixel_count(width, height)?];
        let mut pen = 1.0f32;
        for (metrics, bitmap) in &glyphs {
            let gx = (pen + metrics.xmin as f32).round() as i64;
            let gy = (baseline - (metrics.height as i32 + metrics.ymin) as f32).round() as i64;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let x = gx + col as i64;
                    let y = gy + row as i64;
                    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                        continue;
                    }
                    let idx = y as usize * width as usize + x as usize;
                    let value = bitmap[row * metrics.width + col];
                    coverage[idx] = coverage[idx].max(value);
                }
            }
            pen += metrics.advance_width;
        }

        let color = style.color;
        let mut data = Vec::with_capacity(coverage.len() * 4);
        for c in coverage {
            let a = mul_u8(color.a, c);
            data.extend_from_slice(&[mul_u8(color.r, a), mul_u8(color.g, a), mul_u8(color.b, a), a]);
        }
        let pixmap = Pixmap::from_vec(data, size)?;

        Some(Self {
            pixmap,
            advance,
            baseline,
        })
    }
}

fn paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

fn polygon_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    pb.close();
    pb.finish()
}

/// Convert straight-alpha RGBA into a premultiplied pixmap.
fn image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    let mut data = Vec::with_capacity(image.as_raw().len());
    for px in image.pixels() {
        let [r, g, b, a] = px.0;
        data.extend_from_slice(&[mul_u8(r, a), mul_u8(g, a), mul_u8(b, a), a]);
    }
    Pixmap::from_vec(data, size)
}

/// Pixels in a `width` x `height` buffer, or `None` if that overflows `usize`
/// or exceeds what a pixmap can hold.
fn pixel_count(width: u32, height: u32) -> Option<usize> {
    let count = (width as usize).checked_mul(height as usize)?;
    count.checked_mul(4)?;
    Some(count)
}

/// `a * b / 255`, rounded.
fn mul_u8(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16 + 127) / 255) as u8
}
