//! Roof segment outlines and pitch/azimuth chips.

use solarplan_core::{Point, Projection, RenderConfig, Rgba, RoofSegment};

use crate::surface::{DrawingSurface, Rect, StrokeStyle, TextStyle};

const CHIP_WIDTH: f64 = 120.0;
const CHIP_HEIGHT: f64 = 50.0;

/// Draw every segment that has a bounding box; returns how many were drawn.
///
/// Segment numbers in the chips follow input order, so a skipped segment
/// still consumes its number.
pub fn draw_roof_segments<S: DrawingSurface>(
    surface: &mut S,
    segments: &[RoofSegment],
    projection: &Projection,
    config: &RenderConfig,
) -> usize {
    let outline = StrokeStyle::new(config.segment_color, config.segment_line_width)
        .dashed(config.segment_dash.clone());
    let mut drawn = 0;

    for (idx, segment) in segments.iter().enumerate() {
        let Some(bbox) = segment.bounding_box.as_ref() else {
            log::debug!("roof segment {} has no bounding box, skipping", idx + 1);
            continue;
        };

        let corners: Vec<Point> = bbox
            .corners()
            .iter()
            .map(|c| projection.project_point(c))
            .collect();
        surface.stroke_polygon(&corners, &outline);

        let center = projection.project_point(&bbox.center());
        surface.fill_rect(
            Rect::centered(center, CHIP_WIDTH, CHIP_HEIGHT),
            config.segment_label_fill,
        );
        surface.draw_text(
            &format!("Roof {}", idx + 1),
            center.translate(0.0, -5.0),
            &TextStyle::new(20.0, Rgba::WHITE).bold().centered(),
        );
        surface.draw_text(
            &segment.orientation_label(),
            center.translate(0.0, 12.0),
            &TextStyle::new(14.0, Rgba::WHITE).centered(),
        );
        drawn += 1;
    }

    log::debug!("drew {} of {} roof segments", drawn, segments.len());
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use solarplan_core::{GeoBounds, GeoPoint};

    fn projection() -> Projection {
        let bounds = GeoBounds::new(-33.001, -33.0, 151.0, 151.001).unwrap();
        Projection::new(bounds, 1000, 1000)
    }

    #[test]
    fn test_outline_and_chip() {
        let segment = RoofSegment::new(22.5, 180.0, 50.0)
            .with_bounding_box(GeoPoint::new(-33.0008, 151.0002), GeoPoint::new(-33.0002, 151.0008));
        let mut surface = RecordingSurface::new(1000, 1000);
        let drawn =
            draw_roof_segments(&mut surface, &[segment], &projection(), &RenderConfig::default());
        assert_eq!(drawn, 1);
        assert_eq!(surface.texts(), vec!["Roof 1", "22.5° / 180°"]);

        match &surface.ops()[0] {
            DrawOp::StrokePolygon { points, stroke } => {
                assert_eq!(points.len(), 4);
                assert!((points[0].x - 200.0).abs() < 1e-3);
                assert!((points[0].y - 800.0).abs() < 1e-3);
                assert_eq!(stroke.dash.as_deref(), Some(&[15.0, 10.0][..]));
            }
            other => panic!("expected outline, got {:?}", other),
        }
        match &surface.ops()[1] {
            DrawOp::FillRect { corners, .. } => {
                assert!((corners[0].x - 440.0).abs() < 1e-3);
                assert!((corners[0].y - 475.0).abs() < 1e-3);
            }
            other => panic!("expected chip, got {:?}", other),
        }
    }

    #[test]
    fn test_segments_without_box_are_skipped_but_numbered() {
        let boxed = RoofSegment::new(10.0, 90.0, 20.0)
            .with_bounding_box(GeoPoint::new(-33.0008, 151.0002), GeoPoint::new(-33.0002, 151.0008));
        let segments = vec![RoofSegment::new(30.0, 0.0, 12.0), boxed];
        let mut surface = RecordingSurface::new(1000, 1000);
        let drawn =
            draw_roof_segments(&mut surface, &segments, &projection(), &RenderConfig::default());
        assert_eq!(drawn, 1);
        assert_eq!(surface.texts(), vec!["Roof 2", "10.0° / 90°"]);
    }

    #[test]
    fn test_no_segments_is_a_no_op() {
        let mut surface = RecordingSurface::new(1000, 1000);
        let drawn = draw_roof_segments(&mut surface, &[], &projection(), &RenderConfig::default());
        assert_eq!(drawn, 0);
        assert!(surface.ops().is_empty());
    }
}
