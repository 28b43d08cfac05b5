//! Fixed-position overlays: north arrow, scale bar, system summary, string
//! legend and title block.
//!
//! Layout is anchored to the canvas edges only, never to the data, so the
//! same canvas size always places the overlays identically.

use std::fmt::Write as _;

use chrono::NaiveDate;
use solarplan_core::{DrawingOptions, Point, Projection, RenderConfig, Rgba, StringGroups};

use crate::surface::{DrawingSurface, Rect, StrokeStyle, TextStyle};

/// Backing fill shared by every overlay box.
fn backing() -> Rgba {
    Rgba::WHITE.with_opacity(0.95)
}

// ── Entry point ──────────────────────────────────────────────────────

/// Draw all overlays in their fixed order.
pub fn draw_annotations<S: DrawingSurface>(
    surface: &mut S,
    groups: &StringGroups<'_>,
    projection: &Projection,
    options: &DrawingOptions,
    config: &RenderConfig,
    rendered_on: NaiveDate,
) {
    let width = surface.width() as f64;
    let height = surface.height() as f64;

    draw_north_arrow(surface, Point::new(120.0, 120.0));
    draw_scale_bar(
        surface,
        Point::new(120.0, height - 120.0),
        projection,
        config.scale_bar_meters,
    );
    draw_info_box(surface, Point::new(width - 350.0, 50.0), options);
    draw_legend(surface, Point::new(50.0, height - 350.0), groups);
    draw_title_block(
        surface,
        Point::new(width - 550.0, height - 200.0),
        options,
        config,
        rendered_on,
    );
}

// ── North arrow ──────────────────────────────────────────────────────

/// Compass disc with a red north pointer and an outlined south pointer.
pub fn draw_north_arrow<S: DrawingSurface>(surface: &mut S, center: Point) {
    let black = |width| StrokeStyle::new(Rgba::BLACK, width);
    let at = |dx: f64, dy: f64| center.translate(dx, dy);

    surface.fill_circle(center, 50.0, backing());
    surface.stroke_circle(center, 50.0, &black(3.0));

    let north = [at(0.0, -40.0), at(-12.0, 5.0), at(12.0, 5.0)];
    surface.fill_polygon(&north, Rgba::rgb(0xef, 0x44, 0x44));

    let south = [at(0.0, 40.0), at(-12.0, -5.0), at(12.0, -5.0)];
    surface.fill_polygon(&south, Rgba::WHITE);
    surface.stroke_polygon(&south, &black(2.0));

    surface.draw_text(
        "N",
        at(0.0, -55.0),
        &TextStyle::new(24.0, Rgba::BLACK).bold().centered().middle(),
    );
}

// ── Scale bar ────────────────────────────────────────────────────────

/// Two-tone bar whose full length is `meters` at the projection's scale.
/// `origin` is the bar's top-left corner.
pub fn draw_scale_bar<S: DrawingSurface>(
    surface: &mut S,
    origin: Point,
    projection: &Projection,
    meters: f64,
) {
    const BAR_HEIGHT: f64 = 25.0;
    let bar_width = projection.meters_to_pixels(meters);
    let (x, y) = (origin.x, origin.y);

    let backing_box = Rect::new(x - 20.0, y - 50.0, bar_width + 40.0, 80.0);
    surface.fill_rect(backing_box, backing());
    surface.stroke_rect(backing_box, &StrokeStyle::new(Rgba::BLACK, 2.0));

    surface.fill_rect(Rect::new(x, y, bar_width / 2.0, BAR_HEIGHT), Rgba::BLACK);
    surface.fill_rect(
        Rect::new(x + bar_width / 2.0, y, bar_width / 2.0, BAR_HEIGHT),
        Rgba::WHITE,
    );
    surface.stroke_rect(
        Rect::new(x, y, bar_width, BAR_HEIGHT),
        &StrokeStyle::new(Rgba::BLACK, 3.0),
    );

    let label = TextStyle::new(16.0, Rgba::BLACK).centered();
    surface.draw_text("0", Point::new(x, y + 45.0), &label);
    surface.draw_text(
        &format!("{}m", meters / 2.0),
        Point::new(x + bar_width / 2.0, y + 45.0),
        &label,
    );
    surface.draw_text(
        &format!("{}m", meters),
        Point::new(x + bar_width, y + 45.0),
        &label,
    );
}

// ── Boxes ────────────────────────────────────────────────────────────

fn draw_box<S: DrawingSurface>(surface: &mut S, rect: Rect) {
    surface.fill_rect(rect, backing());
    surface.stroke_rect(rect, &StrokeStyle::new(Rgba::BLACK, 3.0));
}

/// "System Overview" summary in the top-right corner.
pub fn draw_info_box<S: DrawingSurface>(surface: &mut S, origin: Point, options: &DrawingOptions) {
    draw_box(surface, Rect::new(origin.x, origin.y, 300.0, 140.0));

    let body = TextStyle::new(18.0, Rgba::BLACK);
    surface.draw_text(
        "System Overview",
        origin.translate(20.0, 35.0),
        &TextStyle::new(24.0, Rgba::BLACK).bold(),
    );
    surface.draw_text(
        &format!("Total Panels: {}", options.total_panels),
        origin.translate(20.0, 65.0),
        &body,
    );
    surface.draw_text(
        &format!("System Size: {:.2}kW", options.system_size),
        origin.translate(20.0, 90.0),
        &body,
    );
    surface.draw_text(
        &format!("Panel: {}W", options.panel_wattage),
        origin.translate(20.0, 115.0),
        &body,
    );
}

/// One swatch and label per string; the box grows 45 px per entry.
pub fn draw_legend<S: DrawingSurface>(surface: &mut S, origin: Point, groups: &StringGroups<'_>) {
    let height = 80.0 + 45.0 * groups.len() as f64;
    draw_box(surface, Rect::new(origin.x, origin.y, 320.0, height));

    surface.draw_text(
        "String Configuration",
        origin.translate(20.0, 35.0),
        &TextStyle::new(22.0, Rgba::BLACK).bold(),
    );

    let swatch_border = StrokeStyle::new(Rgba::BLACK, 2.0);
    let label = TextStyle::new(18.0, Rgba::BLACK);
    for (idx, string) in groups.iter().enumerate() {
        let y = origin.y + 75.0 + 45.0 * idx as f64;
        let swatch = Rect::new(origin.x + 20.0, y - 20.0, 40.0, 30.0);
        surface.fill_rect(swatch, string.color);
        surface.stroke_rect(swatch, &swatch_border);
        surface.draw_text(&string.legend_label(), Point::new(origin.x + 70.0, y), &label);
    }
}

/// Company, project, address and render date in the bottom-right corner.
pub fn draw_title_block<S: DrawingSurface>(
    surface: &mut S,
    origin: Point,
    options: &DrawingOptions,
    config: &RenderConfig,
    rendered_on: NaiveDate,
) {
    draw_box(surface, Rect::new(origin.x, origin.y, 500.0, 150.0));

    surface.draw_text(
        &config.company_name,
        origin.translate(20.0, 40.0),
        &TextStyle::new(28.0, Rgba::BLACK).bold(),
    );

    let body = TextStyle::new(18.0, Rgba::BLACK);
    surface.draw_text(
        &format!("Project: {}", options.project_name),
        origin.translate(20.0, 70.0),
        &body,
    );
    surface.draw_text(
        &format!("Address: {}", options.address),
        origin.translate(20.0, 95.0),
        &body,
    );
    surface.draw_text(
        &format!("Date: {}", format_date(rendered_on, &config.date_format)),
        origin.translate(20.0, 120.0),
        &body,
    );
}

/// Format with a chrono pattern, falling back to ISO 8601 when the pattern
/// is invalid.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        log::warn!("invalid date format {:?}, using ISO 8601", pattern);
        return date.to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use solarplan_core::{GeoBounds, Panel};

    fn projection(width: u32, height: u32) -> Projection {
        // 0.001 degrees of latitude = 111.32 m.
        let bounds = GeoBounds::new(-33.001, -33.0, 151.0, 151.001).unwrap();
        Projection::new(bounds, width, height)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_overlay_text_in_draw_order() {
        let config = RenderConfig::default();
        let panels = vec![
            Panel::new("1", -33.0004, 151.0004).with_string("a"),
            Panel::new("2", -33.0005, 151.0005).with_string("b"),
            Panel::new("3", -33.0006, 151.0006).with_string("a"),
        ];
        let groups = StringGroups::group(&panels, &config.palette, &config.default_string_id);
        let mut options = DrawingOptions::new("Smith Residence", "1 Main St");
        options.system_size = 6.6;
        options.total_panels = 3;
        options.panel_wattage = 440;

        let mut surface = RecordingSurface::new(2400, 1800);
        draw_annotations(
            &mut surface,
            &groups,
            &projection(2400, 1800),
            &options,
            &config,
            date(),
        );

        assert_eq!(
            surface.texts(),
            vec![
                "N",
                "0",
                "5m",
                "10m",
                "System Overview",
                "Total Panels: 3",
                "System Size: 6.60kW",
                "Panel: 440W",
                "String Configuration",
                "String 1 — 2 panels",
                "String 2 — 1 panel",
                "Sun Direct Power",
                "Project: Smith Residence",
                "Address: 1 Main St",
                "Date: 07/03/2024",
            ]
        );
    }

    #[test]
    fn test_scale_bar_length_tracks_projection() {
        let proj = projection(1000, 1113);
        let mut surface = RecordingSurface::new(1000, 1113);
        draw_scale_bar(&mut surface, Point::new(120.0, 993.0), &proj, 10.0);

        let expected = proj.meters_to_pixels(10.0);
        let outline = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeRect { corners, stroke } if stroke.width == 3.0 => Some(*corners),
                _ => None,
            })
            .next()
            .unwrap();
        assert!((outline[1].x - outline[0].x - expected).abs() < 1e-2);
        assert!((outline[2].y - outline[1].y - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_scale_bar_labels_follow_length() {
        let mut surface = RecordingSurface::new(1000, 1000);
        draw_scale_bar(&mut surface, Point::new(120.0, 880.0), &projection(1000, 1000), 15.0);
        assert_eq!(surface.texts(), vec!["0", "7.5m", "15m"]);
    }

    #[test]
    fn test_legend_grows_with_strings() {
        let config = RenderConfig::default();
        let panels: Vec<Panel> = (0..4)
            .map(|i| Panel::new(&i.to_string(), -33.0005, 151.0005).with_string(&format!("s{}", i)))
            .collect();
        let groups = StringGroups::group(&panels, &config.palette, &config.default_string_id);

        let mut surface = RecordingSurface::new(2400, 1800);
        draw_legend(&mut surface, Point::new(50.0, 1450.0), &groups);
        match &surface.ops()[0] {
            DrawOp::FillRect { corners, .. } => {
                assert_eq!(corners[0], Point::new(50.0, 1450.0));
                assert_eq!(corners[2], Point::new(370.0, 1450.0 + 80.0 + 180.0));
            }
            other => panic!("expected legend box, got {:?}", other),
        }

        let swatch_colors: Vec<Rgba> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { color, .. } if color.is_opaque() => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(swatch_colors, config.palette[..4].to_vec());
    }

    #[test]
    fn test_north_arrow_geometry() {
        let mut surface = RecordingSurface::new(300, 300);
        draw_north_arrow(&mut surface, Point::new(120.0, 120.0));
        match &surface.ops()[2] {
            DrawOp::FillPolygon { points, color } => {
                assert_eq!(*color, Rgba::rgb(0xef, 0x44, 0x44));
                assert_eq!(points[0], Point::new(120.0, 80.0));
            }
            other => panic!("expected north pointer, got {:?}", other),
        }
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(), "%d/%m/%Y"), "07/03/2024");
        assert_eq!(format_date(date(), "%Y-%m-%d"), "2024-03-07");
        assert_eq!(format_date(date(), "%Q"), "2024-03-07");
    }
}
