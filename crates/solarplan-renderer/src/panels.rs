//! Panel rectangles, colored by electrical string.

use solarplan_core::{DrawingOptions, Projection, RenderConfig, Rgba, StringGroups};

use crate::surface::{DrawingSurface, Rect, StrokeStyle, TextStyle};

/// Draw each panel as a rotated, labeled rectangle; returns the panel count.
///
/// Every panel is drawn inside its own save/restore of the transform, so
/// one panel's rotation never leaks into the next.
pub fn draw_panels<S: DrawingSurface>(
    surface: &mut S,
    groups: &StringGroups<'_>,
    projection: &Projection,
    options: &DrawingOptions,
    config: &RenderConfig,
) -> usize {
    let width_px = projection.meters_to_pixels(options.panel_width_meters);
    let height_px = projection.meters_to_pixels(options.panel_height_meters);
    let label = TextStyle::new(18.0, Rgba::WHITE).bold().centered().middle();
    let mut drawn = 0;

    for string in groups.iter() {
        let fill = string.color.with_alpha(config.panel_fill_alpha);
        let border = StrokeStyle::new(string.color, config.panel_stroke_width);

        for panel in &string.panels {
            let center = projection.project(panel.latitude, panel.longitude);
            let rect = Rect::centered(center, width_px, height_px);
            surface.with_rotation(center, panel.orientation_degrees, |s| {
                s.fill_rect(rect, fill);
                s.stroke_rect(rect, &border);
                s.draw_text(&panel.id, center, &label);
            });
            drawn += 1;
        }
    }

    log::debug!(
        "drew {} panels in {} strings at {:.1}x{:.1} px",
        drawn,
        groups.len(),
        width_px,
        height_px
    );
    drawn
}
