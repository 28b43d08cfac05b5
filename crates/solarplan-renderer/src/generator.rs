//! The end-to-end drawing pipeline.

use chrono::NaiveDate;
use image::RgbaImage;
use solarplan_core::{
    DrawingOptions, GeoBounds, Panel, Projection, RenderConfig, RoofSegment, StringGroups,
};
use solarplan_io::{DrawingJob, FontSet, HttpImagery, ImagerySource};

use crate::annotations::draw_annotations;
use crate::compositor::{composite, load_base_image};
use crate::encoder::encode_png;
use crate::error::RenderError;
use crate::panels::draw_panels;
use crate::segments::draw_roof_segments;
use crate::surface::{DrawingSurface, RasterSurface};

/// Renders installation plans as annotated PNGs.
///
/// Holds only immutable configuration and collaborators, so one generator
/// can serve concurrent requests; every call builds its own framebuffer.
pub struct AerialViewGenerator<S = HttpImagery> {
    config: RenderConfig,
    source: S,
    fonts: Option<FontSet>,
}

impl AerialViewGenerator<HttpImagery> {
    /// HTTP imagery and the host's sans-serif fonts.
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let fonts = match FontSet::discover(config.font_family.as_deref()) {
            Ok(fonts) => {
                log::debug!("using fonts {:?}", fonts);
                Some(fonts)
            }
            Err(e) => {
                log::warn!("{}; labels will not be drawn", e);
                None
            }
        };
        Ok(Self {
            config,
            source: HttpImagery::new(),
            fonts,
        })
    }
}

impl<S: ImagerySource> AerialViewGenerator<S> {
    pub fn with_parts(
        config: RenderConfig,
        source: S,
        fonts: Option<FontSet>,
    ) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            fonts,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Padded bounds around all geometry, projected onto the configured canvas.
    pub fn projection_for(
        &self,
        panels: &[Panel],
        segments: &[RoofSegment],
    ) -> Result<Projection, RenderError> {
        let bounds = GeoBounds::enclosing(panels, segments, self.config.padding_ratio)?;
        Ok(Projection::from_config(bounds, &self.config))
    }

    /// Fetch the aerial photo and render the full drawing.
    ///
    /// Geometry is validated before any network traffic. A photo that
    /// cannot be fetched or decoded in time falls back to a flat background.
    pub async fn generate(
        &self,
        aerial_image_url: &str,
        panels: &[Panel],
        roof_segments: &[RoofSegment],
        options: &DrawingOptions,
        rendered_on: NaiveDate,
    ) -> Result<Vec<u8>, RenderError> {
        self.projection_for(panels, roof_segments)?;
        let aerial = load_base_image(
            &self.source,
            aerial_image_url,
            self.config.fetch_timeout(),
        )
        .await;
        self.render(aerial.as_ref(), panels, roof_segments, options, rendered_on)
    }

    pub async fn generate_job(
        &self,
        job: &DrawingJob,
        rendered_on: NaiveDate,
    ) -> Result<Vec<u8>, RenderError> {
        self.generate(
            &job.aerial_image_url,
            &job.panels,
            &job.roof_segments,
            &job.options,
            rendered_on,
        )
        .await
    }

    /// Render with an already-resolved photo (`None` for the fallback
    /// background) and encode to PNG.
    pub fn render(
        &self,
        aerial: Option<&RgbaImage>,
        panels: &[Panel],
        roof_segments: &[RoofSegment],
        options: &DrawingOptions,
        rendered_on: NaiveDate,
    ) -> Result<Vec<u8>, RenderError> {
        let projection = self.projection_for(panels, roof_segments)?;
        let mut surface = RasterSurface::new(
            self.config.canvas_width,
            self.config.canvas_height,
            self.fonts.as_ref(),
        )?;
        self.render_to(
            &mut surface,
            &projection,
            aerial,
            panels,
            roof_segments,
            options,
            rendered_on,
        );
        let png = encode_png(surface)?;
        log::info!(
            "rendered '{}': {} panels, {} roof segments, {} bytes",
            options.project_name,
            panels.len(),
            roof_segments.len(),
            png.len()
        );
        Ok(png)
    }

    /// Run every drawing stage, in order, against `surface`.
    #[allow(clippy::too_many_arguments)]
    pub fn render_to<D: DrawingSurface>(
        &self,
        surface: &mut D,
        projection: &Projection,
        aerial: Option<&RgbaImage>,
        panels: &[Panel],
        roof_segments: &[RoofSegment],
        options: &DrawingOptions,
        rendered_on: NaiveDate,
    ) {
        let config = &self.config;
        let groups = StringGroups::group(panels, &config.palette, &config.default_string_id);

        composite(surface, aerial, config);
        draw_roof_segments(surface, roof_segments, projection, config);
        draw_panels(surface, &groups, projection, options, config);
        draw_annotations(surface, &groups, projection, options, config, rendered_on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use solarplan_io::StaticImagery;

    fn generator() -> AerialViewGenerator<StaticImagery> {
        AerialViewGenerator::with_parts(
            RenderConfig::default(),
            StaticImagery::Unavailable("offline".to_string()),
            None,
        )
        .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RenderConfig {
            canvas_width: 0,
            ..RenderConfig::default()
        };
        let result = AerialViewGenerator::with_parts(config, StaticImagery::Stalled, None);
        assert!(matches!(result, Err(RenderError::Plan(_))));
    }

    #[test]
    fn test_stage_order() {
        let gen = generator();
        let panels = vec![
            Panel::new("A1", -33.0, 151.0),
            Panel::new("A2", -33.0001, 151.0001),
        ];
        let projection = gen.projection_for(&panels, &[]).unwrap();
        let mut surface = RecordingSurface::new(2400, 1800);
        gen.render_to(
            &mut surface,
            &projection,
            None,
            &panels,
            &[],
            &DrawingOptions::default(),
            date(),
        );

        assert!(matches!(surface.ops()[0], DrawOp::Clear(_)));
        let texts = surface.texts();
        assert_eq!(&texts[..3], &["A1", "A2", "N"]);
        assert_eq!(texts.last().copied(), Some("Date: 31/01/2025"));
    }

    #[tokio::test]
    async fn test_degenerate_geometry_fails_before_fetch() {
        let gen = AerialViewGenerator::with_parts(
            RenderConfig::default(),
            StaticImagery::Stalled,
            None,
        )
        .unwrap();
        // A stalled source would hang for the full timeout if it were consulted.
        let err = gen
            .generate(
                "mem://aerial",
                &[Panel::new("only", -33.0, 151.0)],
                &[],
                &DrawingOptions::default(),
                date(),
            )
            .await
            .unwrap_err();
        assert!(err.is_invalid_geometry());
    }
}
