use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::geometry::{GeoBounds, GeoPoint, Point};

/// How real-world meters map to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// One scale for both axes, from the latitude span alone. Ignores the
    /// shrinkage of a longitude degree away from the equator.
    #[default]
    LatitudeOnly,
    /// Geometric mean of the latitude scale and a longitude scale corrected
    /// by `cos(mean latitude)`.
    MeanLatitudeCorrected,
}

/// Equirectangular mapping from geographic bounds onto a fixed canvas.
///
/// North is up: higher latitude maps to smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub bounds: GeoBounds,
    /// Canvas width in pixels.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
    pub meters_per_degree: f64,
    pub scale_mode: ScaleMode,
}

impl Projection {
    pub fn new(bounds: GeoBounds, canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            bounds,
            canvas_width: canvas_width as f64,
            canvas_height: canvas_height as f64,
            meters_per_degree: 111_320.0,
            scale_mode: ScaleMode::LatitudeOnly,
        }
    }

    pub fn from_config(bounds: GeoBounds, config: &RenderConfig) -> Self {
        Self {
            meters_per_degree: config.meters_per_degree,
            scale_mode: config.scale_mode,
            ..Self::new(bounds, config.canvas_width, config.canvas_height)
        }
    }

    pub fn with_scale_mode(mut self, scale_mode: ScaleMode) -> Self {
        self.scale_mode = scale_mode;
        self
    }

    /// Convert a coordinate to canvas pixels.
    pub fn project(&self, latitude: f64, longitude: f64) -> Point {
        let lat_norm = (latitude - self.bounds.min_lat) / self.bounds.lat_span();
        let lng_norm = (longitude - self.bounds.min_lng) / self.bounds.lng_span();
        Point::new(
            lng_norm * self.canvas_width,
            (1.0 - lat_norm) * self.canvas_height,
        )
    }

    pub fn project_point(&self, p: &GeoPoint) -> Point {
        self.project(p.latitude, p.longitude)
    }

    /// Inverse of [`project`](Self::project).
    pub fn unproject(&self, p: &Point) -> GeoPoint {
        let lng_norm = p.x / self.canvas_width;
        let lat_norm = 1.0 - p.y / self.canvas_height;
        GeoPoint::new(
            self.bounds.min_lat + lat_norm * self.bounds.lat_span(),
            self.bounds.min_lng + lng_norm * self.bounds.lng_span(),
        )
    }

    pub fn pixels_per_meter(&self) -> f64 {
        let lat_scale =
            self.canvas_height / (self.bounds.lat_span() * self.meters_per_degree);
        match self.scale_mode {
            ScaleMode::LatitudeOnly => lat_scale,
            ScaleMode::MeanLatitudeCorrected => {
                let cos_lat = self.bounds.center().latitude.to_radians().cos();
                let lng_scale = self.canvas_width
                    / (self.bounds.lng_span() * self.meters_per_degree * cos_lat);
                (lat_scale * lng_scale).sqrt()
            }
        }
    }

    pub fn meters_to_pixels(&self, meters: f64) -> f64 {
        meters * self.pixels_per_meter()
    }
}
