use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::model::{Panel, RoofSegment};

/// A 2D point in canvas pixel space (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Rotate about `center` by `degrees` (clockwise on screen, y down).
    pub fn rotate_about(&self, center: &Point, degrees: f64) -> Self {
        let (sin_r, cos_r) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Self {
            x: center.x + dx * cos_r - dy * sin_r,
            y: center.y + dx * sin_r + dy * cos_r,
        }
    }
}

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A geographic rectangle given by its south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBox {
    pub sw: GeoPoint,
    pub ne: GeoPoint,
}

impl GeoBox {
    pub fn new(sw: GeoPoint, ne: GeoPoint) -> Self {
        Self { sw, ne }
    }

    /// Corners in drawing order: SW, SE, NE, NW.
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            self.sw,
            GeoPoint::new(self.sw.latitude, self.ne.longitude),
            self.ne,
            GeoPoint::new(self.ne.latitude, self.sw.longitude),
        ]
    }

    /// Midpoint in geo-space.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.sw.latitude + self.ne.latitude) / 2.0,
            (self.sw.longitude + self.ne.longitude) / 2.0,
        )
    }
}

/// The padded geographic extent a drawing covers.
///
/// Invariant: `max_lat > min_lat` and `max_lng > min_lng`. Constructors
/// return [`PlanError::InvalidGeometry`] rather than a degenerate box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    /// Build bounds from explicit extremes, checking the span invariant.
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Result<Self, PlanError> {
        let bounds = Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        };
        bounds.check()?;
        Ok(bounds)
    }

    /// Min/max of all coordinates, expanded by `padding_ratio` of the span on
    /// each side of both axes.
    pub fn from_points(points: &[GeoPoint], padding_ratio: f64) -> Result<Self, PlanError> {
        if points.is_empty() {
            return Err(PlanError::InvalidGeometry(
                "no panel or roof-segment coordinates to bound".to_string(),
            ));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(PlanError::InvalidGeometry(format!(
                "non-finite coordinate ({}, {})",
                bad.latitude, bad.longitude
            )));
        }

        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;
        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        let lat_padding = (max_lat - min_lat) * padding_ratio;
        let lng_padding = (max_lng - min_lng) * padding_ratio;

        Self::new(
            min_lat - lat_padding,
            max_lat + lat_padding,
            min_lng - lng_padding,
            max_lng + lng_padding,
        )
    }

    /// Bounds enclosing every panel centre and every roof-segment box corner.
    pub fn enclosing(
        panels: &[Panel],
        segments: &[RoofSegment],
        padding_ratio: f64,
    ) -> Result<Self, PlanError> {
        let mut points: Vec<GeoPoint> = panels.iter().map(Panel::position).collect();
        for bbox in segments.iter().filter_map(|s| s.bounding_box.as_ref()) {
            points.push(bbox.sw);
            points.push(bbox.ne);
        }
        Self::from_points(&points, padding_ratio)
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.latitude >= self.min_lat
            && p.latitude <= self.max_lat
            && p.longitude >= self.min_lng
            && p.longitude <= self.max_lng
    }

    fn check(&self) -> Result<(), PlanError> {
        let finite = [self.min_lat, self.max_lat, self.min_lng, self.max_lng]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(PlanError::InvalidGeometry("non-finite bounds".to_string()));
        }
        if self.max_lat <= self.min_lat {
            return Err(PlanError::InvalidGeometry(format!(
                "zero latitude span at {}; need at least two distinct latitudes",
                self.min_lat
            )));
        }
        if self.max_lng <= self.min_lng {
            return Err(PlanError::InvalidGeometry(format!(
                "zero longitude span at {}; need at least two distinct longitudes",
                self.min_lng
            )));
        }
        Ok(())
    }
}
