use serde::{Deserialize, Serialize};

use crate::geometry::{GeoBox, GeoPoint};

/// A solar panel placed at a geographic position.
///
/// Field names serialize in camelCase to match the job records the
/// platform hands over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    /// Identifier, unique within one drawing. Drawn inside the panel.
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Rotation of the panel rectangle in degrees.
    #[serde(default)]
    pub orientation_degrees: f64,
    #[serde(default)]
    pub wattage: u32,
    /// Electrical string this panel is wired into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_id: Option<String>,
}

impl Panel {
    pub fn new(id: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.to_string(),
            latitude,
            longitude,
            orientation_degrees: 0.0,
            wattage: 0,
            string_id: None,
        }
    }

    pub fn with_orientation(mut self, degrees: f64) -> Self {
        self.orientation_degrees = degrees;
        self
    }

    pub fn with_wattage(mut self, wattage: u32) -> Self {
        self.wattage = wattage;
        self
    }

    pub fn with_string(mut self, string_id: &str) -> Self {
        self.string_id = Some(string_id.to_string());
        self
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A planar roof face with uniform pitch and azimuth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoofSegment {
    pub pitch_degrees: f64,
    /// Compass bearing the face points to, degrees from north.
    pub azimuth_degrees: f64,
    #[serde(default)]
    pub area_meters2: f64,
    /// Segments without a box are valid but have nothing to draw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<GeoBox>,
}

impl RoofSegment {
    pub fn new(pitch_degrees: f64, azimuth_degrees: f64, area_meters2: f64) -> Self {
        Self {
            pitch_degrees,
            azimuth_degrees,
            area_meters2,
            bounding_box: None,
        }
    }

    pub fn with_bounding_box(mut self, sw: GeoPoint, ne: GeoPoint) -> Self {
        self.bounding_box = Some(GeoBox::new(sw, ne));
        self
    }

    /// `"{pitch}° / {azimuth}°"`, pitch to one decimal, azimuth whole degrees.
    pub fn orientation_label(&self) -> String {
        format!("{:.1}° / {:.0}°", self.pitch_degrees, self.azimuth_degrees)
    }
}

/// Descriptive job details, used only for annotation text and panel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingOptions {
    pub project_name: String,
    pub address: String,
    /// System size in kW.
    pub system_size: f64,
    pub total_panels: u32,
    pub panel_wattage: u32,
    pub panel_width_meters: f64,
    pub panel_height_meters: f64,
}

impl DrawingOptions {
    pub fn new(project_name: &str, address: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            address: address.to_string(),
            ..Default::default()
        }
    }
}

impl Default for DrawingOptions {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            address: String::new(),
            system_size: 0.0,
            total_panels: 0,
            panel_wattage: 0,
            // Typical 60-cell module
            panel_width_meters: 1.0,
            panel_height_meters: 1.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_label() {
        let seg = RoofSegment::new(22.5, 180.0, 40.0);
        assert_eq!(seg.orientation_label(), "22.5° / 180°");
        assert_eq!(RoofSegment::new(18.0, 7.0, 0.0).orientation_label(), "18.0° / 7°");
    }

    #[test]
    fn test_panel_json_field_names() {
        let json = r#"{
            "id": "P1",
            "latitude": -33.86,
            "longitude": 151.2,
            "orientationDegrees": 90,
            "wattage": 440,
            "stringId": "string-2"
        }"#;
        let panel: Panel = serde_json::from_str(json).unwrap();
        assert_eq!(panel.orientation_degrees, 90.0);
        assert_eq!(panel.string_id.as_deref(), Some("string-2"));

        let bare: Panel = serde_json::from_str(r#"{"id":"P2","latitude":0,"longitude":0}"#).unwrap();
        assert!(bare.string_id.is_none());
        assert_eq!(bare.wattage, 0);
    }

    #[test]
    fn test_segment_bounding_box_json() {
        let json = r#"{
            "pitchDegrees": 22.5,
            "azimuthDegrees": 180,
            "areaMeters2": 35.2,
            "boundingBox": {
                "sw": {"latitude": -33.0001, "longitude": 151.0},
                "ne": {"latitude": -33.0, "longitude": 151.0001}
            }
        }"#;
        let seg: RoofSegment = serde_json::from_str(json).unwrap();
        let bbox = seg.bounding_box.unwrap();
        assert_eq!(bbox.ne.longitude, 151.0001);
    }
}
