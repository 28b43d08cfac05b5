use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::PlanError;
use crate::projection::ScaleMode;

/// Rendering constants for one drawing. Every value has a production
/// default; hosts override fields or load a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Fraction of the coordinate span added on each side of both axes.
    pub padding_ratio: f64,
    pub meters_per_degree: f64,
    pub scale_mode: ScaleMode,
    pub scale_bar_meters: f64,
    /// Opacity of the black wash laid over the aerial photo.
    pub overlay_opacity: f32,
    /// Flat background used when the aerial photo cannot be loaded.
    pub fallback_background: Rgba,
    pub segment_color: Rgba,
    pub segment_label_fill: Rgba,
    pub segment_line_width: f32,
    pub segment_dash: Vec<f32>,
    pub panel_fill_alpha: u8,
    pub panel_stroke_width: f32,
    /// String colors, assigned by first appearance.
    pub palette: Vec<Rgba>,
    /// String id given to panels that carry none.
    pub default_string_id: String,
    pub company_name: String,
    /// chrono format string for the title-block date.
    pub date_format: String,
    pub fetch_timeout_ms: u64,
    /// Preferred font family for labels; falls back to the system sans-serif.
    pub font_family: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 2400,
            canvas_height: 1800,
            padding_ratio: 0.1,
            meters_per_degree: 111_320.0,
            scale_mode: ScaleMode::LatitudeOnly,
            scale_bar_meters: 10.0,
            overlay_opacity: 0.15,
            fallback_background: Rgba::rgb(0xe5, 0xe7, 0xeb),
            segment_color: Rgba::rgb(0x3b, 0x82, 0xf6),
            segment_label_fill: Rgba::rgb(0x3b, 0x82, 0xf6).with_opacity(0.9),
            segment_line_width: 4.0,
            segment_dash: vec![15.0, 10.0],
            panel_fill_alpha: 0xDD,
            panel_stroke_width: 3.0,
            palette: vec![
                Rgba::rgb(0xef, 0x44, 0x44), // red
                Rgba::rgb(0x3b, 0x82, 0xf6), // blue
                Rgba::rgb(0x10, 0xb9, 0x81), // green
                Rgba::rgb(0xf5, 0x9e, 0x0b), // orange
                Rgba::rgb(0x8b, 0x5c, 0xf6), // purple
                Rgba::rgb(0xec, 0x48, 0x99), // pink
            ],
            default_string_id: "string-1".to_string(),
            company_name: "Sun Direct Power".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            fetch_timeout_ms: 15_000,
            font_family: None,
        }
    }
}

impl RenderConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(PlanError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.padding_ratio >= 0.0 && self.padding_ratio.is_finite()) {
            return Err(PlanError::InvalidConfig(format!(
                "padding_ratio must be >= 0, got {}",
                self.padding_ratio
            )));
        }
        if !(self.meters_per_degree > 0.0) {
            return Err(PlanError::InvalidConfig(
                "meters_per_degree must be positive".to_string(),
            ));
        }
        if !(self.scale_bar_meters > 0.0) {
            return Err(PlanError::InvalidConfig(
                "scale_bar_meters must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(PlanError::InvalidConfig(format!(
                "overlay_opacity must be within [0, 1], got {}",
                self.overlay_opacity
            )));
        }
        if self.palette.is_empty() {
            return Err(PlanError::InvalidConfig("palette is empty".to_string()));
        }
        let dash = &self.segment_dash;
        if dash.is_empty() || dash.len() % 2 != 0 || dash.iter().any(|v| !(*v > 0.0 && v.is_finite()))
        {
            return Err(PlanError::InvalidConfig(format!(
                "segment_dash needs an even number of positive lengths, got {:?}",
                dash
            )));
        }
        for (name, width) in [
            ("segment_line_width", self.segment_line_width),
            ("panel_stroke_width", self.panel_stroke_width),
        ] {
            if !(width > 0.0 && width.is_finite()) {
                return Err(PlanError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, width
                )));
            }
        }
        if self.fetch_timeout_ms == 0 {
            return Err(PlanError::InvalidConfig(
                "fetch_timeout_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RenderConfig::default();
        config.validate().unwrap();
        assert_eq!(config.palette.len(), 6);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = RenderConfig::from_json(
            r##"{"canvas_width": 1200, "canvas_height": 900, "palette": ["#000000", "#ffffff80"]}"##,
        )
        .unwrap();
        assert_eq!(config.canvas_width, 1200);
        assert_eq!(config.palette[1], Rgba::rgba(255, 255, 255, 0x80));
        assert_eq!(config.company_name, "Sun Direct Power");
    }

    #[test]
    fn test_json_roundtrip_keeps_colors() {
        let config = RenderConfig::default();
        let back = RenderConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(RenderConfig::from_json(r#"{"palette": []}"#).is_err());
        assert!(RenderConfig::from_json(r#"{"overlay_opacity": 1.5}"#).is_err());
        assert!(RenderConfig::from_json(r#"{"canvas_width": 0}"#).is_err());
        assert!(RenderConfig::from_json(r##"{"segment_color": "#zzzzzz"}"##).is_err());
        assert!(RenderConfig::from_json(r#"{"segment_line_width": 0}"#).is_err());
        assert!(RenderConfig::from_json(r#"{"panel_stroke_width": -1}"#).is_err());
        assert!(RenderConfig::from_json(r#"{"fetch_timeout_ms": 0}"#).is_err());
    }

    #[test]
    fn test_rejects_unusable_dash() {
        for dash in ["[]", "[15.0]", "[15.0, 10.0, 5.0]", "[15.0, 0.0]", "[15.0, -10.0]"] {
            let json = format!(r#"{{"segment_dash": {}}}"#, dash);
            assert!(
                matches!(RenderConfig::from_json(&json), Err(PlanError::InvalidConfig(_))),
                "accepted dash {}",
                dash
            );
        }
        let config = RenderConfig::from_json(r#"{"segment_dash": [8.0, 4.0, 2.0, 4.0]}"#).unwrap();
        assert_eq!(config.segment_dash.len(), 4);
    }
}
