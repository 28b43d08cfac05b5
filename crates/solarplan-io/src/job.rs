use serde::{Deserialize, Serialize};

use solarplan_core::{DrawingOptions, Panel, PlanError, RoofSegment};

/// Snapshot of one installation job, as the platform hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingJob {
    pub aerial_image_url: String,
    pub panels: Vec<Panel>,
    #[serde(default)]
    pub roof_segments: Vec<RoofSegment>,
    pub options: DrawingOptions,
}

impl DrawingJob {
    pub fn new(aerial_image_url: &str, options: DrawingOptions) -> Self {
        Self {
            aerial_image_url: aerial_image_url.to_string(),
            panels: Vec::new(),
            roof_segments: Vec::new(),
            options,
        }
    }

    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let job: Self = serde_json::from_str(json)?;
        log::debug!(
            "loaded job '{}' with {} panels and {} roof segments",
            job.options.project_name,
            job.panels.len(),
            job.roof_segments.len()
        );
        Ok(job)
    }
}
