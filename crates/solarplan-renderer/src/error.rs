use solarplan_core::PlanError;
use thiserror::Error;

/// Unrecoverable drawing failures. Imagery failures never appear here;
/// they fall back to a flat background.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Invalid geometry or configuration.
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Could not allocate a {width}x{height} framebuffer")]
    Surface { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encoding(String),
}

impl RenderError {
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, RenderError::Plan(PlanError::InvalidGeometry(_)))
    }
}
