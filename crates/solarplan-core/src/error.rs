use thiserror::Error;

/// Errors raised while validating drawing input or configuration.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The panel and roof-segment coordinates cannot define a drawable area.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid color '{0}', expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
