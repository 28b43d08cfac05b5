//! # SolarPlan Renderer
//!
//! Turns an aerial photo, geolocated panels and roof segments into a
//! publication-quality installation plan PNG.
//!
//! The pipeline runs in a fixed order on one framebuffer:
//! base image (or flat fallback), roof segment outlines, string-colored
//! panels, then fixed-position annotations. Every stage draws through
//! [`DrawingSurface`], so the same stages can target the tiny-skia
//! [`RasterSurface`] or a [`RecordingSurface`] for inspection.

pub mod annotations;
pub mod compositor;
pub mod encoder;
pub mod error;
pub mod generator;
pub mod logging;
pub mod panels;
pub mod segments;
pub mod surface;

pub use encoder::encode_png;
pub use error::RenderError;
pub use generator::AerialViewGenerator;
pub use logging::init_logging;
pub use surface::{DrawOp, DrawingSurface, RasterSurface, RecordingSurface, Rect};
