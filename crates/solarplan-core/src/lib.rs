//! # SolarPlan Core
//!
//! Data model and geometry for annotated aerial installation plans:
//! panels, roof segments, geographic bounds, and the equirectangular
//! lat/lng-to-pixel projection every rendering stage draws through.
//!
//! This crate performs no I/O and owns no pixels.

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod projection;
pub mod strings;

pub use color::Rgba;
pub use config::RenderConfig;
pub use error::PlanError;
pub use geometry::{GeoBounds, GeoBox, GeoPoint, Point};
pub use model::{DrawingOptions, Panel, RoofSegment};
pub use projection::{Projection, ScaleMode};
pub use strings::{PanelString, StringGroups};
