//! # SolarPlan I/O
//!
//! Everything the renderer consumes from outside the process: aerial
//! imagery fetched over HTTP (bounded by a timeout), decoded photos,
//! label fonts discovered on the host, and JSON job snapshots handed
//! over by the platform.

pub mod fonts;
pub mod imagery;
pub mod job;

pub use fonts::{FontError, FontSet};
pub use imagery::{
    decode_image, fetch_with_timeout, load_aerial, HttpImagery, ImageryError, ImagerySource,
    StaticImagery,
};
pub use job::DrawingJob;
