//! Base layer: the aerial photograph, or a flat background when it
//! cannot be loaded.

use std::time::Duration;

use image::RgbaImage;
use solarplan_core::{RenderConfig, Rgba};
use solarplan_io::{load_aerial, ImagerySource};

use crate::surface::DrawingSurface;

/// Fetch and decode the aerial photo. Any failure, including a timeout,
/// is logged and yields `None`.
pub async fn load_base_image<S: ImagerySource>(
    source: &S,
    url: &str,
    timeout: Duration,
) -> Option<RgbaImage> {
    match load_aerial(source, url, timeout).await {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("Failed to load aerial image from {}: {}", url, e);
            None
        }
    }
}

/// Fill the canvas with the photo plus a dark wash, or with the fallback
/// background.
pub fn composite<S: DrawingSurface>(
    surface: &mut S,
    aerial: Option<&RgbaImage>,
    config: &RenderConfig,
) {
    match aerial {
        Some(image) => {
            surface.blit_image(image);
            let wash = Rgba::BLACK.with_opacity(config.overlay_opacity);
            let full = surface.bounds();
            surface.fill_rect(full, wash);
        }
        None => {
            log::debug!("drawing on fallback background {}", config.fallback_background);
            surface.clear(config.fallback_background);
        }
    }
}
