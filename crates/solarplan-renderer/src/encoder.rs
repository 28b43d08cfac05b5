use crate::error::RenderError;
use crate::surface::RasterSurface;

/// Serialize the finished framebuffer to lossless PNG, consuming it.
pub fn encode_png(surface: RasterSurface<'_>) -> Result<Vec<u8>, RenderError> {
    let pixmap = surface.into_pixmap();
    let png = pixmap
        .encode_png()
        .map_err(|e| RenderError::Encoding(e.to_string()))?;
    log::debug!(
        "encoded {}x{} PNG ({} bytes)",
        pixmap.width(),
        pixmap.height(),
        png.len()
    );
    Ok(png)
}
