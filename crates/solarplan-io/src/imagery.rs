//! Aerial imagery collaborator.
//!
//! A fetch is a single GET bounded by a timeout. Callers treat every
//! [`ImageryError`] the same way: draw without the photo.

use std::future::Future;
use std::time::Duration;

use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Imagery provider returned status {0}")]
    Status(u16),

    #[error("Imagery fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("Could not decode aerial image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Imagery unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can resolve an imagery URL to raw image bytes.
pub trait ImagerySource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ImageryError>> + Send;
}

/// Plain HTTP GET against the imagery URL.
#[derive(Debug, Clone, Default)]
pub struct HttpImagery {
    client: reqwest::Client,
}

impl HttpImagery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ImagerySource for HttpImagery {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ImageryError>> + Send {
        let request = self.client.get(url);
        async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ImageryError::Status(status.as_u16()));
            }
            let bytes = response.bytes().await?;
            Ok(bytes.to_vec())
        }
    }
}

/// Imagery already held in memory, or a fixed outcome.
#[derive(Debug, Clone)]
pub enum StaticImagery {
    Bytes(Vec<u8>),
    Unavailable(String),
    /// Never resolves; only a timeout ends the fetch.
    Stalled,
}

impl ImagerySource for StaticImagery {
    fn fetch(&self, _url: &str) -> impl Future<Output = Result<Vec<u8>, ImageryError>> + Send {
        let outcome = self.clone();
        async move {
            match outcome {
                StaticImagery::Bytes(bytes) => Ok(bytes),
                StaticImagery::Unavailable(reason) => Err(ImageryError::Unavailable(reason)),
                StaticImagery::Stalled => std::future::pending().await,
            }
        }
    }
}

/// Fetch `url` from `source`, giving up after `timeout`. No retries.
pub async fn fetch_with_timeout<S: ImagerySource>(
    source: &S,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>, ImageryError> {
    match tokio::time::timeout(timeout, source.fetch(url)).await {
        Ok(result) => {
            let bytes = result?;
            log::debug!("fetched {} bytes of imagery from {}", bytes.len(), url);
            Ok(bytes)
        }
        Err(_) => Err(ImageryError::Timeout(timeout)),
    }
}

/// Decode PNG or JPEG bytes into straight-alpha RGBA.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, ImageryError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Fetch and decode in one step.
pub async fn load_aerial<S: ImagerySource>(
    source: &S,
    url: &str,
    timeout: Duration,
) -> Result<RgbaImage, ImageryError> {
    let bytes = fetch_with_timeout(source, url, timeout).await?;
    let image = decode_image(&bytes)?;
    log::debug!("decoded aerial image {}x{}", image.width(), image.height());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[tokio::test]
    async fn test_load_from_memory_source() {
        let source = StaticImagery::Bytes(tiny_png());
        let img = load_aerial(&source, "mem://aerial", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[tokio::test]
    async fn test_stalled_fetch_times_out() {
        let timeout = Duration::from_millis(20);
        let err = fetch_with_timeout(&StaticImagery::Stalled, "mem://slow", timeout)
            .await
            .unwrap_err();
        assert!(matches!(err, ImageryError::Timeout(t) if t == timeout));
    }

    #[tokio::test]
    async fn test_garbage_bytes_fail_to_decode() {
        let source = StaticImagery::Bytes(b"<html>not an image</html>".to_vec());
        let err = load_aerial(&source, "mem://html", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ImageryError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_http_error() {
        // Port 9 (discard) is closed on loopback; the connection is refused.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let err = fetch_with_timeout(
            &HttpImagery::with_client(client),
            "http://127.0.0.1:9/aerial.jpg",
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ImageryError::Http(_) | ImageryError::Timeout(_)));
    }
}
