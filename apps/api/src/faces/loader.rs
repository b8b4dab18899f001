//! Image loading for detection: fetch bytes, decode, convert to grayscale.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use crate::faces::error::DetectionError;

/// A decoded 8-bit grayscale image ready for a detector backend.
#[derive(Debug, Clone)]
pub struct GrayImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Where image bytes come from. The HTTP source is the default; tests swap in
/// an in-memory source.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, DetectionError>;
}

/// Fetches `http(s)://` URLs over HTTP and treats anything else as a local path
/// (with or without a `file://` prefix).
#[derive(Clone)]
pub struct HttpImageSource {
    client: Client,
}

impl HttpImageSource {
    pub fn new(timeout: Duration) -> Result<Self, DetectionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<Bytes, DetectionError> {
        if url.starts_with("http://") || url.starts_with("https://") {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(DetectionError::Status {
                    status: status.as_u16(),
                });
            }
            let body = response.bytes().await?;
            debug!(url, bytes = body.len(), "Fetched image");
            return Ok(body);
        }

        let path = url.strip_prefix("file://").unwrap_or(url);
        let data = tokio::fs::read(path).await?;
        Ok(Bytes::from(data))
    }
}

/// Decodes any supported format into grayscale. CPU-bound; call from a blocking thread.
pub fn decode_grayscale(data: &[u8]) -> Result<GrayImage, DetectionError> {
    let image = image::load_from_memory(data)?;
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(DetectionError::ZeroDimensions);
    }
    Ok(GrayImage {
        pixels: gray.into_raw(),
        width,
        height,
    })
}
