use thiserror::Error;

/// Why detection failed for one image or for the model as a whole.
///
/// These never reach API callers: the detector context logs them and degrades
/// to "no faces found".
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("HTTP error fetching image: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image fetch returned status {status}")]
    Status { status: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("failed to load face model: {0}")]
    Model(String),

    #[error("detection task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
