//! Detector Context: the process-wide face detector and its readiness state.
//!
//! # Lifecycle
//! - Constructed once at startup and shared via `Arc` in `AppState`.
//! - `initialize` loads the model at most once; a failed load leaves the context
//!   not ready and a later call may retry.
//! - While not ready, every detection returns no faces.
//!
//! # Failure semantics
//! Nothing here returns an error to the caller. Model load failures, unreachable
//! images, decode errors and backend panics are logged and degrade to "no faces",
//! so one bad photo never aborts a batch.

use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::faces::detector::{normalize_faces, DetectorTuning, FaceDetector, RustfaceDetector};
use crate::faces::error::DetectionError;
use crate::faces::loader::{decode_grayscale, ImageSource};
use crate::faces::models::{FaceBox, PhotoInput, PhotoWithFaces};

/// Default number of images processed concurrently by `detect_faces_for_all`.
pub const DEFAULT_DETECTION_CONCURRENCY: usize = 4;
/// Upper bound on the detection fan-out.
pub const MAX_DETECTION_CONCURRENCY: usize = 8;

pub struct DetectorContext {
    models_dir: PathBuf,
    tuning: DetectorTuning,
    concurrency: usize,
    source: Arc<dyn ImageSource>,
    backend: OnceCell<Arc<dyn FaceDetector>>,
}

impl DetectorContext {
    pub fn new(
        models_dir: impl Into<PathBuf>,
        tuning: DetectorTuning,
        concurrency: usize,
        source: Arc<dyn ImageSource>,
    ) -> Self {
        Self {
            models_dir: models_dir.into(),
            tuning,
            concurrency: concurrency.clamp(1, MAX_DETECTION_CONCURRENCY),
            source,
            backend: OnceCell::new(),
        }
    }

    /// A context that is ready from the start with a caller-supplied backend.
    pub fn with_backend(
        backend: Arc<dyn FaceDetector>,
        concurrency: usize,
        source: Arc<dyn ImageSource>,
    ) -> Self {
        Self {
            models_dir: PathBuf::new(),
            tuning: DetectorTuning::default(),
            concurrency: concurrency.clamp(1, MAX_DETECTION_CONCURRENCY),
            source,
            backend: OnceCell::new_with(Some(backend)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.backend.initialized()
    }

    /// Loads the SeetaFace model from the models directory. Returns whether the
    /// context is ready afterwards. No-op once a load has succeeded.
    pub async fn initialize(&self) -> bool {
        let result = self
            .backend
            .get_or_try_init(|| async {
                let detector = RustfaceDetector::load(&self.models_dir, self.tuning).await?;
                Ok::<_, DetectionError>(Arc::new(detector) as Arc<dyn FaceDetector>)
            })
            .await;

        match result {
            Ok(_) => {
                info!(models_dir = %self.models_dir.display(), "Face detection model ready");
                true
            }
            Err(e) => {
                warn!(
                    models_dir = %self.models_dir.display(),
                    error = %e,
                    "Face detection model failed to load; photos will be laid out without face constraints"
                );
                false
            }
        }
    }

    /// Normalized face boxes for one image. Empty on any failure or when not ready.
    pub async fn detect_faces(&self, url: &str) -> Vec<FaceBox> {
        let Some(backend) = self.backend.get() else {
            debug!(url, "Detector not ready; treating image as faceless");
            return Vec::new();
        };

        match self.try_detect(backend.clone(), url).await {
            Ok(faces) => faces,
            Err(e) => {
                warn!(url, error = %e, "Face detection failed; treating image as faceless");
                Vec::new()
            }
        }
    }

    /// Detects faces for every photo with bounded fan-out. Output order matches input order.
    pub async fn detect_faces_for_all(&self, photos: &[PhotoInput]) -> Vec<PhotoWithFaces> {
        let results: Vec<PhotoWithFaces> = stream::iter(photos.iter().cloned())
            .map(|photo| async move {
                let faces = self.detect_faces(&photo.url).await;
                PhotoWithFaces::from_input(&photo, faces)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let total_faces: usize = results.iter().map(|p| p.faces.len()).sum();
        info!(
            photos = results.len(),
            faces = total_faces,
            ready = self.is_ready(),
            "Face detection batch complete"
        );
        results
    }

    async fn try_detect(
        &self,
        backend: Arc<dyn FaceDetector>,
        url: &str,
    ) -> Result<Vec<FaceBox>, DetectionError> {
        let data = self.source.fetch(url).await?;

        tokio::task::spawn_blocking(move || -> Result<Vec<FaceBox>, DetectionError> {
            let gray = decode_grayscale(&data)?;
            let bounds = backend.detect(&gray.pixels, gray.width, gray.height);
            Ok(normalize_faces(&bounds, gray.width, gray.height))
        })
        .await?
    }
}
