//! Face detection backends.
//!
//! A backend works on an 8-bit grayscale buffer and reports boxes in pixels;
//! `normalize_faces` turns them into the `[0, 1]` boxes the layout engine uses.

use std::path::Path;

use crate::faces::error::DetectionError;
use crate::faces::models::FaceBox;

/// File name of the SeetaFace frontal model inside the models directory.
pub const SEETA_MODEL_FILE: &str = "seeta_fd_frontal_v1.0.bin";

/// Bounding box of a detected face, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub confidence: f64,
}

/// Pluggable face detection backend.
pub trait FaceDetector: Send + Sync {
    /// Detects faces in a row-major grayscale buffer of `width × height` bytes.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds>;
}

/// Detector tuning knobs, read from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorTuning {
    pub min_face_size: u32,
    pub score_threshold: f64,
}

impl Default for DetectorTuning {
    fn default() -> Self {
        Self {
            min_face_size: 20,
            score_threshold: 2.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SeetaFace backend
// ────────────────────────────────────────────────────────────────────────────

/// Face detector backed by the `rustface` crate (SeetaFace engine).
pub struct RustfaceDetector {
    model: rustface::Model,
    tuning: DetectorTuning,
}

impl RustfaceDetector {
    /// Parses a SeetaFace model from raw bytes. CPU-bound; call from a blocking thread.
    pub fn from_bytes(bytes: &[u8], tuning: DetectorTuning) -> Result<Self, DetectionError> {
        let model = rustface::read_model(std::io::Cursor::new(bytes))
            .map_err(|e| DetectionError::Model(e.to_string()))?;
        Ok(Self { model, tuning })
    }

    /// Loads the model file from `models_dir`.
    pub async fn load(models_dir: &Path, tuning: DetectorTuning) -> Result<Self, DetectionError> {
        let path = models_dir.join(SEETA_MODEL_FILE);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            DetectionError::Model(format!("cannot read {}: {e}", path.display()))
        })?;
        tokio::task::spawn_blocking(move || Self::from_bytes(&bytes, tuning)).await?
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.tuning.min_face_size);
        detector.set_score_thresh(self.tuning.score_threshold);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        detector
            .detect(&rustface::ImageData::new(gray, width, height))
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBounds {
                    x: bbox.x() as f64,
                    y: bbox.y() as f64,
                    width: bbox.width() as f64,
                    height: bbox.height() as f64,
                    confidence: face.score(),
                }
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Converts pixel boxes to normalized boxes, clamping them to the image.
///
/// Boxes that end up with no area inside the image are discarded.
pub fn normalize_faces(bounds: &[FaceBounds], width: u32, height: u32) -> Vec<FaceBox> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let (w, h) = (width as f64, height as f64);

    bounds
        .iter()
        .filter_map(|b| {
            let left = b.x.clamp(0.0, w);
            let top = b.y.clamp(0.0, h);
            let right = (b.x + b.width).clamp(0.0, w);
            let bottom = (b.y + b.height).clamp(0.0, h);
            if right <= left || bottom <= top {
                return None;
            }
            let (x, y) = (left / w, top / h);
            Some(FaceBox {
                x,
                y,
                width: ((right - left) / w).min(1.0 - x),
                height: ((bottom - top) / h).min(1.0 - y),
            })
        })
        .collect()
}
