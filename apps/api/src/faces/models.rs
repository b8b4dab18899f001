//! Photo and face data shared by the detector and the layout engine.

use serde::{Deserialize, Serialize};

/// Pixel dimensions assumed when the photo bank does not report any.
pub const FALLBACK_PHOTO_WIDTH: u32 = 800;
pub const FALLBACK_PHOTO_HEIGHT: u32 = 600;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// A detected face, normalized to `[0, 1]` against the source image's pixel size.
///
/// `x + width <= 1` and `y + height <= 1` hold for every box the detector returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FaceBox {
    /// Horizontal center of the face, still normalized.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// A photo as handed over by the photo bank, before detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoInput {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl PhotoInput {
    /// Reported pixel dimensions, falling back to 800×600 when missing or zero.
    pub fn dimensions(&self) -> (u32, u32) {
        let width = self.width.filter(|w| *w > 0).unwrap_or(FALLBACK_PHOTO_WIDTH);
        let height = self
            .height
            .filter(|h| *h > 0)
            .unwrap_or(FALLBACK_PHOTO_HEIGHT);
        (width, height)
    }
}

/// A source photo together with its detected faces. Immutable for a layout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoWithFaces {
    pub photo_id: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub faces: Vec<FaceBox>,
}

impl PhotoWithFaces {
    pub fn from_input(input: &PhotoInput, faces: Vec<FaceBox>) -> Self {
        let (width, height) = input.dimensions();
        Self {
            photo_id: input.id.clone(),
            url: input.url.clone(),
            width,
            height,
            faces,
        }
    }

    pub fn has_faces(&self) -> bool {
        !self.faces.is_empty()
    }

    /// Width over height of the source image.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// What a detection batch found, as reported back to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSummary {
    pub total_faces: usize,
    pub photos_with_faces: usize,
    /// False when the model never loaded and every photo was treated as faceless.
    pub models_available: bool,
}

impl DetectionSummary {
    pub fn from_photos(photos: &[PhotoWithFaces], models_available: bool) -> Self {
        Self {
            total_faces: photos.iter().map(|p| p.faces.len()).sum(),
            photos_with_faces: photos.iter().filter(|p| p.has_faces()).count(),
            models_available,
        }
    }
}
