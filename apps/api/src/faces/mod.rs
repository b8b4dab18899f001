// Face Detector: model lifecycle, image loading and normalized face boxes.
// Detection failures never propagate; they degrade to "no faces" for the photo.

pub mod context;
pub mod detector;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod models;

// Re-export the types consumed by the layout engine and route handlers.
pub use context::DetectorContext;
pub use models::{DetectionSummary, FaceBox, PhotoInput, PhotoWithFaces};
