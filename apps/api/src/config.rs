use anyhow::{bail, Context, Result};

use crate::faces::detector::DetectorTuning;
use crate::layout::{LayoutOptions, OverlapPolicy};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the face detection model bundle.
    pub models_dir: String,
    pub detection_concurrency: usize,
    pub detection_min_face_size: u32,
    pub detection_score_threshold: f64,
    pub fetch_timeout_secs: u64,
    /// Default overlap policy for layouts that don't specify one.
    pub layout_avoid_overlap: bool,
    pub layout_min_gap: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            models_dir: std::env::var("MODELS_DIR").unwrap_or_else(|_| "models".to_string()),
            detection_concurrency: parse_env("DETECTION_CONCURRENCY", 4)?,
            detection_min_face_size: parse_env("DETECTION_MIN_FACE_SIZE", 20)?,
            detection_score_threshold: parse_env("DETECTION_SCORE_THRESHOLD", 2.0)?,
            fetch_timeout_secs: parse_env("FETCH_TIMEOUT_SECS", 30)?,
            layout_avoid_overlap: parse_env("LAYOUT_AVOID_OVERLAP", false)?,
            layout_min_gap: parse_env("LAYOUT_MIN_GAP", 10.0)?,
        };

        if config.layout_min_gap < 0.0 {
            bail!("LAYOUT_MIN_GAP cannot be negative");
        }
        Ok(config)
    }

    pub fn detector_tuning(&self) -> DetectorTuning {
        DetectorTuning {
            min_face_size: self.detection_min_face_size,
            score_threshold: self.detection_score_threshold,
        }
    }

    /// Layout defaults for requests that don't override them.
    pub fn layout_options(&self) -> LayoutOptions {
        let overlap = if self.layout_avoid_overlap {
            OverlapPolicy::Forbid {
                min_gap: self.layout_min_gap,
            }
        } else {
            OverlapPolicy::Allow
        };
        LayoutOptions {
            overlap,
            ..LayoutOptions::default()
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}
