//! Photobook formats sold by the studio and the spread geometry they imply.
//!
//! Dimensions are millimetres. A spread is two facing pages, so its width is
//! twice the page width and the spine sits on the seam between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::models::SpreadConfig;

/// Inset from every edge used by the photobook editor.
pub const EDITOR_SAFE_MARGIN_MM: f64 = 15.0;
/// Spine width assumed by the photobook editor for every format.
pub const EDITOR_SPINE_WIDTH_MM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookFormat {
    #[serde(rename = "20x20")]
    Square20,
    #[serde(rename = "21x30")]
    Portrait21x30,
    #[serde(rename = "30x30")]
    Square30,
}

impl BookFormat {
    pub const ALL: [BookFormat; 3] = [
        BookFormat::Square20,
        BookFormat::Portrait21x30,
        BookFormat::Square30,
    ];

    /// `(width, height)` of a single page in millimetres.
    pub fn page_size_mm(&self) -> (f64, f64) {
        match self {
            BookFormat::Square20 => (200.0, 200.0),
            BookFormat::Portrait21x30 => (210.0, 300.0),
            BookFormat::Square30 => (300.0, 300.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookFormat::Square20 => "20x20",
            BookFormat::Portrait21x30 => "21x30",
            BookFormat::Square30 => "30x30",
        }
    }

    /// Spread geometry for this format with the editor's margin and spine width.
    pub fn spread_config(&self) -> SpreadConfig {
        let (page_width, page_height) = self.page_size_mm();
        SpreadConfig {
            width: page_width * 2.0,
            height: page_height,
            safe_margin: EDITOR_SAFE_MARGIN_MM,
            spine_position: page_width,
            spine_width: EDITOR_SPINE_WIDTH_MM,
        }
    }
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['×', '*'], "x");
        BookFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| {
                format!("unknown photobook format '{s}' (expected one of 20x20, 21x30, 30x30)")
            })
    }
}
