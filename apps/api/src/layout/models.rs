//! Spread geometry and placement output types.

use serde::{Deserialize, Serialize};

use crate::faces::FaceBox;

// ────────────────────────────────────────────────────────────────────────────
// Spread geometry
// ────────────────────────────────────────────────────────────────────────────

/// Physical description of one two-page spread, all values in one caller-chosen unit.
///
/// `spine_position` is the x-coordinate of the binding centerline and
/// `spine_width` its physical width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadConfig {
    pub width: f64,
    pub height: f64,
    pub safe_margin: f64,
    pub spine_position: f64,
    pub spine_width: f64,
}

impl SpreadConfig {
    /// The printable interior: the canvas inset by `safe_margin` on every side.
    pub fn safe_area(&self) -> SafeArea {
        SafeArea {
            left: self.safe_margin,
            top: self.safe_margin,
            right: self.width - self.safe_margin,
            bottom: self.height - self.safe_margin,
        }
    }

    /// Rejects geometry no layout can be computed against (negative or non-finite values).
    ///
    /// A spread whose safe area is empty is valid; it simply yields no placements.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("safeMargin", self.safe_margin),
            ("spinePosition", self.spine_position),
            ("spineWidth", self.spine_width),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{name} must be a finite number"));
            }
            if value < 0.0 {
                return Err(format!("{name} cannot be negative"));
            }
        }
        if self.width == 0.0 || self.height == 0.0 {
            return Err("spread width and height must be positive".to_string());
        }
        Ok(())
    }
}

/// Bounds of the safe interior of a spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl SafeArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x >= self.left
            && rect.right() <= self.right
            && rect.y >= self.top
            && rect.bottom() <= self.bottom
    }
}

/// An axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if the rectangles come closer than `gap` to each other.
    ///
    /// With `gap == 0` rectangles that only share an edge count as overlapping.
    pub fn overlaps(&self, other: &Rect, gap: f64) -> bool {
        !(self.right() + gap < other.x
            || self.x > other.right() + gap
            || self.bottom() + gap < other.y
            || self.y > other.bottom() + gap)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placement output
// ────────────────────────────────────────────────────────────────────────────

/// A photo positioned on a spread, in absolute canvas coordinates.
///
/// `faces` is carried over unchanged from the source photo and is interpreted
/// against this placement's own rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPhoto {
    pub id: String,
    pub photo_id: String,
    pub url: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub scale: f64,
    #[serde(default)]
    pub faces: Vec<FaceBox>,
}

impl PlacedPhoto {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// One laid-out spread of a photobook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadLayout {
    pub id: String,
    pub photos: Vec<PlacedPhoto>,
    /// Photos no valid position was found for.
    pub dropped: Vec<String>,
    /// Fraction of grid cells covered by placed photos.
    pub grid_coverage: f64,
}
