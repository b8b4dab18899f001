//! Aspect-preserving size fitting between a photo and a target placement box.

use serde::{Deserialize, Serialize};

/// How a photo is fitted into its target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Fill the box completely; the overflowing dimension is cropped by the renderer.
    Cover,
    /// Fit entirely inside the box, letterboxing one dimension.
    Contain,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedSize {
    pub width: f64,
    pub height: f64,
}

/// Scales a `photo_w × photo_h` photo against a `target_w × target_h` box.
///
/// Returns `None` when any dimension is zero, negative or non-finite.
pub fn fit_size(
    photo_w: f64,
    photo_h: f64,
    target_w: f64,
    target_h: f64,
    mode: FitMode,
) -> Option<FittedSize> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !(usable(photo_w) && usable(photo_h) && usable(target_w) && usable(target_h)) {
        return None;
    }

    let photo_aspect = photo_w / photo_h;
    let target_aspect = target_w / target_h;
    let wider_than_target = photo_aspect > target_aspect;

    let (width, height) = match (mode, wider_than_target) {
        (FitMode::Cover, true) => (target_h * photo_aspect, target_h),
        (FitMode::Cover, false) => (target_w, target_w / photo_aspect),
        (FitMode::Contain, true) => (target_w, target_w / photo_aspect),
        (FitMode::Contain, false) => (target_h * photo_aspect, target_h),
    };

    Some(FittedSize { width, height })
}
