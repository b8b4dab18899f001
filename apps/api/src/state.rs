use std::sync::Arc;

use crate::config::Config;
use crate::faces::DetectorContext;
use crate::layout::sizing::SizingPolicy;
use crate::layout::LayoutOptions;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Process-wide face detector; the model is loaded once at startup.
    pub detector: Arc<DetectorContext>,
    /// Pluggable size-tier strategy. Default: TieredSizing.
    pub sizing: Arc<dyn SizingPolicy>,
    /// Layout defaults derived from config; requests may override the overlap policy.
    pub layout_options: LayoutOptions,
}
