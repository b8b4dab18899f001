// Photobook smart layout engine.
// Places photos on a spread so that detected faces stay clear of the spine.
// Layout is CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod adjuster;
pub mod book;
pub mod fit;
pub mod formats;
pub mod generator;
pub mod grid;
pub mod handlers;
pub mod models;
pub mod placement;
pub mod random;
pub mod sizing;
pub mod spine;

// Re-export the public API consumed by handlers and state.
pub use formats::BookFormat;
pub use generator::LayoutOptions;
pub use models::{PlacedPhoto, SpreadConfig, SpreadLayout};
pub use placement::OverlapPolicy;
