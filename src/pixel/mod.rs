pub mod grid;
pub mod normalize;

pub use grid::PixelGrid;
pub use normalize::{normalize, normalize_channel};
