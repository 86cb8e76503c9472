//! Tiling of images into fixed-size windows and reassembly.

mod batch;
mod merge;
mod split;

pub use batch::{merge_batch, split_batch, DEFAULT_WINDOW};
pub use merge::windows_to_img;
pub use split::img_to_windows;

use ndarray::{Array3, Array4};

/// Ordered window sequence for one image, row-major over the tile grid
/// (window, rows, cols).
pub type WindowSequence = Array3<f32>;

/// Batch of per-image window sequences (image, window, rows, cols).
pub type WindowBatch = Array4<f32>;
