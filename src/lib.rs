//! # patchlab
//!
//! Helper routines for patch-based denoising autoencoder experiments:
//! amplitude normalization into the [0, 1] range of a bounded-output model,
//! tiling of images into fixed-size windows and reassembly, Gaussian noise
//! injection, PSNR, and bookkeeping/plotting for comparing training runs.
//!
//! The two core transforms are inverses by contract: [`scale`]/[`inv_scale`]
//! round-trip through a per-sample scalar ledger, and
//! [`img_to_windows`]/[`windows_to_img`] round-trip through a row-major
//! window order.
//!
//! ## Example
//!
//! ```
//! use ndarray::{s, Array4};
//! use patchlab::{img_to_windows, inv_scale, scale, windows_to_img};
//!
//! # fn main() -> patchlab::Result<()> {
//! let batch = Array4::from_shape_fn((1, 2, 4, 4), |(_, j, y, x)| {
//!     (j + y + x) as f32 - 3.0
//! });
//!
//! let (scaled, ledger) = scale(&batch);
//! let restored = inv_scale(&scaled, &ledger)?;
//! assert_eq!(restored.dim(), batch.dim());
//!
//! let image = batch.slice(s![0, 0, .., ..]);
//! let windows = img_to_windows(image, 2, 2)?;
//! assert_eq!(image, windows_to_img(windows.view(), 4, 4)?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod history;
pub mod metrics;
pub mod noise;
pub mod normalize;
pub mod plot;
pub mod window;

pub use error::{Error, Result};
pub use history::{RunHistory, RunRecord};
pub use metrics::{psnr, PSNR_IDENTICAL};
pub use noise::add_noise;
pub use normalize::{inv_scale, scale, SampleBatch, ScaleLedger};
pub use plot::{plot_metrics, plot_samples};
pub use window::{
    img_to_windows, merge_batch, split_batch, windows_to_img, WindowBatch, WindowSequence,
    DEFAULT_WINDOW,
};
