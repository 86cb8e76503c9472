//! Batch wrappers applying the window transforms image by image.

use ndarray::{s, Array3, ArrayView3, ArrayView4, Axis};

use crate::error::{Error, Result};

use super::{img_to_windows, windows_to_img, WindowBatch};

/// Window side length used by the autoencoder experiments.
pub const DEFAULT_WINDOW: usize = 32;

/// Split every image of a single-channel batch into square windows.
///
/// Input is (n, height, width, 1); output is (n, windows_per_image,
/// `window`, `window`) with each image's windows in the row-major grid order
/// of [`img_to_windows`].
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] for a channel count other than 1, plus
/// any error of [`img_to_windows`] for the per-image split.
pub fn split_batch(batch: ArrayView4<'_, f32>, window: usize) -> Result<WindowBatch> {
    let (images, height, width, channels) = batch.dim();

    if channels != 1 {
        return Err(Error::ShapeMismatch {
            expected: "single-channel (n, h, w, 1) batch".to_string(),
            actual: format!("{channels} channels"),
        });
    }
    if window == 0 {
        return Err(Error::InvalidParameter {
            name: "window".to_string(),
            reason: "must be non-zero".to_string(),
        });
    }

    let per_image = (height / window) * (width / window);
    let mut windows = WindowBatch::zeros((images, per_image, window, window));

    for i in 0..images {
        let sequence = img_to_windows(batch.slice(s![i, .., .., 0]), window, window)?;
        windows.index_axis_mut(Axis(0), i).assign(&sequence);
    }

    Ok(windows)
}

/// Reassemble predicted windows into full square images.
///
/// Input is a flat (n * `windows_per_image`, `window`, `window`) stack, as
/// produced by running a model over the output of [`split_batch`]; output is
/// (n, `output_size`, `output_size`).
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] when the window dimensions differ from
/// `window` or the stack is not a whole number of images, plus any error of
/// [`windows_to_img`] for the per-image merge.
pub fn merge_batch(
    windows: ArrayView3<'_, f32>,
    output_size: usize,
    windows_per_image: usize,
    window: usize,
) -> Result<Array3<f32>> {
    let (total, tile_h, tile_w) = windows.dim();

    if windows_per_image == 0 {
        return Err(Error::InvalidParameter {
            name: "windows_per_image".to_string(),
            reason: "must be non-zero".to_string(),
        });
    }
    if tile_h != window || tile_w != window {
        return Err(Error::ShapeMismatch {
            expected: format!("{window}x{window} windows"),
            actual: format!("{tile_h}x{tile_w} windows"),
        });
    }
    if total % windows_per_image != 0 {
        return Err(Error::ShapeMismatch {
            expected: format!("a multiple of {windows_per_image} windows"),
            actual: format!("{total} windows"),
        });
    }

    let images = total / windows_per_image;
    let mut merged = Array3::zeros((images, output_size, output_size));

    for i in 0..images {
        let group = windows.slice(s![
            i * windows_per_image..(i + 1) * windows_per_image,
            ..,
            ..
        ]);
        let image = windows_to_img(group, output_size, output_size)?;
        merged.index_axis_mut(Axis(0), i).assign(&image);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    fn ramp_batch(images: usize, side: usize) -> Array4<f32> {
        Array4::from_shape_fn((images, side, side, 1), |(i, y, x, _)| {
            (i * side * side + y * side + x) as f32
        })
    }

    #[test]
    fn test_split_honors_the_window_parameter() {
        let batch = ramp_batch(2, 8);

        let windows = split_batch(batch.view(), 4).unwrap();

        assert_eq!(windows.dim(), (2, 4, 4, 4));
        // First window of the second image starts at that image's origin.
        assert_eq!(windows[[1, 0, 0, 0]], 64.0);
    }

    #[test]
    fn test_split_rejects_multi_channel_batches() {
        let batch = Array4::<f32>::zeros((1, 4, 4, 3));

        let err = split_batch(batch.view(), 2).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_split_then_merge_round_trips() {
        let batch = ramp_batch(3, 8);

        let windows = split_batch(batch.view(), 2).unwrap();
        let (images, per_image, _, _) = windows.dim();
        let flat = windows
            .into_shape_with_order((images * per_image, 2, 2))
            .unwrap();

        let merged = merge_batch(flat.view(), 8, per_image, 2).unwrap();

        assert_eq!(merged.dim(), (3, 8, 8));
        assert_eq!(merged.index_axis(Axis(0), 2), batch.slice(s![2, .., .., 0]));
    }

    #[test]
    fn test_merge_rejects_partial_images() {
        let windows = Array3::<f32>::zeros((5, 2, 2));

        let err = merge_batch(windows.view(), 4, 4, 2).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_merge_rejects_foreign_window_size() {
        let windows = Array3::<f32>::zeros((4, 2, 2));

        let err = merge_batch(windows.view(), 4, 4, 3).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }
}
