//! Splitting a 2D array into non-overlapping windows.

use ndarray::{ArrayView2, Axis};

use crate::error::{Error, Result};

use super::WindowSequence;

/// Partition an image into a flat sequence of equal-size windows.
///
/// The image is cut into an (h / `tile_h`) x (w / `tile_w`) grid of blocks
/// and the blocks are returned in row-major grid order: all windows of the
/// first block-row left to right, then the second block-row, and so on.
/// [`windows_to_img`](super::windows_to_img) replays the same order, so the
/// pair round-trips exactly.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for a zero tile dimension and
/// [`Error::Indivisible`] when a tile dimension does not evenly divide the
/// matching image dimension.
pub fn img_to_windows(
    image: ArrayView2<'_, f32>,
    tile_h: usize,
    tile_w: usize,
) -> Result<WindowSequence> {
    if tile_h == 0 || tile_w == 0 {
        return Err(Error::InvalidParameter {
            name: "tile size".to_string(),
            reason: "must be non-zero".to_string(),
        });
    }

    let (height, width) = image.dim();

    if height % tile_h != 0 {
        return Err(Error::Indivisible {
            axis: "rows".to_string(),
            size: height,
            tile: tile_h,
        });
    }
    if width % tile_w != 0 {
        return Err(Error::Indivisible {
            axis: "cols".to_string(),
            size: width,
            tile: tile_w,
        });
    }

    let count = (height / tile_h) * (width / tile_w);
    let mut windows = WindowSequence::zeros((count, tile_h, tile_w));

    for (i, block) in image.exact_chunks((tile_h, tile_w)).into_iter().enumerate() {
        windows.index_axis_mut(Axis(0), i).assign(&block);
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_windows_are_row_major_over_the_grid() {
        let image = Array2::from_shape_fn((4, 4), |(y, x)| (y * 4 + x) as f32);

        let windows = img_to_windows(image.view(), 2, 2).unwrap();

        assert_eq!(windows.dim(), (4, 2, 2));
        // top-left, top-right, bottom-left, bottom-right
        assert_eq!(windows[[0, 0, 0]], 0.0);
        assert_eq!(windows[[0, 1, 1]], 5.0);
        assert_eq!(windows[[1, 0, 0]], 2.0);
        assert_eq!(windows[[2, 0, 0]], 8.0);
        assert_eq!(windows[[3, 0, 0]], 10.0);
        assert_eq!(windows[[3, 1, 1]], 15.0);
    }

    #[test]
    fn test_uneven_rows_are_rejected() {
        let image = Array2::<f32>::zeros((5, 4));

        let err = img_to_windows(image.view(), 2, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::Indivisible { ref axis, size: 5, tile: 2 } if axis == "rows"
        ));
    }

    #[test]
    fn test_uneven_cols_are_rejected() {
        let image = Array2::<f32>::zeros((4, 6));

        let err = img_to_windows(image.view(), 2, 4).unwrap_err();
        assert!(matches!(
            err,
            Error::Indivisible { ref axis, size: 6, tile: 4 } if axis == "cols"
        ));
    }

    #[test]
    fn test_zero_tile_is_rejected() {
        let image = Array2::<f32>::zeros((4, 4));

        let err = img_to_windows(image.view(), 0, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }
}
