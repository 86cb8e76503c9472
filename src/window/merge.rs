//! Reassembling a full image from its window sequence.

use ndarray::{s, Array2, ArrayView3};

use crate::error::{Error, Result};

/// Rebuild a `height` x `width` image from a row-major window sequence.
///
/// Exact inverse of [`img_to_windows`](super::img_to_windows): window `i`
/// lands at grid position (i / cols, i % cols), where cols is the number of
/// window columns. Pure data movement, so the round trip is bit-exact.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for zero window dimensions,
/// [`Error::Indivisible`] when the window dimensions do not evenly divide
/// the output dimensions, and [`Error::ShapeMismatch`] when the window count
/// does not cover the output area exactly.
pub fn windows_to_img(
    windows: ArrayView3<'_, f32>,
    height: usize,
    width: usize,
) -> Result<Array2<f32>> {
    let (count, tile_h, tile_w) = windows.dim();

    if tile_h == 0 || tile_w == 0 {
        return Err(Error::InvalidParameter {
            name: "window dimensions".to_string(),
            reason: "must be non-zero".to_string(),
        });
    }

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

    let expected = (height / tile_h) * (width / tile_w);
    if count != expected {
        return Err(Error::ShapeMismatch {
            expected: format!("{expected} windows of {tile_h}x{tile_w}"),
            actual: format!("{count} windows"),
        });
    }

    let cols = width / tile_w;
    let mut image = Array2::zeros((height, width));

    for (i, tile) in windows.outer_iter().enumerate() {
        let row = i / cols;
        let col = i % cols;
        image
            .slice_mut(s![
                row * tile_h..(row + 1) * tile_h,
                col * tile_w..(col + 1) * tile_w
            ])
            .assign(&tile);
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::super::img_to_windows;
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_round_trip_is_exact() {
        let image = Array2::from_shape_fn((6, 8), |(y, x)| (y * 8 + x) as f32);

        let windows = img_to_windows(image.view(), 3, 2).unwrap();
        let rebuilt = windows_to_img(windows.view(), 6, 8).unwrap();

        assert_eq!(rebuilt, image);
    }

    #[test]
    fn test_window_count_must_cover_the_area() {
        let windows = Array3::<f32>::zeros((3, 2, 2));

        let err = windows_to_img(windows.view(), 4, 4).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_output_must_divide_by_window() {
        let windows = Array3::<f32>::zeros((4, 2, 2));

        let err = windows_to_img(windows.view(), 5, 4).unwrap_err();
        assert!(matches!(
            err,
            Error::Indivisible { ref axis, size: 5, tile: 2 } if axis == "rows"
        ));
    }
}
