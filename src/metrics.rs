//! Signal-quality metrics for comparing clean and degraded arrays.

use ndarray::{ArrayView, Dimension};

use crate::error::{Error, Result};

/// PSNR value reported when the two arrays are identical (MSE of zero).
pub const PSNR_IDENTICAL: f32 = 100.0;

/// Peak signal-to-noise ratio between a clean reference and a degraded
/// signal, in dB.
///
/// Computed as 20 * log10(peak / sqrt(mse)) with the peak taken from the
/// degraded array. Identical inputs have an MSE of zero, where the ratio is
/// undefined; [`PSNR_IDENTICAL`] is returned instead.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] when the arrays differ in shape and
/// [`Error::InvalidParameter`] for empty arrays.
#[allow(clippy::cast_precision_loss)]
pub fn psnr<D>(clean: ArrayView<'_, f32, D>, noisy: ArrayView<'_, f32, D>) -> Result<f32>
where
    D: Dimension,
{
    if clean.shape() != noisy.shape() {
        return Err(Error::ShapeMismatch {
            expected: format!("{:?}", clean.shape()),
            actual: format!("{:?}", noisy.shape()),
        });
    }
    if clean.is_empty() {
        return Err(Error::InvalidParameter {
            name: "clean".to_string(),
            reason: "arrays must be non-empty".to_string(),
        });
    }

    let mse = clean
        .iter()
        .zip(noisy.iter())
        .map(|(c, n)| (c - n).powi(2))
        .sum::<f32>()
        / clean.len() as f32;

    if mse == 0.0 {
        return Ok(PSNR_IDENTICAL);
    }

    let peak = noisy.iter().fold(f32::NEG_INFINITY, |acc, v| acc.max(*v));

    Ok(20.0 * (peak / mse.sqrt()).log10())
}
