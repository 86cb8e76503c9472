//! Per-sample amplitude normalization for bounded-output models.
//!
//! A model with a sigmoid-like final activation can only emit values in
//! [0, 1], so raw signal batches are remapped into that range before they
//! reach the network and restored to their original amplitude afterwards.
//! The remap is affine per sample: [-peak, peak] onto [0, 1], where peak is
//! the sample's maximum absolute value. The peaks are handed back as a
//! ledger so the inverse transform can undo the mapping.

use ndarray::{s, Array4};

use crate::error::{Error, Result};

/// Batch tensor with axes (group, sample, height, width).
pub type SampleBatch = Array4<f32>;

/// Per-sample normalization scalars in group-major order, one per flattened
/// (group x sample) plane.
pub type ScaleLedger = Vec<f32>;

/// Remap every sample of a batch into [0, 1] and record the per-sample peak.
///
/// For each h x w plane independently, computes peak = max |value| and emits
/// (plane / peak) / 2 + 0.5. Ledger entry `i` belongs to flattened sample
/// `i = group * samples_per_group + sample`.
///
/// An all-zero plane has peak 0 and divides to NaN. Callers own the
/// non-zero-energy precondition; the NaN is propagated, not repaired.
#[must_use]
pub fn scale(batch: &SampleBatch) -> (SampleBatch, ScaleLedger) {
    let (groups, samples, _height, _width) = batch.dim();

    let mut scaled = SampleBatch::zeros(batch.raw_dim());
    let mut ledger = ScaleLedger::with_capacity(groups * samples);

    for g in 0..groups {
        for j in 0..samples {
            let plane = batch.slice(s![g, j, .., ..]);
            let peak = plane.iter().fold(0.0_f32, |acc, v| acc.max(v.abs()));
            ledger.push(peak);

            let remapped = plane.mapv(|v| (v / peak) / 2.0 + 0.5);
            scaled.slice_mut(s![g, j, .., ..]).assign(&remapped);
        }
    }

    (scaled, ledger)
}

/// Restore a scaled batch to its original amplitude.
///
/// Inverts [`scale`]: for flattened sample `i`, emits
/// (value - 0.5) * 2 * ledger[i]. The ledger must be the one produced by the
/// forward transform, in the same order; every flattened sample needs its
/// own entry.
///
/// # Errors
///
/// Returns [`Error::LedgerMismatch`] when the ledger length differs from the
/// flattened sample count of the batch.
pub fn inv_scale(batch: &SampleBatch, ledger: &[f32]) -> Result<SampleBatch> {
    let (groups, samples, _height, _width) = batch.dim();

    let expected = groups * samples;
    if ledger.len() != expected {
        return Err(Error::LedgerMismatch {
            expected,
            actual: ledger.len(),
        });
    }

    let mut restored = SampleBatch::zeros(batch.raw_dim());

    for g in 0..groups {
        for j in 0..samples {
            let peak = ledger[g * samples + j];
            let plane = batch.slice(s![g, j, .., ..]).mapv(|v| (v - 0.5) * 2.0 * peak);
            restored.slice_mut(s![g, j, .., ..]).assign(&plane);
        }
    }

    Ok(restored)
}
