//! Synthetic Gaussian noise injection for denoising experiments.

use ndarray::{Array, Dimension};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Corrupt normalized data with scaled Gaussian noise.
///
/// Draws an i.i.d. N(0, 1) field of the input's shape, scales it by
/// `noise_level`, and returns `(clip(data + noise, 0, 1), noise)`. The raw
/// noise field is handed back alongside the clipped sum so a model can be
/// trained to predict the noise itself.
///
/// Pass `Some(seed)` for reproducible corruption, `None` for OS entropy.
#[must_use]
pub fn add_noise<D>(
    data: &Array<f32, D>,
    noise_level: f32,
    seed: Option<u64>,
) -> (Array<f32, D>, Array<f32, D>)
where
    D: Dimension,
{
    let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let normal = Normal::new(0.0_f32, 1.0).expect("valid distribution");

    let noise = data.mapv(|_| noise_level * normal.sample(&mut rng));
    let noisy = (data + &noise).mapv(|v| v.clamp(0.0, 1.0));

    (noisy, noise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_output_stays_in_unit_range() {
        let data = Array2::from_elem((16, 16), 0.5_f32);

        let (noisy, _) = add_noise(&data, 2.0, Some(7));

        assert!(noisy.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let data = Array2::from_elem((8, 8), 0.5_f32);

        let (first, first_noise) = add_noise(&data, 0.3, Some(42));
        let (second, second_noise) = add_noise(&data, 0.3, Some(42));

        assert_eq!(first, second);
        assert_eq!(first_noise, second_noise);
    }

    #[test]
    fn test_zero_level_is_identity() {
        let data = Array2::from_shape_fn((4, 4), |(y, x)| (y + x) as f32 / 8.0);

        let (noisy, noise) = add_noise(&data, 0.0, Some(1));

        assert_eq!(noisy, data);
        assert!(noise.iter().all(|&v| v == 0.0));
    }
}
