//! patchlab CLI - exercise the windowing/normalization round trip on
//! synthetic data and render comparison plots.

use std::f32::consts::TAU;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ndarray::{s, Array4, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use patchlab::{
    add_noise, inv_scale, merge_batch, plot_metrics, plot_samples, psnr, scale, split_batch,
    RunHistory, RunRecord, SampleBatch, DEFAULT_WINDOW,
};

/// Run a model-free denoising round trip: normalize, window, corrupt,
/// reassemble, restore, and report PSNR.
#[derive(Parser, Debug)]
#[command(name = "patchlab")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of synthetic images in the batch.
    #[arg(long, default_value = "8", value_name = "INT")]
    images: usize,

    /// Image side length; must be divisible by the window size.
    #[arg(long, default_value = "128", value_name = "INT")]
    size: usize,

    /// Window side length for tiling.
    #[arg(short, long, default_value_t = DEFAULT_WINDOW, value_name = "INT")]
    window: usize,

    /// Gaussian noise level added to the normalized windows.
    #[arg(short, long, default_value = "0.1", value_name = "FLOAT")]
    noise_level: f32,

    /// Random seed for reproducibility.
    #[arg(long, value_name = "INT")]
    seed: Option<u64>,

    /// Directory for the rendered comparison grid and PSNR chart.
    #[arg(short, long, default_value = "results", value_name = "DIR")]
    out_dir: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("patchlab={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    if args.window == 0 || args.size % args.window != 0 {
        anyhow::bail!(
            "image size {} is not divisible by window size {}",
            args.size,
            args.window
        );
    }
    if args.images == 0 {
        anyhow::bail!("batch must hold at least one image");
    }

    std::fs::create_dir_all(&args.out_dir).with_context(|| {
        format!("Failed to create output directory {}", args.out_dir.display())
    })?;

    let mut rng = args
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    tracing::info!(
        "Generating {} synthetic {}x{} images...",
        args.images,
        args.size,
        args.size
    );
    let batch = synthetic_batch(args.images, args.size, &mut rng);

    tracing::info!("Normalizing into [0, 1]...");
    let (scaled, ledger) = scale(&batch);

    tracing::info!("Splitting into {0}x{0} windows...", args.window);
    let nhwc = scaled.index_axis(Axis(0), 0).insert_axis(Axis(3));
    let windows = split_batch(nhwc, args.window)?;

    let (images, per_image, _, _) = windows.dim();
    let flat = windows
        .into_shape_with_order((images * per_image, args.window, args.window))
        .context("Failed to flatten the window batch")?;

    tracing::info!("Corrupting windows at noise level {}...", args.noise_level);
    let (noisy, _) = add_noise(&flat, args.noise_level, args.seed);

    tracing::info!("Reassembling full images...");
    let merged = merge_batch(noisy.view(), args.size, per_image, args.window)?;

    let clean = scaled.index_axis(Axis(0), 0);
    let mut record = RunRecord::new("noisy-identity");
    for i in 0..images {
        let value = psnr(clean.index_axis(Axis(0), i), merged.index_axis(Axis(0), i))?;
        record.push("psnr", f64::from(value));
    }

    let mean_psnr = record
        .series("psnr")
        .map(|values| values.iter().sum::<f64>() / values.len() as f64)
        .unwrap_or_default();

    let mut history = RunHistory::new();
    history.store(record);

    tracing::info!("Restoring original amplitude...");
    let restored = inv_scale(&merged.clone().insert_axis(Axis(0)), &ledger)?;
    let peak = restored.iter().fold(0.0_f32, |acc, v| acc.max(v.abs()));
    tracing::debug!("Restored batch peak amplitude: {peak:.3}");

    let grid_path = args.out_dir.join("samples.png");
    plot_samples(&[clean, merged.view()], 0, args.images.min(10), &grid_path)?;

    let chart_path = args.out_dir.join("psnr.png");
    plot_metrics(&history, &[], &["psnr"], &chart_path)?;

    println!(
        "Round trip over {} images: mean PSNR {:.2} dB, plots in {}",
        args.images,
        mean_psnr,
        args.out_dir.display()
    );

    Ok(())
}

/// Build a (1, images, size, size) batch of band-limited test signals with
/// per-sample amplitude and frequency drawn from the RNG.
#[allow(clippy::cast_precision_loss)]
fn synthetic_batch(images: usize, size: usize, rng: &mut StdRng) -> SampleBatch {
    let mut batch = Array4::zeros((1, images, size, size));

    for i in 0..images {
        let amplitude = rng.random_range(0.5_f32..2.0);
        let fx = rng.random_range(1_u32..6) as f32;
        let fy = rng.random_range(1_u32..6) as f32;

        let mut plane = batch.slice_mut(s![0, i, .., ..]);
        for ((y, x), value) in plane.indexed_iter_mut() {
            let tx = x as f32 / size as f32;
            let ty = y as f32 / size as f32;
            *value = amplitude * (TAU * fx * tx).sin() * (TAU * fy * ty).cos();
        }
    }

    batch
}
