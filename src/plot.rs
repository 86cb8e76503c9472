//! Rendering of sample grids and metric-curve comparisons.

use std::path::Path;

use image::GrayImage;
use ndarray::{ArrayView3, Axis};
use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::history::RunHistory;

/// Render consecutive samples from several datasets as one grayscale grid.
///
/// Each dataset is an (n, h, w) stack of planes; the grid shows one row per
/// dataset and `count` columns starting at sample `start`, so reconstructions
/// can be compared against their references side by side. Every plane is
/// min/max-stretched to the full 8-bit range independently.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for an empty dataset list, a zero
/// `count`, or a `start`/`count` window that runs past a dataset,
/// [`Error::ShapeMismatch`] when the plane dimensions differ between
/// datasets, and [`Error::ImageSave`] when the file cannot be written.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn plot_samples(
    datasets: &[ArrayView3<'_, f32>],
    start: usize,
    count: usize,
    path: &Path,
) -> Result<()> {
    let Some(first) = datasets.first() else {
        return Err(Error::InvalidParameter {
            name: "datasets".to_string(),
            reason: "must not be empty".to_string(),
        });
    };
    if count == 0 {
        return Err(Error::InvalidParameter {
            name: "count".to_string(),
            reason: "must be non-zero".to_string(),
        });
    }

    let (_, height, width) = first.dim();
    for data in datasets {
        let (samples, h, w) = data.dim();
        if (h, w) != (height, width) {
            return Err(Error::ShapeMismatch {
                expected: format!("{height}x{width} planes"),
                actual: format!("{h}x{w} planes"),
            });
        }
        if start + count > samples {
            return Err(Error::InvalidParameter {
                name: "start".to_string(),
                reason: format!(
                    "samples {start}..{} requested from a dataset of {samples}",
                    start + count
                ),
            });
        }
    }

    let mut grid = GrayImage::new((count * width) as u32, (datasets.len() * height) as u32);

    for (row, data) in datasets.iter().enumerate() {
        for col in 0..count {
            let plane = data.index_axis(Axis(0), start + col);

            let min = plane.iter().fold(f32::INFINITY, |acc, v| acc.min(*v));
            let max = plane.iter().fold(f32::NEG_INFINITY, |acc, v| acc.max(*v));
            let range = max - min;
            let stretch = if range > 0.0 { 255.0 / range } else { 0.0 };

            for ((y, x), &v) in plane.indexed_iter() {
                let value = ((v - min) * stretch).clamp(0.0, 255.0) as u8;
                grid.put_pixel(
                    (col * width + x) as u32,
                    (row * height + y) as u32,
                    image::Luma([value]),
                );
            }
        }
    }

    grid.save(path).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Saved sample grid to {}", path.display());
    Ok(())
}

/// Render metric curves of the selected runs as one line chart.
///
/// Draws one series per (model, metric) pair, labelled "model (metric)",
/// with epochs on the x axis. An empty `models` slice selects every model in
/// the history; model or metric names with no recorded series are skipped.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] when the selection yields no series
/// at all and [`Error::Render`] when the chart cannot be drawn.
#[allow(clippy::cast_precision_loss)]
pub fn plot_metrics(
    history: &RunHistory,
    models: &[&str],
    metrics: &[&str],
    path: &Path,
) -> Result<()> {
    let selected: Vec<&str> = if models.is_empty() {
        history.models().collect()
    } else {
        models.to_vec()
    };

    let mut series: Vec<(String, &[f64])> = Vec::new();
    for model in &selected {
        for metric in metrics {
            if let Some(values) = history.series(model, metric) {
                series.push((format!("{model} ({metric})"), values));
            }
        }
    }

    if series.is_empty() {
        return Err(Error::InvalidParameter {
            name: "models/metrics".to_string(),
            reason: "selection matches no recorded series".to_string(),
        });
    }

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (_, values) in &series {
        for &v in *values {
            if v.is_finite() {
                y_min = y_min.min(v);
                y_max = y_max.max(v);
            }
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return Err(Error::InvalidParameter {
            name: "metrics".to_string(),
            reason: "selected series hold no finite values".to_string(),
        });
    }
    if y_min == y_max {
        y_min -= 0.5;
        y_max += 0.5;
    }
    let pad = (y_max - y_min) * 0.05;

    let epochs = series.iter().map(|(_, v)| v.len()).max().unwrap_or(1);
    let x_upper = epochs.saturating_sub(1).max(1) as f64;

    let render_err =
        |message: String| Error::Render {
            path: path.to_path_buf(),
            message,
        };

    let root = BitMapBackend::new(path, (960, 540)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_err(e.to_string()))?;

    {
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(0.0..x_upper, (y_min - pad)..(y_max + pad))
            .map_err(|e| render_err(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc("Epochs")
            .y_desc(metrics.join(" / "))
            .draw()
            .map_err(|e| render_err(e.to_string()))?;

        for (idx, (label, values)) in series.iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            chart
                .draw_series(LineSeries::new(
                    values.iter().enumerate().map(|(epoch, &v)| (epoch as f64, v)),
                    color.stroke_width(3),
                ))
                .map_err(|e| render_err(e.to_string()))?
                .label(label.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(3))
                });
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| render_err(e.to_string()))?;
    }

    root.present().map_err(|e| render_err(e.to_string()))?;

    tracing::info!("Saved metric chart to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::RunRecord;
    use ndarray::Array3;

    #[test]
    fn test_sample_grid_is_written() {
        let clean = Array3::from_shape_fn((3, 8, 8), |(i, y, x)| (i + y + x) as f32);
        let noisy = &clean + 0.5;
        let path = std::env::temp_dir().join("patchlab_test_sample_grid.png");

        plot_samples(&[clean.view(), noisy.view()], 0, 3, &path).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_sample_window_must_fit_the_dataset() {
        let data = Array3::<f32>::zeros((2, 4, 4));
        let path = std::env::temp_dir().join("patchlab_test_unwritten.png");

        let err = plot_samples(&[data.view()], 1, 2, &path).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_sample_planes_must_agree() {
        let a = Array3::<f32>::zeros((2, 4, 4));
        let b = Array3::<f32>::zeros((2, 4, 6));
        let path = std::env::temp_dir().join("patchlab_test_unwritten.png");

        let err = plot_samples(&[a.view(), b.view()], 0, 1, &path).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let mut history = RunHistory::new();
        let mut run = RunRecord::new("baseline");
        run.push("loss", 1.0);
        history.store(run);
        let path = std::env::temp_dir().join("patchlab_test_unwritten.png");

        let err = plot_metrics(&history, &[], &["psnr"], &path).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }
}
