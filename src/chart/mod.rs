//! Loss-curve chart rendering.
//!
//! Turns the loss series of one or more experiment runs into a single
//! ggplot-styled line chart and writes it out as a tightly cropped image.
//!
//! ## Module Organization
//!
//! - `style`: colours, sizes and the series colour cycle
//! - `font`: loading font files into the backend's font registry
//! - `render`: drawing the chart into an in-memory bitmap
//! - `output`: cropping and atomically writing the image

pub mod font;
pub mod output;
pub mod render;
pub mod style;

use anyhow::Context;
use image::Rgb;
use std::path::PathBuf;
use thiserror::Error;

use crate::analyzer::{LossSeries, load_loss_series};
use crate::config::PlotConfig;

pub use output::{crop_to_content, save_image};
pub use render::render_chart;
pub use style::ChartStyle;

/// Error type for chart rendering and output failures.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to read font file {}: {source}", path.display())]
    FontRead { path: PathBuf, source: std::io::Error },
    #[error("invalid font file: {}", .0.display())]
    InvalidFont(PathBuf),
    #[error("failed to draw chart: {0}")]
    Draw(String),
    #[error("chart buffer does not match a {width}x{height} image")]
    Buffer { width: u32, height: u32 },
    #[error("unsupported image format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
}

impl From<&PlotConfig> for ChartStyle {
    fn from(config: &PlotConfig) -> Self {
        Self {
            size: (config.width, config.height),
            legend_font_size: config.legend_font_size,
            ..Self::default()
        }
    }
}

/// Load the loss series of every configured input, in order.
pub fn load_all_series(config: &PlotConfig) -> anyhow::Result<Vec<LossSeries>> {
    let labels_used = config.inputs.len();
    if config.labels.len() > labels_used {
        log::warn!(
            "{} legend labels configured for {} inputs, ignoring {:?}",
            config.labels.len(),
            labels_used,
            &config.labels[labels_used..]
        );
    }

    config
        .inputs
        .iter()
        .enumerate()
        .map(|(index, path)| load_loss_series(path, config.label_for(index, path)))
        .collect()
}

/// Read all logs, render the comparison chart and write it to `config.output`.
///
/// Every failure happens before the output file is touched.
pub fn plot_loss_curves(config: &PlotConfig) -> anyhow::Result<()> {
    let series = load_all_series(config)?;

    font::load_fonts(&config.legend_font, config.axis_font()).context("Failed to load chart fonts")?;
    log::info!("Using legend font {}", config.legend_font.display());

    let image = render_chart(&series, &ChartStyle::from(config)).context("Failed to render chart")?;
    let background = style::FIGURE_BACKGROUND;
    let image = crop_to_content(&image, Rgb([background.0, background.1, background.2]));

    save_image(&image, &config.output).with_context(|| format!("Failed to save chart: {}", config.output.display()))?;
    log::info!(
        "Saved {}x{} chart with {} series to {}",
        image.width(),
        image.height(),
        series.len(),
        config.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};

    const SYSTEM_FONTS: [&str; 6] = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/Library/Fonts/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ];

    fn system_font() -> Option<PathBuf> {
        let font = SYSTEM_FONTS.iter().map(PathBuf::from).find(|path| path.is_file());
        if font.is_none() {
            eprintln!("no system font found, skipping render test");
        }
        font
    }

    /// Two short runs plus a config pointing at them.
    fn two_run_config(dir: &Path, legend_font: PathBuf) -> PlotConfig {
        let first = dir.join("20").join("sda.log");
        let second = dir.join("26").join("sda.log");
        for (path, content) in [(&first, "0 0 1.0\n0 0 0.5"), (&second, "0 0 2.0\n0 0 1.0")] {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        PlotConfig {
            inputs: vec![first, second],
            labels: vec!["実験1".to_string(), "実験2".to_string(), "実験3".to_string()],
            output: dir.join("loss.png"),
            legend_font,
            ..PlotConfig::with_workspace(dir)
        }
    }

    #[test]
    fn series_follow_inputs_and_labels_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = two_run_config(dir.path(), PathBuf::from("unused.ttf"));

        let series = load_all_series(&config).unwrap();
        assert_eq!(
            series,
            vec![
                LossSeries::new("実験1", vec![1.0, 0.5]),
                LossSeries::new("実験2", vec![2.0, 1.0]),
            ]
        );
        let epochs: Vec<_> = series[0].points().map(|(epoch, _)| epoch).collect();
        assert_eq!(epochs, vec![0.0, 1.0]);
    }

    #[test]
    fn missing_font_leaves_previous_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config = two_run_config(dir.path(), dir.path().join("no-such-font.ttf"));
        fs::write(&config.output, b"previous").unwrap();

        let err = plot_loss_curves(&config).unwrap_err();
        assert!(matches!(err.downcast_ref::<ChartError>(), Some(ChartError::FontRead { .. })));
        assert_eq!(fs::read(&config.output).unwrap(), b"previous");
    }

    #[test]
    fn malformed_line_fails_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = two_run_config(dir.path(), PathBuf::from("unused.ttf"));
        fs::write(&config.inputs[1], "0 0 2.0\n0 0\n").unwrap();

        let err = plot_loss_curves(&config).unwrap_err();
        assert!(err.downcast_ref::<crate::analyzer::ParseError>().is_some());
        assert!(!config.output.exists());
    }

    #[test]
    fn missing_input_fails_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = two_run_config(dir.path(), PathBuf::from("unused.ttf"));
        config.inputs.push(dir.path().join("missing").join("sda.log"));

        assert!(plot_loss_curves(&config).is_err());
        assert!(!config.output.exists());
    }

    #[test]
    fn renders_cropped_png() {
        let Some(font) = system_font() else { return };
        let dir = tempfile::tempdir().unwrap();
        let config = two_run_config(dir.path(), font);

        plot_loss_curves(&config).unwrap();

        let image = image::open(&config.output).unwrap().to_rgb8();
        let (width, height) = image.dimensions();
        assert!(width > 0 && width < config.width);
        assert!(height > 0 && height < config.height);
        assert!(image.pixels().any(|pixel| pixel.0 == [0xE2, 0x4A, 0x33]));
        assert!(image.pixels().any(|pixel| pixel.0 == [0x34, 0x8A, 0xBD]));
    }

    #[test]
    fn identical_runs_write_identical_bytes() {
        let Some(font) = system_font() else { return };
        let dir = tempfile::tempdir().unwrap();
        let config = two_run_config(dir.path(), font);

        plot_loss_curves(&config).unwrap();
        let first = fs::read(&config.output).unwrap();
        plot_loss_curves(&config).unwrap();
        assert_eq!(fs::read(&config.output).unwrap(), first);
    }

    #[test]
    fn zero_inputs_still_write_chart() {
        let Some(font) = system_font() else { return };
        let dir = tempfile::tempdir().unwrap();
        let config = PlotConfig {
            inputs: vec![],
            output: dir.path().join("empty.png"),
            legend_font: font,
            ..PlotConfig::with_workspace(dir.path())
        };

        plot_loss_curves(&config).unwrap();
        let image = image::open(&config.output).unwrap().to_rgb8();
        assert!(image.pixels().any(|pixel| pixel.0 == [229, 229, 229]));

        // The legend frame's top edge is a long horizontal run of border colour
        // in the upper-right quarter of the chart.
        let border = [style::LEGEND_BORDER.0, style::LEGEND_BORDER.1, style::LEGEND_BORDER.2];
        let (width, height) = image.dimensions();
        let frame_edge = (0..height / 2).find_map(|y| {
            let mut run_start = None;
            for x in 0..width {
                if image.get_pixel(x, y).0 == border {
                    let start = *run_start.get_or_insert(x);
                    if x - start + 1 >= 40 {
                        return Some((start, y));
                    }
                } else {
                    run_start = None;
                }
            }
            None
        });
        let (x, _) = frame_edge.expect("legend frame edge");
        assert!(x > width / 2);
    }
}
