//! Drawing loss curves with `plotters` into an in-memory bitmap.

use image::RgbImage;
use plotters::prelude::*;
use std::ops::Range;

use super::ChartError;
use super::font::{AXIS_FAMILY, LEGEND_FAMILY};
use super::style::{self, ChartStyle};
use crate::analyzer::LossSeries;

/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

pub const X_AXIS_LABEL: &str = "epoch";
pub const Y_AXIS_LABEL: &str = "mean loss";

/// Gap between the legend frame and the plot panel edges, in pixels.
const LEGEND_MARGIN: i32 = 10;

fn draw_err(err: impl std::fmt::Display) -> ChartError {
    ChartError::Draw(err.to_string())
}

/// Pad `[min, max]` by [`AXIS_MARGIN`], or fall back to `0..1` without data.
fn padded_range(bounds: Option<(f64, f64)>) -> Range<f64> {
    match bounds {
        None => 0.0..1.0,
        Some((min, max)) if min == max => (min - 0.5)..(max + 0.5),
        Some((min, max)) => {
            let pad = (max - min) * AXIS_MARGIN;
            (min - pad)..(max + pad)
        }
    }
}

fn extend(bounds: Option<(f64, f64)>, value: f64) -> Option<(f64, f64)> {
    Some(match bounds {
        None => (value, value),
        Some((min, max)) => (min.min(value), max.max(value)),
    })
}

/// Axis ranges covering every finite point of every series.
pub fn axis_ranges(series: &[LossSeries]) -> (Range<f64>, Range<f64>) {
    let mut x_bounds = None;
    let mut y_bounds = None;
    for (epoch, loss) in series.iter().flat_map(|s| s.points()) {
        x_bounds = extend(x_bounds, epoch);
        y_bounds = extend(y_bounds, loss);
    }
    (padded_range(x_bounds), padded_range(y_bounds))
}

/// Corners of the legend frame drawn when there are no series.
///
/// The frame sits in the upper-right corner of a plot panel of `panel` pixels
/// and is sized from the legend font's line height.
pub fn empty_legend_frame(panel: (u32, u32), font_px: f64) -> [(i32, i32); 2] {
    let frame_width = (font_px * 3.0).round() as i32;
    let frame_height = (font_px * 1.5).round() as i32;
    let right = panel.0 as i32 - LEGEND_MARGIN;
    let top = LEGEND_MARGIN;
    [(right - frame_width, top), (right, top + frame_height)]
}

/// Render one line per series onto a canvas of `layout.size` pixels.
///
/// Fonts must already be registered under [`LEGEND_FAMILY`] and
/// [`AXIS_FAMILY`].
pub fn render_chart(series: &[LossSeries], layout: &ChartStyle) -> Result<RgbImage, ChartError> {
    let (width, height) = layout.size;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    let (x_range, y_range) = axis_ranges(series);

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&style::FIGURE_BACKGROUND).map_err(draw_err)?;

        let axis_font = style::points_to_pixels(layout.axis_font_size);
        let tick_font = style::points_to_pixels(layout.tick_font_size);

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size((axis_font + tick_font * 2.0) as u32)
            .y_label_area_size((axis_font + tick_font * 4.0) as u32)
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        chart.plotting_area().fill(&style::PANEL_BACKGROUND).map_err(draw_err)?;

        chart
            .configure_mesh()
            .bold_line_style(style::GRID)
            .light_line_style(TRANSPARENT)
            .axis_style(style::PANEL_BACKGROUND)
            .x_desc(X_AXIS_LABEL)
            .y_desc(Y_AXIS_LABEL)
            .axis_desc_style((AXIS_FAMILY, axis_font).into_font().color(&BLACK))
            .label_style((AXIS_FAMILY, tick_font).into_font().color(&style::AXIS_TEXT))
            .draw()
            .map_err(draw_err)?;

        for (index, loss_series) in series.iter().enumerate() {
            let line_style = style::series_color(index).stroke_width(layout.line_width);
            let mut segments = loss_series.segments();
            if segments.is_empty() {
                // keeps a legend entry for a series with nothing to draw
                segments.push(Vec::new());
            }

            for (run, points) in segments.into_iter().enumerate() {
                let annotation = chart
                    .draw_series(LineSeries::new(points, line_style))
                    .map_err(draw_err)?;
                if run == 0 {
                    annotation
                        .label(loss_series.label.as_str())
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
                }
            }
        }

        let legend_font = style::points_to_pixels(layout.legend_font_size);
        if series.is_empty() {
            let area = chart.plotting_area().strip_coord_spec();
            let frame = empty_legend_frame(area.dim_in_pixel(), legend_font);
            area.draw(&Rectangle::new(frame, style::PANEL_BACKGROUND.mix(0.8).filled()))
                .map_err(draw_err)?;
            area.draw(&Rectangle::new(frame, style::LEGEND_BORDER.stroke_width(1)))
                .map_err(draw_err)?;
        } else {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .margin(LEGEND_MARGIN)
                .background_style(style::PANEL_BACKGROUND.mix(0.8))
                .border_style(style::LEGEND_BORDER)
                .label_font((LEGEND_FAMILY, legend_font).into_font())
                .draw()
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
    }

    RgbImage::from_raw(width, height, buffer).ok_or(ChartError::Buffer { width, height })
}
