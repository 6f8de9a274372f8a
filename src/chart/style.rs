//! ggplot-like visual style for loss charts.

use plotters::style::RGBColor;

/// Resolution used to convert point sizes to pixels.
pub const DPI: f64 = 100.0;

/// Figure background outside the plot panel.
pub const FIGURE_BACKGROUND: RGBColor = RGBColor(255, 255, 255);
/// Plot panel fill.
pub const PANEL_BACKGROUND: RGBColor = RGBColor(229, 229, 229);
pub const GRID: RGBColor = RGBColor(255, 255, 255);
/// Tick and axis label text.
pub const AXIS_TEXT: RGBColor = RGBColor(85, 85, 85);
pub const LEGEND_BORDER: RGBColor = RGBColor(204, 204, 204);

/// Line colour cycle.
pub const SERIES_COLORS: [RGBColor; 7] = [
    RGBColor(0xE2, 0x4A, 0x33),
    RGBColor(0x34, 0x8A, 0xBD),
    RGBColor(0x98, 0x8E, 0xD5),
    RGBColor(0x77, 0x77, 0x77),
    RGBColor(0xFB, 0xC1, 0x5E),
    RGBColor(0x8E, 0xBA, 0x42),
    RGBColor(0xFF, 0xB5, 0xB8),
];

/// Colour of the `index`-th series, wrapping around the cycle.
pub fn series_color(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Convert a size in points to pixels at [`DPI`].
pub fn points_to_pixels(points: f64) -> f64 {
    points * DPI / 72.0
}

/// Layout and sizing of a rendered chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Canvas size in pixels before cropping.
    pub size: (u32, u32),
    pub legend_font_size: f64,
    pub axis_font_size: f64,
    pub tick_font_size: f64,
    pub line_width: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            size: (800, 600),
            legend_font_size: 14.0,
            axis_font_size: 12.0,
            tick_font_size: 10.0,
            line_width: 2,
        }
    }
}
