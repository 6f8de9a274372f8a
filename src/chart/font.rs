//! Font loading for chart text.
//!
//! Fonts are read from disk and registered with the plotting backend under a
//! family name, which chart text then refers to.

use plotters::style::{FontStyle, register_font};
use std::fs;
use std::path::Path;

use super::ChartError;

/// Family name the legend font is registered under.
pub const LEGEND_FAMILY: &str = "legend";
/// Family name used for axis labels and tick text.
pub const AXIS_FAMILY: &str = "sans-serif";

/// Group the chart's font families by the file they are loaded from.
///
/// A file shared by the legend and the axis text appears once.
pub fn families_by_file<'a>(legend: &'a Path, axis: &'a Path) -> Vec<(&'a Path, Vec<&'static str>)> {
    if legend == axis {
        vec![(legend, vec![LEGEND_FAMILY, AXIS_FAMILY])]
    } else {
        vec![(legend, vec![LEGEND_FAMILY]), (axis, vec![AXIS_FAMILY])]
    }
}

/// Load the legend and axis fonts, reading each distinct file once.
pub fn load_fonts(legend: &Path, axis: &Path) -> Result<(), ChartError> {
    for (path, families) in families_by_file(legend, axis) {
        load_font(path, &families)?;
    }
    Ok(())
}

/// Read a font file and register it under every name in `families`.
///
/// The font bytes live for the rest of the process, as required by the
/// backend's font registry.
pub fn load_font(path: &Path, families: &[&str]) -> Result<(), ChartError> {
    let bytes = fs::read(path).map_err(|source| ChartError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;

    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    for &family in families {
        register_font(family, FontStyle::Normal, bytes).map_err(|_| ChartError::InvalidFont(path.to_path_buf()))?;
        log::debug!("Registered font {} as {:?}", path.display(), family);
    }
    Ok(())
}
