//! Cropping and persisting rendered charts.

use image::{ImageFormat, Rgb, RgbImage, imageops};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use super::ChartError;

/// Crop away the uniform `background` border around the chart.
///
/// The crop is tight with no padding. An image that is entirely background is
/// returned unchanged.
pub fn crop_to_content(image: &RgbImage, background: Rgb<u8>) -> RgbImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel == background {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)),
        });
    }

    match bounds {
        Some((min_x, min_y, max_x, max_y)) => {
            imageops::crop_imm(image, min_x, min_y, max_x - min_x + 1, max_y - min_y + 1).to_image()
        }
        None => image.clone(),
    }
}

/// Encode `image` by the extension of `path` and write it there.
///
/// The image is written to a temporary file next to `path` and renamed into
/// place, so an existing file is either replaced completely or left as it was.
pub fn save_image(image: &RgbImage, path: &Path) -> Result<(), ChartError> {
    let format = match ImageFormat::from_path(path) {
        Ok(ImageFormat::Png) => ImageFormat::Png,
        _ => return Err(ChartError::UnsupportedFormat(path.to_path_buf())),
    };

    let mut encoded = Cursor::new(Vec::new());
    image.write_to(&mut encoded, format)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |source: std::io::Error| ChartError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(encoded.get_ref()).map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;

    log::debug!("Wrote {} bytes to {}", encoded.get_ref().len(), path.display());
    Ok(())
}
