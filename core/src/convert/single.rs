use std::fs;
use std::path::{Path, PathBuf};

use dicom::object::open_file;
use dicom_pixeldata::image::GrayImage;
use dicom_pixeldata::PixelDecoder;
use log::info;

use super::window::{apply_window, normalize_to_u8, Window};
use crate::error::{MammoprepError, Result};
use crate::extraction::tags::PIXEL_DATA;

/// Default directory for PNGs when no output path is given
pub const DEFAULT_OUTPUT_DIR: &str = "output/png";

/// Converts one DICOM file to an 8-bit single-channel PNG
///
/// When `output_path` is absent the PNG lands in [`DEFAULT_OUTPUT_DIR`];
/// when given and not ending in `.png` it is treated as a directory and
/// the input's base name is appended. Missing directories are created in
/// the directory cases. Returns the resolved output path after the
/// encoded file is written.
///
/// # Errors
///
/// [`MammoprepError::FileNotFound`] and [`MammoprepError::InvalidDicom`]
/// for unreadable inputs, [`MammoprepError::NoPixelData`] when the
/// dataset has no PixelData element, and
/// [`MammoprepError::Conversion`] for any other decode/encode failure.
pub fn dicom_to_png(
    dicom_path: &Path,
    output_path: Option<&Path>,
    window: Option<Window>,
) -> Result<PathBuf> {
    if !dicom_path.is_file() {
        return Err(MammoprepError::FileNotFound(dicom_path.to_path_buf()));
    }
    let obj = open_file(dicom_path).map_err(|e| MammoprepError::InvalidDicom {
        path: dicom_path.to_path_buf(),
        message: e.to_string(),
    })?;

    if obj.element(PIXEL_DATA).is_err() {
        return Err(MammoprepError::NoPixelData(dicom_path.to_path_buf()));
    }

    let decoded = obj
        .decode_pixel_data()
        .map_err(|e| MammoprepError::conversion(dicom_path, e))?;
    if decoded.samples_per_pixel() != 1 {
        return Err(MammoprepError::conversion(
            dicom_path,
            format!(
                "unsupported samples per pixel: {}",
                decoded.samples_per_pixel()
            ),
        ));
    }
    let rows = decoded.rows();
    let columns = decoded.columns();

    let mut pixels: Vec<f64> = decoded
        .to_vec()
        .map_err(|e| MammoprepError::conversion(dicom_path, e))?;
    // First frame only; multi-frame data is laid out frame-major
    pixels.truncate(rows as usize * columns as usize);

    if let Some(window) = window {
        apply_window(&mut pixels, window);
    }
    let normalized = normalize_to_u8(&pixels);

    let out = resolve_output_path(dicom_path, output_path)?;
    let image = GrayImage::from_raw(columns, rows, normalized).ok_or_else(|| {
        MammoprepError::conversion(dicom_path, "pixel buffer does not match image dimensions")
    })?;
    image
        .save(&out)
        .map_err(|e| MammoprepError::conversion(dicom_path, e))?;

    info!("Saved PNG file: {}", out.display());
    Ok(out)
}

/// Applies the output path policy for a single conversion
fn resolve_output_path(dicom_path: &Path, output_path: Option<&Path>) -> Result<PathBuf> {
    let stem = dicom_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match output_path {
        None => {
            let dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
            fs::create_dir_all(&dir)?;
            Ok(dir.join(format!("{stem}.png")))
        }
        Some(path) if is_png_path(path) => Ok(path.to_path_buf()),
        Some(dir) => {
            fs::create_dir_all(dir)?;
            Ok(dir.join(format!("{stem}.png")))
        }
    }
}

fn is_png_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}
