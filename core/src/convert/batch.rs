use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use super::single::dicom_to_png;
use crate::error::Result;

/// Converts every DICOM file in a directory to PNG
///
/// Entries are matched by extension (`.dcm`/`.dicom`, case-insensitive)
/// in whatever order the directory listing yields. Per-file failures are
/// logged and skipped; the batch always runs to completion.
///
/// Returns the successful PNG paths and the DICOM paths that produced
/// them, positionally aligned. The default output directory is
/// `output/<input base name>`, with PNGs in a `png/` subdirectory.
pub fn batch_convert(
    input_directory: &Path,
    output_directory: Option<&Path>,
) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let output_directory = match output_directory {
        Some(path) => path.to_path_buf(),
        None => Path::new("output").join(input_directory.file_name().unwrap_or_default()),
    };
    let png_dir = output_directory.join("png");
    fs::create_dir_all(&png_dir)?;

    info!(
        "Starting conversion for files in directory: {}",
        input_directory.display()
    );

    let mut converted_files = Vec::new();
    let mut dicom_files = Vec::new();
    for entry in fs::read_dir(input_directory)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_dicom_extension(&path) {
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output_path = png_dir.join(format!("{stem}.png"));
        match dicom_to_png(&path, Some(output_path.as_path()), None) {
            Ok(png) => {
                info!("Successfully converted: {}", path.display());
                converted_files.push(png);
                dicom_files.push(path);
            }
            Err(e) => error!("Failed to convert {}: {}", path.display(), e),
        }
    }

    info!(
        "Conversion completed. Converted files: {}",
        converted_files.len()
    );
    Ok((converted_files, dicom_files))
}

/// Accepts `.dcm` and `.dicom` extensions, case-insensitively
pub fn has_dicom_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::write_test_dicom;
    use tempfile::TempDir;

    #[test]
    fn test_has_dicom_extension() {
        assert!(has_dicom_extension(Path::new("a.dcm")));
        assert!(has_dicom_extension(Path::new("a.DCM")));
        assert!(has_dicom_extension(Path::new("a.Dicom")));
        assert!(has_dicom_extension(Path::new("a.DICOM")));
        assert!(!has_dicom_extension(Path::new("a.txt")));
        assert!(!has_dicom_extension(Path::new("a.png")));
        assert!(!has_dicom_extension(Path::new("dcm")));
    }

    #[test]
    fn test_batch_converts_only_dicom_files() {
        let dir = TempDir::new().unwrap();
        write_test_dicom(&dir.path().join("a.dcm"), 2, 2, |_| {});
        write_test_dicom(&dir.path().join("b.DCM"), 2, 2, |_| {});
        write_test_dicom(&dir.path().join("c.Dicom"), 2, 2, |_| {});
        std::fs::write(dir.path().join("notes.txt"), b"not dicom").unwrap();
        std::fs::write(dir.path().join("image.png"), b"not dicom").unwrap();

        let out = dir.path().join("out");
        let (pngs, dcms) = batch_convert(dir.path(), Some(out.as_path())).unwrap();

        assert_eq!(pngs.len(), 3);
        assert_eq!(dcms.len(), 3);
        for png in &pngs {
            assert!(png.is_file());
            assert_eq!(png.parent().unwrap(), out.join("png"));
        }
    }

    #[test]
    fn test_batch_pairs_outputs_with_inputs() {
        let dir = TempDir::new().unwrap();
        write_test_dicom(&dir.path().join("x.dcm"), 2, 2, |_| {});
        write_test_dicom(&dir.path().join("y.dcm"), 2, 2, |_| {});
        write_test_dicom(&dir.path().join("z.dcm"), 2, 2, |_| {});

        let out = dir.path().join("out");
        let (pngs, dcms) = batch_convert(dir.path(), Some(out.as_path())).unwrap();

        // Pairing must hold positionally, whatever the listing order was
        assert_eq!(pngs.len(), dcms.len());
        for (png, dcm) in pngs.iter().zip(&dcms) {
            assert_eq!(png.file_stem(), dcm.file_stem());
        }
    }

    #[test]
    fn test_batch_skips_unreadable_files() {
        let dir = TempDir::new().unwrap();
        write_test_dicom(&dir.path().join("good.dcm"), 2, 2, |_| {});
        std::fs::write(dir.path().join("broken.dcm"), b"garbage bytes").unwrap();

        let out = dir.path().join("out");
        let (pngs, dcms) = batch_convert(dir.path(), Some(out.as_path())).unwrap();

        assert_eq!(pngs.len(), 1);
        assert_eq!(dcms[0].file_name().unwrap(), "good.dcm");
    }

    #[test]
    fn test_batch_empty_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let (pngs, dcms) = batch_convert(dir.path(), Some(out.as_path())).unwrap();
        assert!(pngs.is_empty());
        assert!(dcms.is_empty());
    }
}
