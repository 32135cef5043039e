use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use serde::Serialize;

use crate::api::MetadataReader;
use crate::error::Result;

/// Default root for CSV output when no save directory is given
pub const DEFAULT_OUTPUT_ROOT: &str = "output";

/// One CSV row per converted image
///
/// `exam_id` is a placeholder constant carried over from the upstream
/// data layout; it is always 0.
#[derive(Debug, Serialize)]
struct PatientRow<'a> {
    patient_id: &'a str,
    exam_id: u32,
    laterality: &'a str,
    view: &'a str,
    file_path: String,
}

/// Writes patient and study information for converted PNGs to a CSV file
///
/// For each PNG the sibling DICOM path (same stem, `.dcm` extension,
/// under `dicom_path`) is re-read for metadata. Rows whose DICOM file
/// cannot be read are logged and skipped. An empty `png_files` list
/// writes nothing and returns `Ok(None)`.
///
/// Naming: file-list mode (`from_files`) uses `patient_info.csv`;
/// directory mode names the CSV after the input directory's base name.
/// `save_path` overrides the default `output/` root for either mode.
pub fn write_to_csv(
    png_files: &[PathBuf],
    dicom_path: &Path,
    from_files: bool,
    save_path: Option<&Path>,
) -> Result<Option<PathBuf>> {
    if png_files.is_empty() {
        warn!("No PNG files found for writing to CSV");
        return Ok(None);
    }

    let root = save_path.unwrap_or(Path::new(DEFAULT_OUTPUT_ROOT));
    if save_path.is_none() {
        fs::create_dir_all(root)?;
    }
    let csv_file_path = if from_files {
        root.join("patient_info.csv")
    } else {
        let base = dicom_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        root.join(format!("{base}.csv"))
    };

    let mut writer = csv::Writer::from_path(&csv_file_path)?;
    for png in png_files {
        let stem = png
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dicom_file = dicom_path.join(format!("{stem}.dcm"));
        let reader = match MetadataReader::open(&dicom_file) {
            Ok(reader) => reader,
            Err(e) => {
                error!("Failed to process {}: {}", dicom_file.display(), e);
                continue;
            }
        };
        let patient = reader.patient_info();
        let study = reader.study_info();
        writer.serialize(PatientRow {
            patient_id: &patient.id,
            exam_id: 0,
            laterality: &study.laterality,
            view: &study.view_position,
            file_path: png.to_string_lossy().replace('\\', "/"),
        })?;
    }
    writer.flush()?;

    info!("CSV file saved: {}", csv_file_path.display());
    Ok(Some(csv_file_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::write_test_dicom;
    use dicom_core::{DataElement, PrimitiveValue, VR};
    use tempfile::TempDir;

    fn make_converted_pair(dir: &Path, stem: &str, patient_id: &str) -> PathBuf {
        write_test_dicom(&dir.join(format!("{stem}.dcm")), 2, 2, |dcm| {
            dcm.put(DataElement::new(
                crate::extraction::tags::PATIENT_ID,
                VR::LO,
                PrimitiveValue::from(patient_id),
            ));
            dcm.put(DataElement::new(
                crate::extraction::tags::ACQUISITION_DEVICE_PROCESSING_DESCRIPTION,
                VR::LO,
                PrimitiveValue::from("R MLO Breast"),
            ));
        });
        // The PNG itself is never reopened by the exporter
        let png = dir.join(format!("{stem}.png"));
        std::fs::write(&png, b"png bytes").unwrap();
        png
    }

    #[test]
    fn test_empty_png_list_writes_nothing() {
        let save = TempDir::new().unwrap();
        let result = write_to_csv(&[], Path::new("anywhere"), false, Some(save.path())).unwrap();
        assert!(result.is_none());
        assert_eq!(std::fs::read_dir(save.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_directory_mode_names_csv_after_directory() {
        let data = TempDir::new().unwrap();
        let save = TempDir::new().unwrap();
        let png = make_converted_pair(data.path(), "scan1", "PAT001");

        let out = write_to_csv(&[png], data.path(), false, Some(save.path()))
            .unwrap()
            .unwrap();

        let dir_name = data.path().file_name().unwrap().to_string_lossy();
        assert_eq!(out, save.path().join(format!("{dir_name}.csv")));
    }

    #[test]
    fn test_file_list_mode_uses_fixed_name() {
        let data = TempDir::new().unwrap();
        let save = TempDir::new().unwrap();
        let png = make_converted_pair(data.path(), "scan1", "PAT001");

        let out = write_to_csv(&[png], data.path(), true, Some(save.path()))
            .unwrap()
            .unwrap();
        assert_eq!(out, save.path().join("patient_info.csv"));
    }

    #[test]
    fn test_rows_carry_metadata_and_placeholder_exam_id() {
        let data = TempDir::new().unwrap();
        let save = TempDir::new().unwrap();
        let png1 = make_converted_pair(data.path(), "scan1", "PAT001");
        let png2 = make_converted_pair(data.path(), "scan2", "PAT002");

        let out = write_to_csv(&[png1.clone(), png2], data.path(), true, Some(save.path()))
            .unwrap()
            .unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "patient_id,exam_id,laterality,view,file_path"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("PAT001,0,R,MLO,"));
        // Paths are forward-slash normalized
        assert!(row.ends_with("scan1.png"));
        assert!(!row.contains('\\'));
        assert!(lines.next().unwrap().starts_with("PAT002,0,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_unreadable_sibling_is_skipped() {
        let data = TempDir::new().unwrap();
        let save = TempDir::new().unwrap();
        let good = make_converted_pair(data.path(), "good", "PAT001");
        // PNG with no sibling DICOM file at all
        let orphan = data.path().join("orphan.png");
        std::fs::write(&orphan, b"png bytes").unwrap();

        let out = write_to_csv(&[orphan, good], data.path(), true, Some(save.path()))
            .unwrap()
            .unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let rows: Vec<_> = text.lines().skip(1).collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("PAT001,"));
    }
}
