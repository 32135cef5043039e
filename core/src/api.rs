use std::fs::File;
use std::path::{Path, PathBuf};

use dicom_object::{open_file, DefaultDicomObject};
use log::info;

use crate::error::{MammoprepError, Result};
use crate::extraction::tags::{get_string_value, IMAGE_LATERALITY, SOP_CLASS_UID};
use crate::extraction::{
    dataset_to_json, extract_patient_info, extract_study_info, PatientInfo, StudyInfo,
};
use crate::rewrite::HeaderRewriter;

/// Metadata reader over a single DICOM file
///
/// Loads the dataset once per invocation and exposes patient/study field
/// extraction, a full-metadata JSON dump, and persistence of inferred
/// values back into the file through a [`HeaderRewriter`].
///
/// # Example
///
/// ```no_run
/// use mammoprep_core::MetadataReader;
///
/// let reader = MetadataReader::open("exam.dcm").unwrap();
/// let patient = reader.patient_info();
/// let study = reader.study_info();
/// println!("{} {} {}", patient.id, study.laterality, study.view_position);
/// ```
#[derive(Debug)]
pub struct MetadataReader {
    path: PathBuf,
    dataset: DefaultDicomObject,
}

impl MetadataReader {
    /// Opens a DICOM file for metadata extraction
    ///
    /// # Errors
    ///
    /// Returns [`MammoprepError::FileNotFound`] when the path does not
    /// exist and [`MammoprepError::InvalidDicom`] when it cannot be
    /// parsed as DICOM.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(MammoprepError::FileNotFound(path.to_path_buf()));
        }
        let dataset = open_file(path).map_err(|e| MammoprepError::InvalidDicom {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            dataset,
        })
    }

    /// Path of the underlying DICOM file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only access to the loaded dataset
    pub fn dataset(&self) -> &DefaultDicomObject {
        &self.dataset
    }

    /// Patient identification fields, empty when absent
    pub fn patient_info(&self) -> PatientInfo {
        extract_patient_info(&self.dataset)
    }

    /// Study fields with laterality/view inference applied
    pub fn study_info(&self) -> StudyInfo {
        extract_study_info(&self.dataset)
    }

    /// Full-metadata mapping, JSON-serializable by construction
    pub fn all_metadata(&self) -> serde_json::Value {
        dataset_to_json(&self.dataset)
    }

    /// Saves the full-metadata dump as pretty-printed JSON
    ///
    /// Defaults to a sibling `<stem>_metadata.json` path when `output`
    /// is not given. Returns the path written.
    pub fn save_json(&self, output: Option<&Path>) -> Result<PathBuf> {
        let out = match output {
            Some(p) => p.to_path_buf(),
            None => {
                let stem = self
                    .path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.path.with_file_name(format!("{stem}_metadata.json"))
            }
        };
        let file = File::create(&out)?;
        serde_json::to_writer_pretty(file, &self.all_metadata())?;
        info!("Saved metadata JSON: {}", out.display());
        Ok(out)
    }

    /// Persists inferred laterality and a descriptive field into the file
    ///
    /// The laterality written is the explicit ImageLaterality tag when
    /// non-blank, otherwise the (possibly inferred) study laterality.
    /// The description written is the dataset's SOP Class UID string.
    pub fn persist_inferred(&self, rewriter: &dyn HeaderRewriter) -> Result<()> {
        let study = self.study_info();
        let laterality = get_string_value(&self.dataset, IMAGE_LATERALITY)
            .filter(|s| !s.is_empty())
            .unwrap_or(study.laterality);
        let description = get_string_value(&self.dataset, SOP_CLASS_UID).unwrap_or_default();
        rewriter.rewrite(&self.path, &laterality, &description)
    }
}
