use dicom_object::InMemDicomObject;
use serde::Serialize;

use super::tags::{
    get_string_value, ACCESSION_NUMBER, ACQUISITION_DEVICE_PROCESSING_DESCRIPTION, LATERALITY,
    REFERRING_PHYSICIAN_NAME, STUDY_DATE, STUDY_DESCRIPTION, STUDY_ID, STUDY_TIME, VIEW_POSITION,
};
use crate::types::{Laterality, ViewPosition};

/// Study-level fields, including laterality and view position
///
/// Every field defaults to an empty string when the tag is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyInfo {
    pub date: String,
    pub time: String,
    pub description: String,
    pub id: String,
    pub accession_number: String,
    pub referring_physician: String,
    pub laterality: String,
    pub view_position: String,
}

/// Extracts study information from a DICOM dataset
///
/// When the explicit `Laterality` or `ViewPosition` tag is blank and the
/// acquisition device processing description contains a recognizable
/// marker, the inferred value is used instead. Explicit non-blank tags
/// always win over inference.
pub fn extract_study_info(dcm: &InMemDicomObject) -> StudyInfo {
    let get = |tag| get_string_value(dcm, tag).unwrap_or_default();
    let mut info = StudyInfo {
        date: get(STUDY_DATE),
        time: get(STUDY_TIME),
        description: get(STUDY_DESCRIPTION),
        id: get(STUDY_ID),
        accession_number: get(ACCESSION_NUMBER),
        referring_physician: get(REFERRING_PHYSICIAN_NAME),
        laterality: get(LATERALITY),
        view_position: get(VIEW_POSITION),
    };

    if let Some(desc) = get_string_value(dcm, ACQUISITION_DEVICE_PROCESSING_DESCRIPTION) {
        if info.view_position.is_empty() {
            if let Some(view) = ViewPosition::from_description(&desc) {
                info.view_position = view.code().to_string();
            }
        }
        if info.laterality.is_empty() {
            if let Some(side) = Laterality::from_description(&desc) {
                info.laterality = side.code().to_string();
            }
        }
    }

    info
}
