use dicom_object::InMemDicomObject;
use serde::Serialize;

use super::tags::{
    get_string_value, PATIENT_AGE, PATIENT_BIRTH_DATE, PATIENT_ID, PATIENT_NAME, PATIENT_SEX,
    PATIENT_WEIGHT,
};

/// Patient-level identification fields
///
/// Every field defaults to an empty string when the tag is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientInfo {
    pub name: String,
    pub id: String,
    pub birth_date: String,
    pub sex: String,
    pub age: String,
    pub weight: String,
}

/// Extracts patient information from a DICOM dataset
pub fn extract_patient_info(dcm: &InMemDicomObject) -> PatientInfo {
    let get = |tag| get_string_value(dcm, tag).unwrap_or_default();
    PatientInfo {
        name: get(PATIENT_NAME),
        id: get(PATIENT_ID),
        birth_date: get(PATIENT_BIRTH_DATE),
        sex: get(PATIENT_SEX),
        age: get(PATIENT_AGE),
        weight: get(PATIENT_WEIGHT),
    }
}
