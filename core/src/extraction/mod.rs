pub mod dump;
pub mod patient;
pub mod study;
pub mod tags;

pub use dump::dataset_to_json;
pub use patient::{extract_patient_info, PatientInfo};
pub use study::{extract_study_info, StudyInfo};
pub use tags::*;
