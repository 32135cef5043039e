use std::fmt;

use crate::api::MetadataReader;
use crate::extraction::tags::{
    get_int_value, get_string_value, BITS_ALLOCATED, COLUMNS, MODALITY, NUMBER_OF_FRAMES, ROWS,
};

/// Text summary of a DICOM file's key information
pub struct TextReport<'a> {
    reader: &'a MetadataReader,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(reader: &'a MetadataReader) -> Self {
        Self { reader }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dcm = self.reader.dataset();

        writeln!(f, "=== DICOM File Summary ===")?;
        writeln!(
            f,
            "Filename: {}",
            self.reader
                .path()
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        )?;

        writeln!(f)?;
        writeln!(f, "Patient Information:")?;
        let patient = self.reader.patient_info();
        writeln!(f, "Name:       {}", patient.name)?;
        writeln!(f, "ID:         {}", patient.id)?;
        writeln!(f, "Birth Date: {}", patient.birth_date)?;
        writeln!(f, "Sex:        {}", patient.sex)?;
        writeln!(f, "Age:        {}", patient.age)?;
        writeln!(f, "Weight:     {}", patient.weight)?;

        writeln!(f)?;
        writeln!(f, "Study Information:")?;
        let study = self.reader.study_info();
        writeln!(f, "Date:        {}", study.date)?;
        writeln!(f, "Time:        {}", study.time)?;
        writeln!(f, "Description: {}", study.description)?;
        writeln!(f, "ID:          {}", study.id)?;
        writeln!(f, "Accession:   {}", study.accession_number)?;
        writeln!(f, "Physician:   {}", study.referring_physician)?;
        writeln!(f, "Laterality:  {}", study.laterality)?;
        writeln!(f, "View:        {}", study.view_position)?;

        writeln!(f)?;
        writeln!(f, "Image Information:")?;
        writeln!(
            f,
            "Modality: {}",
            get_string_value(dcm, MODALITY).unwrap_or_else(|| "N/A".to_string())
        )?;
        match (get_int_value(dcm, ROWS), get_int_value(dcm, COLUMNS)) {
            (Some(rows), Some(columns)) => writeln!(f, "Image Size: {rows}x{columns}")?,
            _ => writeln!(f, "Image Size: N/A")?,
        }
        match get_int_value(dcm, BITS_ALLOCATED) {
            Some(bits) => writeln!(f, "Bits Allocated: {bits}")?,
            None => writeln!(f, "Bits Allocated: N/A")?,
        }
        writeln!(
            f,
            "Number of frames: {}",
            get_int_value(dcm, NUMBER_OF_FRAMES).unwrap_or(1)
        )?;

        Ok(())
    }
}
