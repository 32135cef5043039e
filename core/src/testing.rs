//! Helpers for constructing DICOM files on disk in tests

use std::path::Path;

use dicom_core::{DataElement, PrimitiveValue, VR};
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};

use crate::extraction::tags::{
    BITS_ALLOCATED, BITS_STORED, COLUMNS, HIGH_BIT, MODALITY, PHOTOMETRIC_INTERPRETATION,
    PIXEL_DATA, PIXEL_REPRESENTATION, ROWS, SAMPLES_PER_PIXEL, SOP_CLASS_UID, SOP_INSTANCE_UID,
};

// Secondary Capture Image Storage
const TEST_SOP_CLASS: &str = "1.2.840.10008.5.1.4.1.1.7";
const TEST_SOP_INSTANCE: &str = "1.2.826.0.1.3680043.8.498.1";
const EXPLICIT_VR_LE: &str = "1.2.840.10008.1.2.1";

/// Writes a minimal 8-bit monochrome DICOM file with a row-major
/// gradient pixel pattern, applying `customize` before writing
pub fn write_test_dicom(
    path: &Path,
    rows: u16,
    columns: u16,
    customize: impl FnOnce(&mut InMemDicomObject),
) {
    let mut dcm = base_object(rows, columns);
    let pixels: Vec<u8> = (0..rows as usize * columns as usize)
        .map(|i| (i % 256) as u8)
        .collect();
    dcm.put(DataElement::new(
        PIXEL_DATA,
        VR::OB,
        PrimitiveValue::from(pixels),
    ));
    customize(&mut dcm);
    write_object(path, dcm);
}

/// Writes a valid DICOM file that carries no PixelData element
pub fn write_test_dicom_without_pixels(
    path: &Path,
    customize: impl FnOnce(&mut InMemDicomObject),
) {
    let mut dcm = base_object(4, 4);
    customize(&mut dcm);
    write_object(path, dcm);
}

fn base_object(rows: u16, columns: u16) -> InMemDicomObject {
    let mut dcm = InMemDicomObject::new_empty();
    dcm.put(DataElement::new(
        SOP_CLASS_UID,
        VR::UI,
        PrimitiveValue::from(TEST_SOP_CLASS),
    ));
    dcm.put(DataElement::new(
        SOP_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from(TEST_SOP_INSTANCE),
    ));
    dcm.put(DataElement::new(
        MODALITY,
        VR::CS,
        PrimitiveValue::from("MG"),
    ));
    dcm.put(DataElement::new(
        PHOTOMETRIC_INTERPRETATION,
        VR::CS,
        PrimitiveValue::from("MONOCHROME2"),
    ));
    dcm.put(DataElement::new(
        SAMPLES_PER_PIXEL,
        VR::US,
        PrimitiveValue::from(1_u16),
    ));
    dcm.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(rows)));
    dcm.put(DataElement::new(
        COLUMNS,
        VR::US,
        PrimitiveValue::from(columns),
    ));
    dcm.put(DataElement::new(
        BITS_ALLOCATED,
        VR::US,
        PrimitiveValue::from(8_u16),
    ));
    dcm.put(DataElement::new(
        BITS_STORED,
        VR::US,
        PrimitiveValue::from(8_u16),
    ));
    dcm.put(DataElement::new(
        HIGH_BIT,
        VR::US,
        PrimitiveValue::from(7_u16),
    ));
    dcm.put(DataElement::new(
        PIXEL_REPRESENTATION,
        VR::US,
        PrimitiveValue::from(0_u16),
    ));
    dcm
}

fn write_object(path: &Path, dcm: InMemDicomObject) {
    let meta = FileMetaTableBuilder::new()
        .transfer_syntax(EXPLICIT_VR_LE)
        .media_storage_sop_class_uid(TEST_SOP_CLASS)
        .media_storage_sop_instance_uid(TEST_SOP_INSTANCE);
    let obj = dcm.with_meta(meta).expect("build file meta table");
    obj.write_to_file(path).expect("write test DICOM file");
}
