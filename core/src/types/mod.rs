//! Core type definitions for DICOM preparation
//!
//! - [`Laterality`]: breast laterality inferred from acquisition text
//! - [`ViewPosition`]: mammography view position inferred from acquisition text

mod enums;

pub use enums::{Laterality, ViewPosition};
