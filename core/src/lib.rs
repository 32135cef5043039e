pub mod api;
pub mod cli;
pub mod convert;
pub mod error;
pub mod export;
pub mod extraction;
pub mod rewrite;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use api::MetadataReader;
pub use cli::report::TextReport;
pub use convert::{batch_convert, dicom_to_png, Window};
pub use error::{MammoprepError, Result};
pub use export::write_to_csv;
pub use rewrite::{DcmModify, HeaderRewriter};
pub use types::*;
