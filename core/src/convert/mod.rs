pub mod batch;
pub mod single;
pub mod window;

pub use batch::{batch_convert, has_dicom_extension};
pub use single::{dicom_to_png, DEFAULT_OUTPUT_DIR};
pub use window::{apply_window, normalize_to_u8, Window};
