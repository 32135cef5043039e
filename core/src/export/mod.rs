pub mod csv;

pub use self::csv::{write_to_csv, DEFAULT_OUTPUT_ROOT};
