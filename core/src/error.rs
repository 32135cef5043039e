use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type for mammoprep operations
pub type Result<T> = std::result::Result<T, MammoprepError>;

/// Error types for mammoprep operations
#[derive(Error, Debug)]
pub enum MammoprepError {
    /// Input file does not exist
    #[error("DICOM file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// File exists but could not be parsed as DICOM
    #[error("invalid DICOM file {}: {message}", .path.display())]
    InvalidDicom { path: PathBuf, message: String },

    /// Dataset carries no PixelData element
    #[error("DICOM file does not contain pixel data: {}", .0.display())]
    NoPixelData(PathBuf),

    /// The external header-editing tool is not reachable
    #[error(
        "dcmodify is not installed. Install it with `apt-get install dcmtk` \
         (or `choco install dcmtk` on Windows), or download it from \
         https://dicom.offis.de/en/dcmtk/dcmtk-tools/"
    )]
    DependencyMissing,

    /// The external header-editing tool exited with a failure status
    #[error("dcmodify failed ({status}): {stderr}")]
    ToolFailure { status: ExitStatus, stderr: String },

    /// Catch-all conversion failure, preserving the cause and the offending path
    #[error("error converting {}: {message}", .path.display())]
    Conversion { path: PathBuf, message: String },

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MammoprepError {
    /// Wraps any displayable cause into a conversion failure for `path`
    pub fn conversion(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        MammoprepError::Conversion {
            path: path.into(),
            message: cause.to_string(),
        }
    }
}
