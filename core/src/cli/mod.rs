pub mod report;

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Command-line arguments for mammoprep
#[derive(Parser, Debug)]
#[command(name = "mammoprep")]
#[command(about = "Convert DICOM files to PNG and optionally export metadata to CSV")]
#[command(version)]
#[command(group(ArgGroup::new("input").required(true).args(["directory", "files"])))]
pub struct Cli {
    /// Directory containing DICOM files
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Path(s) to one or more DICOM files
    #[arg(short, long = "file", value_name = "FILE", num_args = 1..)]
    pub files: Option<Vec<PathBuf>>,

    /// Directory for output PNG and CSV files
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write patient metadata to a CSV file
    #[arg(long)]
    pub csv: bool,

    /// Persist inferred metadata into the DICOM files via dcmodify
    #[arg(long)]
    pub add_metadata: bool,

    /// Delete sibling .bak backup files after processing
    #[arg(long)]
    pub delete_backup: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
