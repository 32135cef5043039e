use std::path::{Path, PathBuf};

use clap::Parser;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use log::{error, info, warn};

use mammoprep_core::cli::Cli;
use mammoprep_core::convert::{batch_convert, dicom_to_png};
use mammoprep_core::export::write_to_csv;
use mammoprep_core::rewrite::DcmModify;
use mammoprep_core::MetadataReader;

fn main() {
    let cli = Cli::parse();

    let _logger = match setup_logging(cli.verbose) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            std::process::exit(1);
        }
    };

    if let Some(directory) = cli.directory.as_deref() {
        handle_directory(directory, &cli);
    } else if let Some(files) = cli.files.as_deref() {
        handle_files(files, &cli);
    }
}

/// Rotating file log capped at 5 MB with up to 5 backups, warnings
/// duplicated to stderr
fn setup_logging(verbose: bool) -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    let spec = if verbose { "debug" } else { "info" };
    Logger::try_with_env_or_str(spec)?
        .log_to_file(FileSpec::default().basename("mammoprep").suppress_timestamp())
        .rotate(
            Criterion::Size(5 * 1024 * 1024),
            Naming::Numbers,
            Cleanup::KeepLogFiles(5),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .start()
}

/// Converts every DICOM file in a directory
fn handle_directory(directory: &Path, cli: &Cli) {
    if !directory.is_dir() {
        error!("Invalid directory path: {}", directory.display());
        eprintln!("Invalid directory path: {}", directory.display());
        return;
    }

    let (converted_files, dicom_files) = match batch_convert(directory, cli.output.as_deref()) {
        Ok(result) => result,
        Err(e) => {
            error!("Failed to convert directory {}: {e}", directory.display());
            eprintln!("Error: {e}");
            return;
        }
    };

    if cli.csv {
        if let Err(e) = write_to_csv(&converted_files, directory, false, cli.output.as_deref()) {
            error!("Failed to write CSV: {e}");
            eprintln!("Error: failed to write CSV: {e}");
        }
    }
    info!("Converted all files in directory {}", directory.display());

    if cli.add_metadata {
        add_metadata_to_files(&dicom_files);
    }
    if cli.delete_backup {
        delete_backup_files(&dicom_files);
    }
}

/// Converts an explicit list of DICOM files
fn handle_files(files: &[PathBuf], cli: &Cli) {
    let (converted_files, invalid_files) = process_files(files, cli.output.as_deref());

    if cli.csv && !converted_files.is_empty() {
        // Metadata is re-read from the directory of the first input file
        let base = files[0].parent().unwrap_or(Path::new(""));
        if let Err(e) = write_to_csv(&converted_files, base, true, cli.output.as_deref()) {
            error!("Failed to write CSV: {e}");
            eprintln!("Error: failed to write CSV: {e}");
        } else {
            info!("CSV file created with metadata of converted files");
        }
    }

    if cli.add_metadata {
        add_metadata_to_files(files);
    }
    if cli.delete_backup {
        delete_backup_files(files);
    }

    if !invalid_files.is_empty() {
        let joined = invalid_files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        warn!("Invalid file paths: {joined}");
        println!("Invalid file paths: {joined}");
    }
}

/// Converts each existing file, collecting paths that are not files
fn process_files(files: &[PathBuf], output: Option<&Path>) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut converted = Vec::new();
    let mut invalid = Vec::new();
    for file in files {
        if !file.is_file() {
            invalid.push(file.clone());
            continue;
        }
        let png_dir = output.map(|o| o.join("png"));
        match dicom_to_png(file, png_dir.as_deref(), None) {
            Ok(png) => {
                info!("Converted {} to PNG", file.display());
                converted.push(png);
            }
            Err(e) => {
                error!("Error converting file {}: {e}", file.display());
                eprintln!("Error converting file {}: {e}", file.display());
            }
        }
    }
    (converted, invalid)
}

/// Persists inferred metadata back into each DICOM file via dcmodify
fn add_metadata_to_files(files: &[PathBuf]) {
    let rewriter = DcmModify::new();
    if let Err(e) = rewriter.ensure_available() {
        error!("{e}");
        eprintln!("Error: {e}");
        return;
    }
    for file in files {
        match MetadataReader::open(file).and_then(|reader| reader.persist_inferred(&rewriter)) {
            Ok(()) => info!("Added metadata to {}", file.display()),
            Err(e) => error!("Failed to add metadata to {}: {e}", file.display()),
        }
    }
}

/// Removes the sibling `.bak` backups dcmodify leaves behind
fn delete_backup_files(files: &[PathBuf]) {
    info!("Deleting backup files");
    for file in files {
        let mut backup = file.clone().into_os_string();
        backup.push(".bak");
        let backup = PathBuf::from(backup);
        match std::fs::remove_file(&backup) {
            Ok(()) => info!("Deleted {}", backup.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Backup file not found: {}", backup.display());
            }
            Err(e) => error!("Failed to delete {}: {e}", backup.display()),
        }
    }
    info!("Deleted all backup files");
}
