//! In-place DICOM header rewriting through an external tool
//!
//! The actual edit is delegated to `dcmodify` from the DCMTK suite. The
//! seam is the [`HeaderRewriter`] trait so callers and tests can swap the
//! subprocess out.

use std::path::Path;
use std::process::Command;

use log::error;

use crate::error::{MammoprepError, Result};
use crate::extraction::tags::{IMAGE_LATERALITY, SERIES_DESCRIPTION};

/// Rewrites laterality and a descriptive field into a DICOM file on disk
pub trait HeaderRewriter {
    fn rewrite(&self, path: &Path, laterality: &str, description: &str) -> Result<()>;
}

/// [`HeaderRewriter`] backed by the `dcmodify` command-line tool
///
/// `dcmodify` edits the file in place and leaves a sibling `.bak` backup.
pub struct DcmModify {
    program: String,
}

impl DcmModify {
    pub fn new() -> Self {
        Self::with_program("dcmodify")
    }

    /// Uses an alternative program name, for tests
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Checks that the tool is reachable before any edit is attempted
    ///
    /// # Errors
    ///
    /// Returns [`MammoprepError::DependencyMissing`] with install
    /// guidance when the tool cannot be spawned or reports failure.
    pub fn ensure_available(&self) -> Result<()> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .map_err(|_| MammoprepError::DependencyMissing)?;
        if !output.status.success() {
            return Err(MammoprepError::DependencyMissing);
        }
        Ok(())
    }
}

impl Default for DcmModify {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRewriter for DcmModify {
    /// Runs `dcmodify -i "(0020,0062)=<laterality>" -i "(0008,103e)=<description>" <path>`
    ///
    /// Only the exit status decides success; stdout is never parsed.
    fn rewrite(&self, path: &Path, laterality: &str, description: &str) -> Result<()> {
        self.ensure_available()?;

        let laterality_edit = format!(
            "({:04x},{:04x})={}",
            IMAGE_LATERALITY.group(),
            IMAGE_LATERALITY.element(),
            laterality
        );
        let description_edit = format!(
            "({:04x},{:04x})={}",
            SERIES_DESCRIPTION.group(),
            SERIES_DESCRIPTION.element(),
            description
        );

        let output = Command::new(&self.program)
            .arg("-i")
            .arg(&laterality_edit)
            .arg("-i")
            .arg(&description_edit)
            .arg(path)
            .output()
            .map_err(|_| MammoprepError::DependencyMissing)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!(
                "dcmodify failed for {} ({}): {}",
                path.display(),
                output.status,
                stderr
            );
            return Err(MammoprepError::ToolFailure {
                status: output.status,
                stderr,
            });
        }
        Ok(())
    }
}
