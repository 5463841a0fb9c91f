// grater-core/src/ports/prompt.rs

use crate::error::GraterError;

/// Asks the operator whether an existing project directory may be overwritten.
pub trait OverwritePrompt {
    fn confirm_overwrite(&self, project: &str) -> Result<bool, GraterError>;
}
