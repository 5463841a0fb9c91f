// grater-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum GraterError {
    // --- DOMAIN (validation, lookup) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (IO, parsing, templating) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- OPERATOR ---
    #[error("Project '{0}' already exists, stopping initialization")]
    #[diagnostic(
        code(grater::aborted),
        help("Re-run with --yes to overwrite the existing project without asking.")
    )]
    UserAborted(String),
}

impl From<std::io::Error> for GraterError {
    fn from(err: std::io::Error) -> Self {
        GraterError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl GraterError {
    /// True when the run stopped because the operator declined, not because of a fault.
    pub fn is_user_abort(&self) -> bool {
        matches!(self, GraterError::UserAborted(_))
    }
}
