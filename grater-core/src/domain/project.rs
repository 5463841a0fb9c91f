// grater-core/src/domain/project.rs

use std::fmt;

use crate::domain::error::DomainError;

/// Name of the project that owns the tutorial overlay.
pub const TUTORIAL_PROJECT: &str = "tutorial";

/// Project identifier. Doubles as a section key and as a directory name,
/// so it must stay a single path component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let trimmed = name.trim();
        let invalid = trimmed.is_empty()
            || trimmed == "."
            || trimmed == ".."
            || trimmed.contains(['/', '\\'])
            || trimmed != name;

        if invalid {
            return Err(DomainError::InvalidProjectName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_tutorial(&self) -> bool {
        self.0 == TUTORIAL_PROJECT
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
