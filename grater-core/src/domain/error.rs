// grater-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum DomainError {
    #[error("The {label} configuration is missing the following keys: {}", .keys.join(", "))]
    #[diagnostic(
        code(grater::config::missing_keys),
        help("Add every listed key to the '{label}' section of the configuration file.")
    )]
    MissingKeys { label: String, keys: Vec<String> },

    #[error("The {label} configuration is missing values for the following keys: {}", .keys.join(", "))]
    #[diagnostic(
        code(grater::config::missing_values),
        help("Fill in a value for every listed key in the '{label}' section.")
    )]
    MissingValues { label: String, keys: Vec<String> },

    #[error("The global configuration still holds default values for: {}", .keys.join(", "))]
    #[diagnostic(
        code(grater::config::unset_defaults),
        help("Replace every MUST_BE_SET placeholder in the 'global' section with a real value.")
    )]
    UnsetDefaults { keys: Vec<String> },

    #[error("Project '{project}' was not found in the configuration file")]
    #[diagnostic(
        code(grater::config::project_not_found),
        help("Add a top-level '{project}' section to the configuration file.")
    )]
    ProjectNotFound { project: String },

    #[error("Invalid project name: '{0}'")]
    #[diagnostic(
        code(grater::project::invalid_name),
        help("Project names become directory names: no path separators, no '.' or '..'.")
    )]
    InvalidProjectName(String),
}
