// grater-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(grater::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("Failed to copy '{path}': {source}")]
    #[diagnostic(code(grater::infra::copy))]
    Copy {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(grater::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(grater::infra::config))]
    ConfigError(String),

    #[error("Configuration file not found at '{0}'")]
    #[diagnostic(
        code(grater::infra::config_missing),
        help("Run grater from the directory holding testing_config.yml, or pass --config.")
    )]
    ConfigNotFound(String),

    #[error("Bootstrap directory not found at '{0}'")]
    #[diagnostic(
        code(grater::infra::bootstrap_missing),
        help("Pass --bootstrap-dir pointing at the bootstrap_files template tree.")
    )]
    BootstrapNotFound(String),

    #[error("Project directory '{project}' overlaps the bootstrap directory '{bootstrap}'")]
    #[diagnostic(
        code(grater::infra::bootstrap_overlap),
        help("Pick a --root outside the bootstrap tree, or a project name that does not contain it.")
    )]
    BootstrapOverlap { project: String, bootstrap: String },

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    #[diagnostic(code(grater::infra::ignore_pattern))]
    IgnorePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(grater::infra::template),
        help("An artifact template referenced a value that was not provided.")
    )]
    TemplateError(#[from] minijinja::Error),
}
