// grater-core/src/domain/config/validation.rs

// Every check collects the complete set of offending keys before failing, so
// an operator can repair the configuration file in a single pass.

use crate::domain::config::section::{ConfigSection, is_empty_value};
use crate::domain::error::DomainError;
use crate::ports::Reporter;

/// Placeholder shipped in the starter configuration for values an operator must supply.
pub const SENTINEL_DEFAULT: &str = "MUST_BE_SET";

pub const GLOBAL_LABEL: &str = "global";

pub const GLOBAL_KEYS: [&str; 2] = ["account_id", "region"];

pub const PROJECT_KEYS: [&str; 11] = [
    "store_bucket",
    "store_bucket_prefix",
    "site_bucket",
    "site_bucket_prefix",
    "docker_image_name",
    "site_name",
    "expectations_suite_name",
    "checkpoint_name",
    "run_name_template",
    "data_bucket",
    "prefix_data",
];

/// An empty `site_bucket_prefix` publishes the data docs at the bucket root.
pub const PROJECT_EXEMPT_KEYS: [&str; 1] = ["site_bucket_prefix"];

/// Checks key presence, then non-empty values.
///
/// Exempt keys may be absent or empty; they never show up in either report.
pub fn validate(
    section: &ConfigSection,
    required_keys: &[&str],
    label: &str,
    exempt_keys: &[&str],
    reporter: &dyn Reporter,
) -> Result<(), DomainError> {
    reporter.info(&format!(
        "Checking if required keys can be found in the {} config",
        label
    ));

    let checked = || {
        required_keys
            .iter()
            .copied()
            .filter(move |key| !exempt_keys.contains(key))
    };

    // 1. Missing keys
    let missing_keys: Vec<String> = checked()
        .filter(|key| !section.contains_key(key))
        .map(|key| key.to_string())
        .collect();

    if !missing_keys.is_empty() {
        reporter.warn(&format!(
            "Not all keys found in {} config. Missing: {}",
            label,
            missing_keys.join(", ")
        ));
        return Err(DomainError::MissingKeys {
            label: label.to_string(),
            keys: missing_keys,
        });
    }

    // 2. Missing values
    let missing_values: Vec<String> = checked()
        .filter(|key| section.get(key).is_none_or(is_empty_value))
        .map(|key| key.to_string())
        .collect();

    if !missing_values.is_empty() {
        reporter.warn(&format!(
            "Not all keys found in {} config have values. Missing: {}",
            label,
            missing_values.join(", ")
        ));
        return Err(DomainError::MissingValues {
            label: label.to_string(),
            keys: missing_values,
        });
    }

    Ok(())
}

/// Validates the `global` section and rejects values still set to [`SENTINEL_DEFAULT`].
pub fn validate_global(section: &ConfigSection, reporter: &dyn Reporter) -> Result<(), DomainError> {
    validate(section, &GLOBAL_KEYS, GLOBAL_LABEL, &[], reporter)?;

    let unset: Vec<String> = GLOBAL_KEYS
        .iter()
        .filter(|key| section.text(key) == SENTINEL_DEFAULT)
        .map(|key| key.to_string())
        .collect();

    for key in &unset {
        reporter.warn(&format!(
            "The value for {} in the global config is set to its default value. \
             Please fill in a proper value for this parameter.",
            key
        ));
    }

    if !unset.is_empty() {
        return Err(DomainError::UnsetDefaults { keys: unset });
    }

    Ok(())
}

/// Validates the section of `project` with the project key list and exemptions.
pub fn validate_project(
    section: &ConfigSection,
    project: &str,
    reporter: &dyn Reporter,
) -> Result<(), DomainError> {
    validate(
        section,
        &PROJECT_KEYS,
        project,
        &PROJECT_EXEMPT_KEYS,
        reporter,
    )
}
