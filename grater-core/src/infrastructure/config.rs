// grater-core/src/infrastructure/config.rs

use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::instrument;

use crate::domain::config::ConfigSection;
use crate::domain::error::DomainError;
use crate::error::GraterError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::Reporter;

pub const DEFAULT_CONFIG_FILE: &str = "testing_config.yml";

pub const GLOBAL_SECTION: &str = "global";

/// The parsed configuration document: one `global` section plus one section per project.
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    sections: BTreeMap<String, ConfigSection>,
}

impl ConfigDocument {
    pub fn parse(content: &str) -> Result<Self, InfrastructureError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: Option<BTreeMap<String, Value>> = serde_yaml::from_str(content)?;

        let mut sections = BTreeMap::new();
        for (name, value) in raw.unwrap_or_default() {
            let section = match value {
                Value::Null => ConfigSection::new(),
                Value::Mapping(_) => serde_yaml::from_value(value)?,
                other => {
                    return Err(InfrastructureError::ConfigError(format!(
                        "Section '{}' must be a mapping, found: {}",
                        name,
                        describe(&other)
                    )));
                }
            };
            sections.insert(name, section);
        }

        Ok(Self { sections })
    }

    #[instrument]
    pub fn from_file(path: &Path) -> Result<Self, InfrastructureError> {
        if !path.is_file() {
            return Err(InfrastructureError::ConfigNotFound(
                path.display().to_string(),
            ));
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The `global` section. An absent section reads as empty and fails validation later.
    pub fn global(&self) -> ConfigSection {
        self.sections
            .get(GLOBAL_SECTION)
            .cloned()
            .unwrap_or_default()
    }

    pub fn project(&self, project: &str, reporter: &dyn Reporter) -> Result<ConfigSection, DomainError> {
        match self.sections.get(project) {
            Some(section) => Ok(section.clone()),
            None => {
                let known: Vec<&str> = self.project_names().collect();
                reporter.warn(&format!(
                    "The project configurations for {} were not found in the \
                     configuration file. Please add it. Known projects: {}",
                    project,
                    known.join(", ")
                ));
                Err(DomainError::ProjectNotFound {
                    project: project.to_string(),
                })
            }
        }
    }

    pub fn project_names(&self) -> impl Iterator<Item = &str> {
        self.sections
            .keys()
            .map(String::as_str)
            .filter(|name| *name != GLOBAL_SECTION)
    }
}

/// Reads the document at `path` and returns its `(global, project)` sections.
pub fn load(
    path: &Path,
    project: &str,
    reporter: &dyn Reporter,
) -> Result<(ConfigSection, ConfigSection), GraterError> {
    reporter.info(&format!("Loading configurations from {}", path.display()));
    let document = ConfigDocument::from_file(path)?;
    let project_section = document.project(project, reporter)?;
    Ok((document.global(), project_section))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
