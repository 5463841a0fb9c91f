// grater-core/src/domain/config/settings.rs

use serde::Serialize;

use crate::domain::config::section::ConfigSection;
use crate::domain::config::validation::{validate_global, validate_project};
use crate::domain::error::DomainError;
use crate::ports::Reporter;

/// AWS account details shared by every project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalSettings {
    pub account_id: String,
    pub region: String,
}

impl GlobalSettings {
    pub fn from_section(
        section: &ConfigSection,
        reporter: &dyn Reporter,
    ) -> Result<Self, DomainError> {
        validate_global(section, reporter)?;
        Ok(Self {
            account_id: section.text("account_id"),
            region: section.text("region"),
        })
    }

    /// `{account_id}.dkr.ecr.{region}.amazonaws.com`
    pub fn registry_endpoint(&self) -> String {
        format!("{}.dkr.ecr.{}.amazonaws.com", self.account_id, self.region)
    }

    pub fn image_uri(&self, image: &str) -> String {
        format!("{}/{}:latest", self.registry_endpoint(), image)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSettings {
    pub store_bucket: String,
    pub store_bucket_prefix: String,
    pub site_bucket: String,
    pub site_bucket_prefix: String,
    pub docker_image_name: String,
    pub site_name: String,
    pub expectations_suite_name: String,
    pub checkpoint_name: String,
    pub run_name_template: String,
    pub data_bucket: String,
    pub prefix_data: String,
}

impl ProjectSettings {
    pub fn from_section(
        section: &ConfigSection,
        project: &str,
        reporter: &dyn Reporter,
    ) -> Result<Self, DomainError> {
        validate_project(section, project, reporter)?;
        Ok(Self {
            store_bucket: section.text("store_bucket"),
            store_bucket_prefix: section.text("store_bucket_prefix"),
            site_bucket: section.text("site_bucket"),
            site_bucket_prefix: section.text("site_bucket_prefix"),
            docker_image_name: section.text("docker_image_name"),
            site_name: section.text("site_name"),
            expectations_suite_name: section.text("expectations_suite_name"),
            checkpoint_name: section.text("checkpoint_name"),
            run_name_template: section.text("run_name_template"),
            data_bucket: section.text("data_bucket"),
            prefix_data: section.text("prefix_data"),
        })
    }
}

/// Project section with the global entries folded in, persisted as `project_config.yml`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MergedConfig(ConfigSection);

impl MergedConfig {
    pub fn section(&self) -> &ConfigSection {
        &self.0
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.0)
    }
}

/// Adds every global entry to the project entries. On a key collision the global value wins.
pub fn merge(project: &ConfigSection, global: &ConfigSection) -> MergedConfig {
    let mut merged = project.clone();
    for (key, value) in global.iter() {
        merged.insert(key.clone(), value.clone());
    }
    MergedConfig(merged)
}
