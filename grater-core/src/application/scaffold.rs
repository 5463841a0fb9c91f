// grater-core/src/application/scaffold.rs

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::application::tutorial::apply_tutorial_overlay;
use crate::domain::config::{GlobalSettings, ProjectSettings, merge};
use crate::domain::project::ProjectName;
use crate::error::GraterError;
use crate::infrastructure::config::load;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{
    IgnorePatterns, atomic_write, copy_and_overwrite_tree, make_executable,
};
use crate::infrastructure::templates::{ArtifactRenderer, TerraformVars};
use crate::ports::{OverwritePrompt, Reporter};

/// Bootstrap entries that never land in a project.
pub const BOOTSTRAP_IGNORE: [&str; 3] = ["__init__*", "non_verbose_files", "tutorial_files"];

pub const PROJECT_CONFIG_FILE: &str = "project_config.yml";
pub const DATA_CONTEXT_FILE: &str = "great_expectations/great_expectations.yml";
pub const BUILD_SCRIPT_FILE: &str = "build_image_store_on_ecr.sh";
pub const TERRAFORM_DIR: &str = "terraform";
pub const PROVIDER_FILE: &str = "provider.tf";

#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub project: String,
    pub config_path: PathBuf,
    pub bootstrap_dir: PathBuf,
    /// Directory the project directory is created in.
    pub root: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub project_dir: PathBuf,
    pub files_copied: usize,
    pub artifacts: Vec<PathBuf>,
    pub tutorial_applied: bool,
}

/// Every artifact text, rendered before anything is written.
#[derive(Debug, Clone)]
pub struct RenderedArtifacts {
    pub project_config: String,
    pub data_context: String,
    pub build_script: String,
    pub terraform_vars: TerraformVars,
    pub provider: String,
}

/// Validates the configuration, renders every artifact, then materializes the project.
///
/// Nothing on disk is touched until loading, validation and rendering have all
/// succeeded. A failure after the bootstrap copy leaves the partial tree in place.
pub fn scaffold_project(
    request: &ScaffoldRequest,
    prompt: &dyn OverwritePrompt,
    reporter: &dyn Reporter,
) -> Result<ScaffoldReport, GraterError> {
    let name = ProjectName::parse(&request.project)?;

    // 1. Load & validate
    let (global_section, project_section) = load(&request.config_path, name.as_str(), reporter)?;
    let global = GlobalSettings::from_section(&global_section, reporter)?;
    let project = ProjectSettings::from_section(&project_section, name.as_str(), reporter)?;

    // 2. Render
    let renderer = ArtifactRenderer::new(reporter)?;
    let artifacts = RenderedArtifacts {
        project_config: merge(&project_section, &global_section)
            .to_yaml()
            .map_err(InfrastructureError::YamlError)?,
        data_context: renderer.data_context_config(&project)?,
        build_script: renderer.build_script(&project, &global)?,
        terraform_vars: renderer.terraform_vars(&project, &global)?,
        provider: renderer.terraform_provider(&global)?,
    };

    // 3. Target checks
    if !request.bootstrap_dir.is_dir() {
        return Err(InfrastructureError::BootstrapNotFound(
            request.bootstrap_dir.display().to_string(),
        )
        .into());
    }
    let project_dir = request.root.join(name.as_str());
    guard_bootstrap(&request.bootstrap_dir, &project_dir)?;

    if project_dir.exists() {
        reporter.info(&format!(
            "The project you are trying to create, {}, already exists",
            name
        ));
        if !prompt.confirm_overwrite(name.as_str())? {
            reporter.warn("Project already exists, stopping initialization");
            return Err(GraterError::UserAborted(name.to_string()));
        }
        reporter.info(&format!("Overwriting existing project: {}", name));
    }

    // 4. Bootstrap tree (first: it wipes whatever was in the project directory)
    reporter.info(&format!(
        "Copying and overwriting files from {} to {}",
        request.bootstrap_dir.display(),
        project_dir.display()
    ));
    let ignore = IgnorePatterns::new(BOOTSTRAP_IGNORE)?;
    let files_copied = copy_and_overwrite_tree(&request.bootstrap_dir, &project_dir, &ignore)?;

    // 5. Artifacts
    let artifact_paths = write_artifacts(&project_dir, &name, &artifacts)?;

    // 6. Tutorial
    let tutorial_applied = name.is_tutorial();
    if tutorial_applied {
        apply_tutorial_overlay(&request.bootstrap_dir, &project_dir, reporter)?;
    }

    reporter.info(&format!("Project {} initialized in {}", name, project_dir.display()));

    Ok(ScaffoldReport {
        project_dir,
        files_copied,
        artifacts: artifact_paths,
        tutorial_applied,
    })
}

/// Writes the rendered artifacts into an already populated project directory.
pub fn write_artifacts(
    project_dir: &Path,
    name: &ProjectName,
    artifacts: &RenderedArtifacts,
) -> Result<Vec<PathBuf>, GraterError> {
    let mut written = Vec::new();

    let mut write = |relative: &str, content: &str| -> Result<PathBuf, GraterError> {
        let path = project_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write(&path, content)?;
        written.push(path.clone());
        Ok(path)
    };

    write(PROJECT_CONFIG_FILE, &artifacts.project_config)?;
    write(DATA_CONTEXT_FILE, &artifacts.data_context)?;
    let script = write(BUILD_SCRIPT_FILE, &artifacts.build_script)?;
    make_executable(&script)?;

    let tfvars = format!("{}.auto.tfvars", name);
    write(
        &format!("{}/buckets/{}", TERRAFORM_DIR, tfvars),
        &artifacts.terraform_vars.buckets,
    )?;
    write(
        &format!("{}/lambda/{}", TERRAFORM_DIR, tfvars),
        &artifacts.terraform_vars.lambda,
    )?;

    for dir in terraform_dirs(&project_dir.join(TERRAFORM_DIR))? {
        let relative = format!("{}/{}/{}", TERRAFORM_DIR, dir, PROVIDER_FILE);
        write(&relative, &artifacts.provider)?;
    }

    Ok(written)
}

/// Names of the directories directly under `terraform/`, sorted.
fn terraform_dirs(terraform: &Path) -> Result<Vec<String>, GraterError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(terraform)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Refuses a project directory that is, contains, or sits inside the bootstrap tree.
///
/// Neither directory has to exist yet: the project path is resolved through its
/// nearest existing ancestor.
fn guard_bootstrap(bootstrap_dir: &Path, project_dir: &Path) -> Result<(), GraterError> {
    let bootstrap = resolve(bootstrap_dir)?;
    let project = resolve(project_dir)?;
    if bootstrap.starts_with(&project) || project.starts_with(&bootstrap) {
        return Err(InfrastructureError::BootstrapOverlap {
            project: project_dir.display().to_string(),
            bootstrap: bootstrap_dir.display().to_string(),
        }
        .into());
    }
    Ok(())
}

/// Canonical form of `path`, canonicalizing its longest existing prefix.
fn resolve(path: &Path) -> Result<PathBuf, GraterError> {
    let absolute = std::path::absolute(path)?;
    let existing = absolute
        .ancestors()
        .find(|ancestor| ancestor.exists())
        .unwrap_or(Path::new("/"));
    let rest = absolute.strip_prefix(existing).unwrap_or(Path::new(""));

    let mut resolved = existing.canonicalize()?;
    for component in rest.components() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}
