// grater-core/src/application/tutorial.rs

use std::fs;
use std::path::Path;

use crate::error::GraterError;
use crate::infrastructure::fs::{IgnorePatterns, copy_and_overwrite_tree, copy_dir_files};
use crate::ports::Reporter;

pub const TUTORIAL_DIR: &str = "tutorial_files";

/// Swaps the freshly scaffolded project's files for their tutorial versions.
///
/// Runs after the regular scaffolding, so tutorial Terraform files win over
/// the bootstrap ones. Each missing tutorial source is skipped with a warning.
pub fn apply_tutorial_overlay(
    bootstrap_dir: &Path,
    project_dir: &Path,
    reporter: &dyn Reporter,
) -> Result<usize, GraterError> {
    reporter.info("Making adjustments for running the tutorial");
    let tutorial = bootstrap_dir.join(TUTORIAL_DIR);
    let mut copied = 0;

    // 1. Terraform files
    for (source, target) in [
        ("terraform/tutorial_bucket", "terraform/buckets"),
        ("terraform/tutorial_lambda", "terraform/lambda"),
    ] {
        let source = tutorial.join(source);
        if source.is_dir() {
            copied += copy_dir_files(&source, &project_dir.join(target))?;
        } else {
            skip(reporter, &source);
        }
    }

    // 2. Data
    let data = tutorial.join("tutorial_data");
    if data.is_dir() {
        copied += copy_and_overwrite_tree(&data, &project_dir.join("data"), &IgnorePatterns::none())?;
    } else {
        skip(reporter, &data);
    }

    // 3. Notebook replaces the blank expectation suite
    let notebook = tutorial.join("tutorial_notebook.ipynb");
    if notebook.is_file() {
        fs::copy(&notebook, project_dir.join("tutorial_notebook.ipynb"))?;
        copied += 1;

        let blank_suite = project_dir.join("expectation_suite.ipynb");
        if blank_suite.exists() {
            fs::remove_file(&blank_suite)?;
        }
    } else {
        skip(reporter, &notebook);
    }

    // 4. Lambda function
    let lambda = tutorial.join("lambda_function.py");
    if lambda.is_file() {
        fs::copy(&lambda, project_dir.join("lambda_function.py"))?;
        copied += 1;
    } else {
        skip(reporter, &lambda);
    }

    Ok(copied)
}

fn skip(reporter: &dyn Reporter, missing: &Path) {
    reporter.warn(&format!(
        "Tutorial source {} not found, skipping",
        missing.display()
    ));
}
