// grater/src/commands/init.rs
//
// USE CASE: Initialize (or re-initialize) a project from the configuration file.

use grater_core::application::{ScaffoldRequest, scaffold_project};
use grater_core::infrastructure::prompt::{AssumeYes, LinePrompt};
use grater_core::infrastructure::reporter::TracingReporter;
use grater_core::ports::OverwritePrompt;

use crate::cli::Cli;

pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let request = ScaffoldRequest {
        project: cli.project,
        config_path: cli.config,
        bootstrap_dir: cli.bootstrap_dir,
        root: cli.root,
    };

    let prompt: Box<dyn OverwritePrompt> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(LinePrompt::stdin())
    };

    match scaffold_project(&request, prompt.as_ref(), &TracingReporter) {
        Ok(report) => {
            println!(
                "✨ Project initialized in {} ({} bootstrap files, {} artifacts)",
                report.project_dir.display(),
                report.files_copied,
                report.artifacts.len()
            );
            if report.tutorial_applied {
                println!("📓 Tutorial files added, open tutorial_notebook.ipynb to get started");
            }
            Ok(())
        }
        Err(e) if e.is_user_abort() => {
            eprintln!("\n🛑 {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    }
}
