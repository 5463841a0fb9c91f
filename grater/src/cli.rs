// grater/src/cli.rs
//
// Single source of truth for the CLI definition (Clap struct).

use clap::Parser;
use std::path::PathBuf;

use grater_core::infrastructure::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "grater")]
#[command(about = "🧀 Bootstraps a Great Expectations testing project on AWS", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project to initialize (a top-level section of the configuration file)
    #[arg(long, short)]
    pub project: String,

    /// Configuration file holding the `global` and project sections
    #[arg(long, env = "GRATER_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Template tree copied into every new project
    #[arg(long, env = "GRATER_BOOTSTRAP_DIR", default_value = "bootstrap_files")]
    pub bootstrap_dir: PathBuf,

    /// Directory the project directory is created in
    #[arg(long, env = "GRATER_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Overwrite an existing project without asking
    #[arg(long, short, env = "GRATER_ASSUME_YES")]
    pub yes: bool,
}
