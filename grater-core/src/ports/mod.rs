// grater-core/src/ports/mod.rs

pub mod prompt;
pub mod reporter;

pub use prompt::OverwritePrompt;
pub use reporter::Reporter;
