// grater-core/src/application/mod.rs

pub mod scaffold;
pub mod tutorial;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI only needs `use grater_core::application::{scaffold_project, ScaffoldRequest};`

pub use scaffold::{ScaffoldReport, ScaffoldRequest, scaffold_project};
pub use tutorial::apply_tutorial_overlay;
