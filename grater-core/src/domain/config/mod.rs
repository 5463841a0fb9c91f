pub mod section;
pub mod settings;
pub mod validation;

pub use section::ConfigSection;
pub use settings::{GlobalSettings, MergedConfig, ProjectSettings, merge};
pub use validation::{
    GLOBAL_KEYS, PROJECT_EXEMPT_KEYS, PROJECT_KEYS, SENTINEL_DEFAULT, validate, validate_global,
    validate_project,
};
