pub mod config;
pub mod error;
pub mod project;

pub use error::DomainError;
pub use project::ProjectName;
