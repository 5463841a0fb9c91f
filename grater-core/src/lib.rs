// grater-core/src/lib.rs

#![allow(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Reporter for operator diagnostics, prompt for the overwrite confirmation.
pub mod ports;

// 2. Domain
// Configuration sections, validation rules, typed settings.
// Depends on nothing but the ports.
pub mod domain;

// 3. Infrastructure (Adapters)
// YAML loader, minijinja templates, filesystem helpers, tracing reporter.
pub mod infrastructure;

// 4. Application (Use Cases)
// Project scaffolding and the tutorial overlay.
pub mod application;

pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::GraterError;
