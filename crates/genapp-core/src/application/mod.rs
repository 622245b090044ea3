//! Application layer for genapp.
//!
//! This layer contains:
//! - **Services**: the generation run (`GeneratorService`)
//! - **Ports**: traits for the filesystem and the template renderer
//! - **Errors**: per-file generation failures
//!
//! Schema rules live in `crate::domain`; this layer only sequences them and
//! talks to the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GenerationReport, GenerationSettings, GeneratorService, TaskFailure};

pub use ports::{Filesystem, TemplateRenderer};

pub use error::ApplicationError;
