//! Application ports (traits) for external dependencies.
//!
//! Driven ports are called by the application and implemented by
//! infrastructure:
//!   - `Filesystem`: model reads and output writes
//!   - `TemplateRenderer`: model text rendering

pub mod output;

pub use output::{Filesystem, TemplateRenderer};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateRenderer};
