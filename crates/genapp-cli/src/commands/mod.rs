//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into calls on the core
//! [`GeneratorService`] and render the results. No generation logic lives
//! here.

use genapp_adapters::{BracketRenderer, LocalFilesystem};
use genapp_core::{application::GeneratorService, domain::PluginRegistry};

pub mod check;
pub mod completions;
pub mod dialects;
pub mod generate;
pub mod plan;

/// The production service: local disk, `[[.Key]]` renderer, all dialects.
pub(crate) fn service() -> GeneratorService {
    GeneratorService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(BracketRenderer::new()),
        PluginRegistry::bootstrap(),
    )
}
