//! Driven (output) ports - implemented by infrastructure.
//!
//! The `genapp-adapters` crate provides the implementations.

use std::path::{Path, PathBuf};

use crate::domain::{Permissions, RenderContext};
use crate::error::GenappResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `genapp_adapters::filesystem::LocalFilesystem` (production)
/// - `genapp_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GenappResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> GenappResult<()>;

    /// Raw counterpart of [`Filesystem::write_file`] for copied models.
    fn write_bytes(&self, path: &Path, content: &[u8]) -> GenappResult<()>;

    fn read_to_string(&self, path: &Path) -> GenappResult<String>;

    /// Read a file without assuming any encoding.
    fn read_bytes(&self, path: &Path) -> GenappResult<Vec<u8>>;

    fn set_permissions(&self, path: &Path, permissions: Permissions) -> GenappResult<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> GenappResult<()>;

    /// Every regular file below `dir`, relative to `dir`, sorted.
    fn list_files(&self, dir: &Path) -> GenappResult<Vec<PathBuf>>;
}

/// Port for model template rendering.
///
/// Implemented by:
/// - `genapp_adapters::renderer::BracketRenderer` (`[[.Key]]` substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` (model text) with the given variables.
    fn render(&self, template: &str, context: &RenderContext) -> GenappResult<String>;
}
