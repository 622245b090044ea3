//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use genapp_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::Permissions,
    error::{GenappError, GenappResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> GenappResult<()> {
        std::fs::create_dir_all(path).map_err(|e| {
            ApplicationError::DirectoryCreateFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> GenappResult<()> {
        self.write_bytes(path, content.as_bytes())
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> GenappResult<()> {
        std::fs::write(path, content).map_err(|e| {
            ApplicationError::WriteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn read_to_string(&self, path: &Path) -> GenappResult<String> {
        std::fs::read_to_string(path).map_err(|e| read_failed(path, e))
    }

    fn read_bytes(&self, path: &Path) -> GenappResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| read_failed(path, e))
    }

    fn set_permissions(&self, path: &Path, permissions: Permissions) -> GenappResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(permissions.mode()))
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(windows)]
        {
            // No executable bit on Windows
            let _ = (path, permissions);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove_dir_all(&self, path: &Path) -> GenappResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn list_files(&self, dir: &Path) -> GenappResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let at = e.path().unwrap_or(dir).to_path_buf();
                GenappError::from(ApplicationError::FilesystemError {
                    path: at,
                    reason: format!("Failed to walk directory: {}", e),
                })
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(dir) {
                files.push(rel.to_path_buf());
            }
        }
        Ok(files)
    }
}

fn read_failed(path: &Path, e: io::Error) -> GenappError {
    ApplicationError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> GenappError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
