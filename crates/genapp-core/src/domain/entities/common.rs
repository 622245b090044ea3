use std::fmt;
use std::path::{Path, PathBuf};

/// An output path guaranteed to be relative to the output directory.
///
/// Invariant: never absolute and never climbs out with `..`. Enforced at
/// construction, after placeholder expansion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor. Returns the rejected path on failure.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, PathBuf> {
        let path = path.into();
        let escapes = path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));
        if path.is_absolute() || escapes {
            Err(path)
        } else {
            Ok(Self(path))
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Unix-style permission bits for a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions(u32);

impl Permissions {
    pub const fn from_mode(mode: u32) -> Self {
        Self(mode & 0o777)
    }

    /// `rw-r--r--`
    pub const fn read_write() -> Self {
        Self(0o644)
    }

    /// `rwxr-xr-x`
    pub const fn executable() -> Self {
        Self(0o755)
    }

    pub const fn mode(&self) -> u32 {
        self.0
    }

    pub const fn executable_flag(&self) -> bool {
        self.0 & 0o111 != 0
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::read_write()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// Upper-case the first letter of every word.
///
/// A word starts after any character that is not alphanumeric or `_`, so
/// `movies` → `Movies`, `my movies` → `My Movies`, `movie_list` →
/// `Movie_list`. The rest of each word is left as written.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}
