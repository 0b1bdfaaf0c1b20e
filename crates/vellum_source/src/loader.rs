//! The seam through which diagnostics fetch the literal text of a file.

use crate::source_file::SourceFile;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Errors that can occur while fetching file text.
///
/// Any of these is recoverable for the caller: the renderer falls back to the
/// one-line summary when text cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No file is known under the requested path.
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading the file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The loader gave up (cancelled, timed out, or otherwise unavailable).
    #[error("content of {} is unavailable: {reason}", path.display())]
    Unavailable {
        /// The path that was requested.
        path: PathBuf,
        /// Why the content could not be provided.
        reason: String,
    },
}

impl LoadError {
    /// Returns the path the failed request was for.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound(path) => path,
            LoadError::Io { path, .. } => path,
            LoadError::Unavailable { path, .. } => path,
        }
    }
}

/// Provides file text on request.
///
/// Implementations must tolerate the same path being requested many times;
/// caching is their responsibility, not the caller's.
pub trait ContentLoader: Send + Sync {
    /// Returns the file loaded under `path`.
    fn load(&self, path: &Path) -> Result<Arc<SourceFile>, LoadError>;

    /// Returns the text of lines `start_line..=end_line` of `path`.
    ///
    /// Lines past the end of the file are omitted rather than reported.
    fn lines(&self, path: &Path, start_line: u32, end_line: u32) -> Result<Vec<String>, LoadError> {
        let file = self.load(path)?;
        Ok(file
            .lines(start_line, end_line)
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

impl<L: ContentLoader + ?Sized> ContentLoader for Arc<L> {
    fn load(&self, path: &Path) -> Result<Arc<SourceFile>, LoadError> {
        (**self).load(path)
    }
}

impl<L: ContentLoader + ?Sized> ContentLoader for &L {
    fn load(&self, path: &Path) -> Result<Arc<SourceFile>, LoadError> {
        (**self).load(path)
    }
}
