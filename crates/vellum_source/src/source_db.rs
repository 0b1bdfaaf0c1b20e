//! Caching store of file text, shared between scanning and rendering.

use crate::loader::{ContentLoader, LoadError};
use crate::source_file::SourceFile;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Owns the text of every file seen during an analysis session.
///
/// Files are registered in memory with [`add_source`](Self::add_source) or
/// read lazily from disk on first [`load`](ContentLoader::load). Repeated
/// requests for the same path are served from the cache.
pub struct SourceDb {
    files: RwLock<HashMap<PathBuf, Arc<SourceFile>>>,
    read_disk: bool,
}

impl SourceDb {
    /// Creates an empty database that falls back to the filesystem.
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            read_disk: true,
        }
    }

    /// Creates an empty database that only serves in-memory sources.
    pub fn in_memory() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            read_disk: false,
        }
    }

    /// Registers in-memory text under `name`, replacing any previous entry.
    pub fn add_source(&self, name: impl Into<PathBuf>, content: impl Into<String>) -> Arc<SourceFile> {
        let file = Arc::new(SourceFile::new(name, content.into()));
        self.files
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(file.path.clone(), Arc::clone(&file));
        file
    }

    /// Returns a cached file without touching the filesystem.
    pub fn get(&self, path: &Path) -> Option<Arc<SourceFile>> {
        self.files
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(path)
            .cloned()
    }

    /// Returns the number of cached files.
    pub fn len(&self) -> usize {
        self.files
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_from_disk(&self, path: &Path) -> Result<Arc<SourceFile>, LoadError> {
        debug!(path = %path.display(), "reading source from disk");
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Ok(self.add_source(path, content))
    }
}

impl ContentLoader for SourceDb {
    fn load(&self, path: &Path) -> Result<Arc<SourceFile>, LoadError> {
        if let Some(file) = self.get(path) {
            return Ok(file);
        }
        if !self.read_disk {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        self.read_from_disk(path)
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_load() {
        let db = SourceDb::in_memory();
        db.add_source("index.html", "<html></html>");
        let file = db.load(Path::new("index.html")).unwrap();
        assert_eq!(file.content, "<html></html>");
    }

    #[test]
    fn repeated_loads_share_one_file() {
        let db = SourceDb::in_memory();
        db.add_source("a.js", "let a;");
        let first = db.load(Path::new("a.js")).unwrap();
        let second = db.load(Path::new("a.js")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn in_memory_never_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("on_disk.html");
        std::fs::write(&path, "<p>").unwrap();

        let db = SourceDb::in_memory();
        assert!(matches!(db.load(&path), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn load_file_from_disk_and_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<script></script>").unwrap();

        let db = SourceDb::new();
        assert!(db.is_empty());
        let file = db.load(&path).unwrap();
        assert_eq!(file.content, "<script></script>");

        std::fs::remove_file(&path).unwrap();
        assert!(db.load(&path).is_ok(), "served from cache");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let db = SourceDb::new();
        let err = db.load(&dir.path().join("nope.html")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn add_source_replaces() {
        let db = SourceDb::in_memory();
        db.add_source("x.html", "old");
        db.add_source("x.html", "new");
        assert_eq!(db.get(Path::new("x.html")).unwrap().content, "new");
    }
}
