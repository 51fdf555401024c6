//! Source loading behind a trait so the evaluator never touches the
//! filesystem directly. The driver supplies a real filesystem loader;
//! tests use [`MemoryLoader`].

use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Provides the source text of an import target.
pub trait SourceLoader {
    fn load(&self, path: &Path) -> io::Result<String>;
}

/// In-memory loader keyed by path.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        MemoryLoader::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, source: impl Into<String>) {
        self.files.insert(path.into(), source.into());
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{}", path.display()))
        })
    }
}
