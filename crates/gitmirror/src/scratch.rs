//! Per-run scratch space.
//!
//! One run owns one temporary directory holding the raw JSON of every page it
//! fetched, which is the only record of what the source API actually returned
//! when a run has to be diagnosed. The directory is removed when the
//! [`RunContext`] is dropped, on success and on unwinding error paths alike.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Scoped owner of the run's scratch directory.
#[derive(Debug)]
pub struct RunContext {
    scratch: TempDir,
}

impl RunContext {
    /// Create the scratch directory for a new run.
    pub fn new() -> io::Result<Self> {
        let scratch = tempfile::Builder::new().prefix("gitmirror-").tempdir()?;
        tracing::debug!(path = %scratch.path().display(), "created scratch directory");
        Ok(Self { scratch })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.scratch.path()
    }

    /// Persist one raw page body under `<namespace>-page-<n>.json`.
    ///
    /// Namespaces containing path separators (e.g. "owner/repo") are
    /// flattened so the file always lands directly in the scratch dir.
    pub fn write_page(&self, namespace: &str, page: u32, body: &[u8]) -> io::Result<PathBuf> {
        let safe: String = namespace
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        let path = self.scratch.path().join(format!("{safe}-page-{page}.json"));
        std::fs::write(&path, body)?;
        Ok(path)
    }
}
