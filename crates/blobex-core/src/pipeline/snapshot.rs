//! Pre-run snapshot of the output directory.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;
use walkdir::WalkDir;

/// Filename stems found in the output directory before the run starts.
///
/// Extension-agnostic (`a.jpg` and `a.png` are one stem) and non-recursive.
/// Used only for the summary; skip decisions re-check each target path.
/// Stems are kept as raw OS strings so non-UTF-8 names stay distinct.
#[derive(Debug, Default)]
pub struct ExistingFiles {
    stems: HashSet<OsString>,
}

impl ExistingFiles {
    /// List the direct children of `dir`.
    ///
    /// A missing directory yields an empty snapshot.
    pub fn scan(dir: &Path) -> std::io::Result<Self> {
        let mut stems = HashSet::new();
        if !dir.exists() {
            return Ok(Self { stems });
        }

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::other)?;
            if let Some(stem) = entry.path().file_stem() {
                stems.insert(stem.to_os_string());
            }
        }

        tracing::debug!("Found {} existing file stem(s) in {:?}", stems.len(), dir);
        Ok(Self { stems })
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }
}
