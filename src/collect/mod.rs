// src/collect/mod.rs

//! Source tree collection.
//!
//! Walks the project root through a [`FileSystem`], drops excluded files and
//! loads everything else into memory as [`EmbeddedFile`]s. The order of the
//! result is whatever the directory listing produced; callers must not rely
//! on it.

pub mod exclude;
pub mod path_utils;

use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{Result, RunpackError};
use crate::fs::FileSystem;
use crate::project::EmbeddedFile;
use crate::types::UnreadablePolicy;

pub use exclude::{
    ExcludeFilter, Exclusion, GENERATED_SOURCE_SUFFIX, OBJECT_FILE_MARKER, TOOL_BINARY_NAME,
};
pub use path_utils::relative_str;

pub struct FileCollector<'a> {
    fs: &'a dyn FileSystem,
    filter: ExcludeFilter,
    max_files: usize,
    on_unreadable: UnreadablePolicy,
}

impl<'a> FileCollector<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        filter: ExcludeFilter,
        max_files: usize,
        on_unreadable: UnreadablePolicy,
    ) -> Self {
        Self {
            fs,
            filter,
            max_files,
            on_unreadable,
        }
    }

    /// Collect every included regular file under `root`.
    ///
    /// Failing to list `root` itself is always an error; anything below it is
    /// subject to the unreadable policy.
    pub fn collect(&self, root: &Path) -> Result<Vec<EmbeddedFile>> {
        let entries = self.fs.read_dir(root)?;
        let mut files = Vec::new();
        for entry in entries {
            self.visit(root, &entry, &mut files)?;
        }
        debug!(count = files.len(), "collection finished");
        Ok(files)
    }

    fn visit(&self, root: &Path, path: &Path, out: &mut Vec<EmbeddedFile>) -> Result<()> {
        if self.fs.is_dir(path) {
            // Linked directories can point back into the tree.
            if self.fs.is_symlink(path) {
                warn!(path = %path.display(), "skipping symlinked directory");
                return Ok(());
            }
            let entries = match self.fs.read_dir(path) {
                Ok(entries) => entries,
                Err(err) => return self.unreadable(path, err.to_string()),
            };
            for entry in entries {
                self.visit(root, &entry, out)?;
            }
            return Ok(());
        }

        if !self.fs.is_file(path) {
            debug!(path = %path.display(), "skipping non-regular entry");
            return Ok(());
        }

        let Some(relative) = relative_str(root, path) else {
            return self.unreadable(path, "path is not valid UTF-8".to_string());
        };

        if let Some(reason) = self.filter.check(&relative) {
            debug!(path = %relative, ?reason, "excluded");
            return Ok(());
        }

        let bytes = match self.fs.read(path) {
            Ok(bytes) => bytes,
            Err(err) => return self.unreadable(path, format!("{err:#}")),
        };

        if out.len() >= self.max_files {
            return Err(RunpackError::CapacityExceeded {
                kind: "files",
                limit: self.max_files,
            });
        }

        debug!(path = %relative, size = bytes.len(), "collected");
        out.push(EmbeddedFile::new(relative, bytes));
        Ok(())
    }

    fn unreadable(&self, path: &Path, reason: String) -> Result<()> {
        match self.on_unreadable {
            UnreadablePolicy::Skip => {
                warn!(path = %path.display(), %reason, "skipping unreadable entry");
                Ok(())
            }
            UnreadablePolicy::Abort => Err(RunpackError::Unreadable {
                path: path.to_path_buf(),
                reason,
            }),
        }
    }
}
