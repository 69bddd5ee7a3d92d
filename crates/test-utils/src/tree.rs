use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A project directory on disk, removed when dropped.
///
/// The directory basename is the project name, so each tree gets its own
/// temporary parent: `<tmp>/<random>/<name>/`.
pub struct ProjectTree {
    _parent: TempDir,
    root: PathBuf,
}

impl ProjectTree {
    pub fn new(name: &str) -> Self {
        let parent = tempfile::tempdir().expect("create temp dir");
        let root = parent.path().join(name);
        fs::create_dir(&root).expect("create project root");
        Self {
            _parent: parent,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        self.root
            .file_name()
            .and_then(|n| n.to_str())
            .expect("utf-8 project name")
    }

    /// Write a file relative to the root, creating directories as needed.
    pub fn file(self, relative: &str, contents: impl AsRef<[u8]>) -> Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write fixture file");
        self
    }

    /// Write the run script.
    pub fn runfile(self, contents: &str) -> Self {
        self.file(runpack::script::RUN_SCRIPT_NAME, contents)
    }
}
