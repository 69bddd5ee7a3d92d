#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use runpack::fs::mock::MockFileSystem;

pub use runpack_test_utils::init_tracing;

/// Root used by mock-filesystem tests; the project name is `demo`.
pub fn mock_root() -> PathBuf {
    PathBuf::from("/work/demo")
}

/// A mock filesystem with `files` (relative to [`mock_root`]) already added.
pub fn mock_tree(files: &[(&str, &[u8])]) -> Arc<MockFileSystem> {
    let fs = Arc::new(MockFileSystem::new());
    let root = mock_root();
    fs.add_dir(&root);
    for (relative, contents) in files {
        fs.add_file(root.join(relative), contents.to_vec());
    }
    fs
}

pub fn source_path(root: &Path) -> PathBuf {
    runpack::build::intermediate_source_path(root, "demo")
}
