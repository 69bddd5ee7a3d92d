// src/project.rs

//! The in-memory description of one packaging run.
//!
//! A [`Project`] is assembled once from the collector and run-script parser
//! output and is never mutated afterwards. The code generator takes it by
//! value, so file bytes are released as soon as rendering is done.

use std::fmt;
use std::path::Path;

/// Fallback project name for roots without a usable basename (e.g. `/`).
pub const DEFAULT_PROJECT_NAME: &str = "project";

/// A file loaded from the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedFile {
    /// Root-relative path with forward slashes, e.g. `app/bin/run.sh`.
    pub relative_path: String,
    pub bytes: Vec<u8>,
}

impl EmbeddedFile {
    pub fn new(relative_path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            relative_path: relative_path.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// One line of the run script, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand(String);

impl RunCommand {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    files: Vec<EmbeddedFile>,
    commands: Vec<RunCommand>,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        files: Vec<EmbeddedFile>,
        commands: Vec<RunCommand>,
    ) -> Self {
        Self {
            name: name.into(),
            files,
            commands,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Files in traversal order. No ordering is promised beyond that.
    pub fn files(&self) -> &[EmbeddedFile] {
        &self.files
    }

    /// Commands in run-script order.
    pub fn commands(&self) -> &[RunCommand] {
        &self.commands
    }

    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(EmbeddedFile::size).sum()
    }

    pub fn into_parts(self) -> (String, Vec<EmbeddedFile>, Vec<RunCommand>) {
        (self.name, self.files, self.commands)
    }
}

/// Derive the project name from the basename of `root`.
pub fn project_name_for(root: &Path) -> String {
    root.file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_PROJECT_NAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_is_the_root_basename() {
        assert_eq!(project_name_for(Path::new("/home/me/demo")), "demo");
        assert_eq!(project_name_for(Path::new("/home/me/demo/")), "demo");
        assert_eq!(project_name_for(Path::new("/")), DEFAULT_PROJECT_NAME);
    }

    #[test]
    fn total_bytes_sums_file_sizes() {
        let project = Project::new(
            "demo",
            vec![EmbeddedFile::new("a", b"abc".to_vec()), EmbeddedFile::new("b", b"de".to_vec())],
            vec![RunCommand::new("true")],
        );
        assert_eq!(project.total_bytes(), 5);
        assert_eq!(project.files()[1].size(), 2);
    }
}
