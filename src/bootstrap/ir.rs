// src/bootstrap/ir.rs

//! Intermediate representation of a bootstrap program.
//!
//! Lowering decides everything that depends on the project (constant names,
//! which files become executable); rendering only turns it into text.

use crate::bootstrap::runtime::wants_executable;
use crate::project::{EmbeddedFile, Project, RunCommand};

/// One embedded file as a set of named constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConstant {
    pub index: usize,
    pub path: String,
    pub bytes: Vec<u8>,
    pub executable: bool,
}

impl FileConstant {
    pub fn data_ident(&self) -> String {
        format!("FILE_{}_DATA", self.index)
    }

    pub fn path_ident(&self) -> String {
        format!("FILE_{}_PATH", self.index)
    }

    pub fn size_ident(&self) -> String {
        format!("FILE_{}_SIZE", self.index)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConstant {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapProgram {
    pub project_name: String,
    pub files: Vec<FileConstant>,
    pub commands: Vec<CommandConstant>,
}

impl BootstrapProgram {
    /// Consume a project. File order and command order carry over unchanged.
    pub fn lower(project: Project) -> Self {
        let (project_name, files, commands) = project.into_parts();

        let files = files
            .into_iter()
            .enumerate()
            .map(|(index, EmbeddedFile { relative_path, bytes })| FileConstant {
                index,
                executable: wants_executable(&relative_path),
                path: relative_path,
                bytes,
            })
            .collect();

        let commands = commands
            .iter()
            .map(RunCommand::as_str)
            .map(|text| CommandConstant {
                text: text.to_string(),
            })
            .collect();

        Self {
            project_name,
            files,
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowering_keeps_order_and_flags_executables() {
        let project = Project::new(
            "demo",
            vec![
                EmbeddedFile::new("app/bin/run.sh", b"X".to_vec()),
                EmbeddedFile::new("README.md", b"docs".to_vec()),
                EmbeddedFile::new("tools/bin/helper", b"#!".to_vec()),
                EmbeddedFile::new("scripts/gen.py", b"".to_vec()),
            ],
            vec![RunCommand::new("b"), RunCommand::new("a")],
        );

        let program = BootstrapProgram::lower(project);

        assert_eq!(program.project_name, "demo");
        let flags: Vec<(&str, bool)> = program
            .files
            .iter()
            .map(|f| (f.path.as_str(), f.executable))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("app/bin/run.sh", true),
                ("README.md", false),
                ("tools/bin/helper", true),
                ("scripts/gen.py", true),
            ]
        );
        assert_eq!(program.files[2].data_ident(), "FILE_2_DATA");
        assert_eq!(program.files[0].size(), 1);
        let texts: Vec<&str> = program.commands.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a"]);
    }
}
