// src/build/mod.rs

//! Turning generated source into the packaged executable.
//!
//! The [`Builder`] owns the intermediate `<project>_packaged.rs` file from the
//! moment it is written until the compile outcome is known: it is removed on
//! success and left on disk for inspection on failure.

pub mod backend;
pub mod compiler;

pub use backend::{CompileOutcome, CompileRequest, CompilerBackend};
pub use compiler::RealCompiler;

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::collect::GENERATED_SOURCE_SUFFIX;
use crate::config::CompilerSection;
use crate::errors::{Result, RunpackError};
use crate::fs::FileSystem;

/// Crate name passed to the compiler for every generated program.
pub const BOOTSTRAP_CRATE_NAME: &str = "runpack_bootstrap";

/// Path of the intermediate source for `project` in `root`.
pub fn intermediate_source_path(root: &Path, project: &str) -> PathBuf {
    root.join(format!("{project}{GENERATED_SOURCE_SUFFIX}"))
}

/// Path of the packaged executable for `project` in `root`.
pub fn output_binary_path(root: &Path, project: &str) -> PathBuf {
    root.join(project)
}

pub struct Builder<'a> {
    fs: &'a dyn FileSystem,
    compiler: &'a mut dyn CompilerBackend,
    settings: &'a CompilerSection,
}

impl<'a> Builder<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        compiler: &'a mut dyn CompilerBackend,
        settings: &'a CompilerSection,
    ) -> Self {
        Self {
            fs,
            compiler,
            settings,
        }
    }

    /// The request the builder would send for `source` and `output`.
    pub fn request_for(&self, source: &Path, output: &Path) -> CompileRequest {
        let mut args = Vec::with_capacity(self.settings.extra_args.len() + 5);
        if !self.settings.opt_flag.is_empty() {
            args.push(self.settings.opt_flag.clone());
        }
        args.extend(self.settings.extra_args.iter().cloned());
        args.push("--crate-name".to_string());
        args.push(BOOTSTRAP_CRATE_NAME.to_string());
        args.push(source.display().to_string());
        args.push("-o".to_string());
        args.push(output.display().to_string());

        CompileRequest {
            program: self.settings.program.clone(),
            args,
            source: source.to_path_buf(),
            output: output.to_path_buf(),
        }
    }

    /// Write `source_text`, compile it, and return the executable's path.
    pub async fn build(
        &mut self,
        root: &Path,
        project: &str,
        source_text: &str,
    ) -> Result<PathBuf> {
        let source = intermediate_source_path(root, project);
        let output = output_binary_path(root, project);

        self.fs.write(&source, source_text.as_bytes())?;
        info!(path = %source.display(), bytes = source_text.len(), "wrote generated source");

        let request = self.request_for(&source, &output);
        let outcome = self.compiler.compile(request).await?;

        if !outcome.is_success() {
            error!(
                path = %source.display(),
                outcome = %outcome.describe(),
                "compilation failed; keeping generated source"
            );
            return Err(RunpackError::CompileFailed {
                source_path: source,
                detail: outcome.describe(),
            });
        }

        if self.settings.keep_source {
            info!(path = %source.display(), "keeping generated source");
        } else if let Err(err) = self.fs.remove_file(&source) {
            warn!(path = %source.display(), error = %err, "could not remove generated source");
        }

        info!(path = %output.display(), "built packaged executable");
        Ok(output)
    }
}
