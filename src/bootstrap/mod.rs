// src/bootstrap/mod.rs

//! Bootstrap program generation.
//!
//! - [`ir`] lowers a [`Project`] into named constants.
//! - [`escape`] holds the string literal escaping rules.
//! - [`render`] turns the IR into Rust source through a fixed template.
//! - [`runtime`] is the std-only library every generated program embeds; the
//!   tool links the same file and uses its directory helper at build time.

pub mod escape;
pub mod ir;
pub mod render;
pub mod runtime;

#[cfg(test)]
mod runtime_tests;

pub use ir::{BootstrapProgram, CommandConstant, FileConstant};
pub use render::render;

use tracing::debug;

use crate::project::Project;

/// Generate the complete source of the packaged program.
pub fn generate(project: Project) -> String {
    let program = BootstrapProgram::lower(project);
    let source = render(&program);
    debug!(
        files = program.files.len(),
        commands = program.commands.len(),
        bytes = source.len(),
        "rendered bootstrap source"
    );
    source
}
