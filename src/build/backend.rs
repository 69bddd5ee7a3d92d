// src/build/backend.rs

//! Pluggable compiler backend abstraction.
//!
//! The builder talks to a `CompilerBackend` instead of spawning processes
//! itself, so tests can swap in a fake compiler that records requests and
//! reports whatever outcome the test needs.
//!
//! - [`RealCompiler`](super::compiler::RealCompiler) runs the configured
//!   toolchain with `tokio::process`.
//! - `runpack-test-utils` provides a `FakeCompiler`.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::errors::Result;

/// Everything needed to compile one generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub program: String,
    /// Full argument list, in order.
    pub args: Vec<String>,
    pub source: PathBuf,
    pub output: PathBuf,
}

/// What the compiler reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Success,
    /// Exit code, or -1 when the process was killed by a signal.
    Failed(i32),
    /// The compiler could not be started at all.
    SpawnFailed(String),
    /// The compiler started but waiting on it failed.
    WaitFailed(String),
}

impl CompileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompileOutcome::Success)
    }

    pub fn describe(&self) -> String {
        match self {
            CompileOutcome::Success => "success".to_string(),
            CompileOutcome::Failed(code) => format!("compiler exited with status {code}"),
            CompileOutcome::SpawnFailed(reason) => format!("could not start compiler: {reason}"),
            CompileOutcome::WaitFailed(reason) => format!("lost track of compiler: {reason}"),
        }
    }
}

/// Trait abstracting how generated sources are compiled.
pub trait CompilerBackend: Send {
    fn compile(
        &mut self,
        request: CompileRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompileOutcome>> + Send + '_>>;
}
