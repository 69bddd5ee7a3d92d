// src/build/compiler.rs

//! Real compiler invocation.

use std::io;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::backend::{CompileOutcome, CompileRequest, CompilerBackend};
use crate::errors::Result;

/// Runs the configured compiler as a child process and waits for it.
///
/// Compiler stderr is forwarded to the log line by line at `warn`, stdout at
/// `debug`.
#[derive(Debug, Default)]
pub struct RealCompiler;

impl RealCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl CompilerBackend for RealCompiler {
    fn compile(
        &mut self,
        request: CompileRequest,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<CompileOutcome>> + Send + '_>>
    {
        Box::pin(run_compiler(request))
    }
}

async fn run_compiler(request: CompileRequest) -> Result<CompileOutcome> {
    info!(
        program = %request.program,
        args = ?request.args,
        "starting compiler"
    );

    let mut cmd = Command::new(&request.program);
    cmd.args(&request.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            warn!(program = %request.program, error = %err, "failed to spawn compiler");
            return Ok(CompileOutcome::SpawnFailed(err.to_string()));
        }
    };

    let stdout_task = child.stdout.take().map(|stdout| {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("compiler stdout: {}", line);
            }
        })
    });
    let stderr_task = child.stderr.take().map(|stderr| {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                warn!("compiler: {}", line);
            }
        })
    });

    let waited = child.wait().await;

    // Drain the readers so diagnostics are logged before we report.
    for task in [stdout_task, stderr_task].into_iter().flatten() {
        let _ = task.await;
    }

    Ok(outcome_from_wait(waited))
}

/// Turn the result of waiting on the compiler into an outcome. Losing track
/// of the child is a failed compile, not an I/O error of the tool.
fn outcome_from_wait(waited: io::Result<ExitStatus>) -> CompileOutcome {
    let status = match waited {
        Ok(status) => status,
        Err(err) => {
            warn!(error = %err, "failed to wait for compiler");
            return CompileOutcome::WaitFailed(err.to_string());
        }
    };

    let code = status.code().unwrap_or(-1);
    info!(exit_code = code, success = status.success(), "compiler exited");

    if status.success() {
        CompileOutcome::Success
    } else {
        CompileOutcome::Failed(code)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn exit_statuses_map_to_outcomes() {
        assert_eq!(outcome_from_wait(Ok(ExitStatus::from_raw(0))), CompileOutcome::Success);
        // Raw wait status: exit code in the high byte.
        assert_eq!(
            outcome_from_wait(Ok(ExitStatus::from_raw(1 << 8))),
            CompileOutcome::Failed(1)
        );
        // Killed by SIGKILL.
        assert_eq!(outcome_from_wait(Ok(ExitStatus::from_raw(9))), CompileOutcome::Failed(-1));
    }

    #[test]
    fn wait_error_is_a_failed_compile() {
        let outcome = outcome_from_wait(Err(io::Error::other("child vanished")));
        assert!(!outcome.is_success());
        assert_eq!(outcome.describe(), "lost track of compiler: child vanished");
    }
}
