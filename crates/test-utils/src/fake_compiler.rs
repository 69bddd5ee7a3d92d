use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use runpack::build::{CompileOutcome, CompileRequest, CompilerBackend};
use runpack::errors::{Result, RunpackError};
use runpack::fs::FileSystem;

/// A fake compiler that:
/// - records every request it receives
/// - optionally captures the source text it was asked to compile
/// - reports a fixed outcome, writing a stub "binary" on success.
pub struct FakeCompiler {
    outcome: CompileOutcome,
    requests: Arc<Mutex<Vec<CompileRequest>>>,
    sources: Arc<Mutex<Vec<String>>>,
    fs: Option<Arc<dyn FileSystem>>,
}

impl FakeCompiler {
    pub fn succeeding() -> Self {
        Self::with_outcome(CompileOutcome::Success)
    }

    pub fn failing(code: i32) -> Self {
        Self::with_outcome(CompileOutcome::Failed(code))
    }

    pub fn with_outcome(outcome: CompileOutcome) -> Self {
        Self {
            outcome,
            requests: Arc::new(Mutex::new(Vec::new())),
            sources: Arc::new(Mutex::new(Vec::new())),
            fs: None,
        }
    }

    /// Read sources from, and write stub binaries to, `fs`.
    pub fn on_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    pub fn requests(&self) -> Vec<CompileRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn sources(&self) -> Vec<String> {
        self.sources.lock().unwrap().clone()
    }
}

impl CompilerBackend for FakeCompiler {
    fn compile(
        &mut self,
        request: CompileRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompileOutcome>> + Send + '_>> {
        let outcome = self.outcome.clone();
        let requests = Arc::clone(&self.requests);
        let sources = Arc::clone(&self.sources);
        let fs = self.fs.clone();

        Box::pin(async move {
            if let Some(fs) = fs {
                let text = fs.read_to_string(&request.source)?;
                sources.lock().unwrap().push(text);
                if outcome.is_success() {
                    fs.write(&request.output, b"\x7fELF stub")?;
                }
            }
            requests.lock().unwrap().push(request);
            Ok::<_, RunpackError>(outcome)
        })
    }
}
