use std::io;
use thiserror::Error;

/// Failure modes of a single execution, surfaced per test case.
///
/// Variants that capture toolchain output (`Compile`, `Run`) carry the
/// captured text so callers can surface it without re-running anything.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("failed to prepare source artifact: {0}")]
    Prepare(#[source] io::Error),

    #[error("compilation failed: {diagnostics}")]
    Compile { diagnostics: String },

    #[error("failed to start process: {0}")]
    Spawn(#[source] io::Error),

    #[error("process exited with status {code:?}: {stderr}")]
    Run { stderr: String, code: Option<i32> },
}
