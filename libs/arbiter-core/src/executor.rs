/// Language Executor - Per-Language Build-and-Run Pipelines
///
/// **Core Responsibility:**
/// Turn (language, source code, input) into captured process output.
///
/// **Critical Architectural Boundary:**
/// - The executor knows HOW to execute (toolchain commands, temp artifacts)
/// - The executor does NOT judge correctness
/// - The executor returns raw stdout for the runner to judge
///
/// Every invocation owns its temporary artifacts exclusively; they are
/// created when the invocation starts and removed when it ends, on every
/// exit path. Nothing is reused across test cases or requests.
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::process::Stdio;
use std::str::FromStr;

use async_trait::async_trait;
use tempfile::{NamedTempFile, TempDir};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::ExecError;

/// The fixed set of languages with a configured toolchain pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Javascript,
    Golang,
    Java,
    Python,
}

impl FromStr for Language {
    type Err = ExecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "javascript" => Ok(Language::Javascript),
            "golang" => Ok(Language::Golang),
            "java" => Ok(Language::Java),
            "python" => Ok(Language::Python),
            other => Err(ExecError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Javascript => "javascript",
            Language::Golang => "golang",
            Language::Java => "java",
            Language::Python => "python",
        };
        f.write_str(name)
    }
}

impl Language {
    fn pipeline(self) -> Pipeline {
        match self {
            Language::Javascript => Pipeline::Inline {
                interpreter: "node",
                flag: "-e",
            },
            Language::Golang => Pipeline::SourceFile {
                command: "go",
                subcommand: "run",
                extension: ".go",
            },
            Language::Java => Pipeline::CompileThenRun {
                compiler: "javac",
                runtime: "java",
                entry_file: "Main.java",
                main_class: "Main",
            },
            Language::Python => Pipeline::InterpretFile {
                interpreter: "python3",
                extension: ".py",
            },
        }
    }
}

/// One language's build-and-run recipe.
enum Pipeline {
    /// Interpreter takes the program text inline; nothing touches disk.
    Inline {
        interpreter: &'static str,
        flag: &'static str,
    },
    /// Toolchain runs a source file directly, compiling internally.
    SourceFile {
        command: &'static str,
        subcommand: &'static str,
        extension: &'static str,
    },
    /// Separate compiler and runtime; the compiler dictates the entry
    /// file name, so the source lives in its own directory.
    CompileThenRun {
        compiler: &'static str,
        runtime: &'static str,
        entry_file: &'static str,
        main_class: &'static str,
    },
    /// File-based interpreter invocation.
    InterpretFile {
        interpreter: &'static str,
        extension: &'static str,
    },
}

/// Scoped temporary state for one execution.
/// Dropping this removes whatever was created on disk.
enum Artifact {
    None,
    File(NamedTempFile),
    Dir(TempDir),
}

/// A command ready to run plus the artifact that must outlive it.
struct Prepared {
    command: Command,
    artifact: Artifact,
}

impl Pipeline {
    /// Produce an executable artifact for `code`: write source files where
    /// the toolchain expects them and, for compiled languages, run the
    /// compiler. Returns the run command with its backing artifact.
    async fn prepare(&self, code: &str) -> Result<Prepared, ExecError> {
        match self {
            Pipeline::Inline { interpreter, flag } => {
                let mut command = Command::new(interpreter);
                command.arg(flag).arg(code);
                Ok(Prepared {
                    command,
                    artifact: Artifact::None,
                })
            }
            Pipeline::SourceFile {
                command,
                subcommand,
                extension,
            } => {
                let file = write_source_file(code, extension)?;
                let mut run = Command::new(command);
                run.arg(subcommand).arg(file.path());
                Ok(Prepared {
                    command: run,
                    artifact: Artifact::File(file),
                })
            }
            Pipeline::CompileThenRun {
                compiler,
                runtime,
                entry_file,
                main_class,
            } => {
                let dir = TempDir::new().map_err(ExecError::Prepare)?;
                let entry = dir.path().join(entry_file);
                std::fs::write(&entry, code).map_err(ExecError::Prepare)?;

                compile(compiler, &entry).await?;

                let mut run = Command::new(runtime);
                run.arg("-cp").arg(dir.path()).arg(main_class);
                Ok(Prepared {
                    command: run,
                    artifact: Artifact::Dir(dir),
                })
            }
            Pipeline::InterpretFile {
                interpreter,
                extension,
            } => {
                let file = write_source_file(code, extension)?;
                let mut run = Command::new(interpreter);
                run.arg(file.path());
                Ok(Prepared {
                    command: run,
                    artifact: Artifact::File(file),
                })
            }
        }
    }
}

/// Write `code` to a fresh uniquely-named temp file with the language's
/// extension. Unique naming keeps concurrent requests from colliding.
fn write_source_file(code: &str, extension: &str) -> Result<NamedTempFile, ExecError> {
    let mut file = tempfile::Builder::new()
        .prefix("arbiter-")
        .suffix(extension)
        .tempfile()
        .map_err(ExecError::Prepare)?;
    file.write_all(code.as_bytes()).map_err(ExecError::Prepare)?;
    file.flush().map_err(ExecError::Prepare)?;
    Ok(file)
}

/// Run the compiler against the entry file, capturing its stdout/stderr
/// separately from the later run step. A non-zero compiler exit skips the
/// run entirely and carries the diagnostics back to the caller.
async fn compile(compiler: &str, entry: &Path) -> Result<(), ExecError> {
    debug!(compiler, entry = %entry.display(), "Compiling source");

    let output = Command::new(compiler)
        .arg(entry)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(ExecError::Spawn)?;

    if !output.status.success() {
        let diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(compiler, "Compilation failed");
        return Err(ExecError::Compile { diagnostics });
    }

    Ok(())
}

/// Spawn the prepared command, feed it exactly `input` on stdin, and block
/// until it exits with stdout and stderr captured into separate buffers.
///
/// There is deliberately no timeout here: a process that never terminates
/// blocks its caller, matching the reference behavior.
async fn run_process(mut command: Command, input: &str) -> Result<String, ExecError> {
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!(command = ?command.as_std(), "Spawning process");

    let mut child = command.spawn().map_err(ExecError::Spawn)?;

    if let Some(mut stdin) = child.stdin.take() {
        let input = input.to_owned();
        // Feed input from a separate task so a child that emits a lot of
        // output before draining stdin cannot deadlock the pipes.
        tokio::spawn(async move {
            let _ = stdin.write_all(input.as_bytes()).await;
        });
    }

    let output = child
        .wait_with_output()
        .await
        .map_err(ExecError::Spawn)?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        // stdout is dropped on this path; callers see the captured stderr
        // through the error instead.
        Err(ExecError::Run {
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }
}

/// Execution seam between the test runner and a concrete backend.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute `code` once with `input` on stdin.
    /// Ok holds the captured stdout of a zero-exit run.
    async fn execute(&self, language: &str, code: &str, input: &str)
        -> Result<String, ExecError>;
}

/// Runs submissions against the host's language toolchains.
/// Toolchain binaries are resolved through the inherited PATH; a missing
/// toolchain surfaces as a process-start failure.
#[derive(Debug, Default, Clone)]
pub struct ToolchainExecutor;

#[async_trait]
impl Executor for ToolchainExecutor {
    async fn execute(
        &self,
        language: &str,
        code: &str,
        input: &str,
    ) -> Result<String, ExecError> {
        let language: Language = language.parse()?;
        info!(%language, "Executing submission");

        let Prepared { command, artifact } = language.pipeline().prepare(code).await?;
        let result = run_process(command, input).await;
        // Explicit end of the artifact's scope: temp files and dirs are
        // gone before the result leaves this invocation.
        drop(artifact);
        result
    }
}
