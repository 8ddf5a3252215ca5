pub mod error;
pub mod executor;
pub mod runner;
pub mod types;

pub use error::ExecError;
pub use executor::{Executor, ToolchainExecutor};
pub use types::{CaseResult, RunRequest, TestCase};
