use serde::{Deserialize, Serialize};

/// One submission: source code plus the cases to judge it against.
/// Immutable once received; case order is significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    pub language: String,
    pub code: String,
    #[serde(rename = "testCases")]
    pub test_cases: Vec<TestCase>,
}

/// A test case has no identity beyond its position in the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected: String,
}

/// Verdict for a single test case, emitted in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    pub passed: bool,
    pub output: String,
    pub error: String,
}
