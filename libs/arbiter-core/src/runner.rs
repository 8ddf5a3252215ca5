/// Test Runner - Sequential Per-Case Judging
///
/// **Core Responsibility:**
/// Run one submission against many test cases and judge each.
///
/// **Critical Properties:**
/// - Knows nothing about toolchains or temp artifacts (executor's job)
/// - Cases run strictly in order; one case's failure never aborts the rest
/// - Always produces exactly one result per case, in case order
///
/// **Normalization Rules:**
/// - Trim leading/trailing whitespace before comparing: YES
/// - Internal whitespace, case, everything else: exact match required
/// - Floating-point tolerance: NO
use tracing::{error, info};

use crate::executor::Executor;
use crate::types::{CaseResult, TestCase};

/// Judge captured output against the expected text.
/// Only leading and trailing whitespace is ignored.
fn judge(output: &str, expected: &str) -> bool {
    output.trim() == expected
}

/// Run a submission against every test case, sequentially.
///
/// Executor failures are contained per case: the result records the error
/// message with an empty output, and the next case still runs. Successful
/// runs keep the raw untrimmed stdout; trimming applies only to the
/// comparison.
pub async fn run_cases(
    executor: &dyn Executor,
    language: &str,
    code: &str,
    cases: &[TestCase],
) -> Vec<CaseResult> {
    let mut results = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        match executor.execute(language, code, &case.input).await {
            Ok(output) => {
                let passed = judge(&output, &case.expected);
                info!(case = idx + 1, passed, "Case judged");
                results.push(CaseResult {
                    passed,
                    output,
                    error: String::new(),
                });
            }
            Err(e) => {
                error!(case = idx + 1, error = %e, "Case execution failed");
                results.push(CaseResult {
                    passed: false,
                    output: String::new(),
                    error: e.to_string(),
                });
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Scripted executor: maps each input to a canned outcome and records
    /// the order in which inputs were seen.
    struct ScriptedExecutor {
        outcomes: Vec<(&'static str, Result<&'static str, &'static str>)>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedExecutor {
        fn new(outcomes: Vec<(&'static str, Result<&'static str, &'static str>)>) -> Self {
            Self {
                outcomes,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl Executor for ScriptedExecutor {
        async fn execute(
            &self,
            _language: &str,
            _code: &str,
            input: &str,
        ) -> Result<String, ExecError> {
            self.seen.lock().unwrap().push(input.to_string());
            let (_, outcome) = self
                .outcomes
                .iter()
                .find(|(scripted, _)| *scripted == input)
                .expect("unscripted input");
            match outcome {
                Ok(stdout) => Ok(stdout.to_string()),
                Err(stderr) => Err(ExecError::Run {
                    stderr: stderr.to_string(),
                    code: Some(1),
                }),
            }
        }
    }

    fn case(input: &str, expected: &str) -> TestCase {
        TestCase {
            input: input.to_string(),
            expected: expected.to_string(),
        }
    }

    #[test]
    fn judge_trims_only_outer_whitespace() {
        assert!(judge("hello", "hello"));
        assert!(judge("  hello  \n", "hello"));
        assert!(judge("\nhello\n", "hello"));
        assert!(judge("   \n", ""));
        assert!(!judge("hello world", "hello  world"));
        assert!(!judge("Hello", "hello"));
    }

    #[tokio::test]
    async fn one_result_per_case_in_order() {
        let executor = ScriptedExecutor::new(vec![
            ("1\n", Ok("one\n")),
            ("2\n", Ok("two\n")),
            ("3\n", Ok("three\n")),
        ]);
        let cases = vec![case("1\n", "one"), case("2\n", "two"), case("3\n", "three")];

        let results = run_cases(&executor, "python", "code", &cases).await;

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed));
        assert_eq!(
            *executor.seen.lock().unwrap(),
            vec!["1\n", "2\n", "3\n"]
        );
    }

    #[tokio::test]
    async fn raw_output_preserved_and_trim_applied_for_comparison() {
        let executor = ScriptedExecutor::new(vec![("5\n", Ok("5\n"))]);
        let cases = vec![case("5\n", "5")];

        let results = run_cases(&executor, "python", "code", &cases).await;

        assert_eq!(
            results,
            vec![CaseResult {
                passed: true,
                output: "5\n".to_string(),
                error: String::new(),
            }]
        );
    }

    #[tokio::test]
    async fn mismatch_is_a_failure_not_an_error() {
        let executor = ScriptedExecutor::new(vec![("x", Ok("actual\n"))]);
        let cases = vec![case("x", "expected")];

        let results = run_cases(&executor, "python", "code", &cases).await;

        assert!(!results[0].passed);
        assert_eq!(results[0].output, "actual\n");
        assert_eq!(results[0].error, "");
    }

    #[tokio::test]
    async fn executor_error_does_not_abort_remaining_cases() {
        let executor = ScriptedExecutor::new(vec![
            ("a", Ok("ok\n")),
            ("b", Err("Traceback: boom")),
            ("c", Ok("ok\n")),
        ]);
        let cases = vec![case("a", "ok"), case("b", "ok"), case("c", "ok")];

        let results = run_cases(&executor, "python", "code", &cases).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].passed);

        assert!(!results[1].passed);
        assert_eq!(results[1].output, "");
        assert!(results[1].error.contains("Traceback: boom"));

        assert!(results[2].passed);
        assert_eq!(
            *executor.seen.lock().unwrap(),
            vec!["a", "b", "c"]
        );
    }

    #[tokio::test]
    async fn unsupported_language_fails_every_case_with_error_text() {
        struct Unsupported;

        #[async_trait]
        impl Executor for Unsupported {
            async fn execute(
                &self,
                language: &str,
                _code: &str,
                _input: &str,
            ) -> Result<String, ExecError> {
                Err(ExecError::UnsupportedLanguage(language.to_string()))
            }
        }

        let cases = vec![case("1", "1"), case("2", "2")];
        let results = run_cases(&Unsupported, "brainfuck", "+.", &cases).await;

        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(!result.passed);
            assert_eq!(result.output, "");
            assert!(result.error.contains("brainfuck"));
        }
    }

    #[tokio::test]
    async fn empty_case_list_yields_empty_results() {
        let executor = ScriptedExecutor::new(vec![]);
        let results = run_cases(&executor, "python", "code", &[]).await;
        assert!(results.is_empty());
    }
}
