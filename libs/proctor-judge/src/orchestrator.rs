//! Top-level execution orchestration.
//!
//! One request flows through receiving, test-set selection, synthesis,
//! dispatch, parsing, reconciliation, and response assembly. Conceptual
//! submissions and empty test sets leave the pipeline early; custom-input
//! requests with a catalogued reference fan out into two concurrent
//! sandbox runs whose results are reconciled afterwards.

use std::sync::Arc;

use proctor_common::types::{
    ExecutionReport, ExecutionRequest, ProblemCategory, TestCase, Verdict,
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::annotate::Annotator;
use crate::error::{JudgeError, Result};
use crate::harness;
use crate::registry::ReferenceRegistry;
use crate::sandbox::{Sandbox, SandboxResult};
use crate::verdict::{self, ParsedRun};

/// Upper bound on submitted user source.
pub const MAX_SOURCE_BYTES: usize = 1024 * 1024;

/// Judges execution requests end to end.
///
/// Collaborators are injected so tests can script the sandbox and
/// deployments can swap the registry without touching this type.
pub struct Judge {
    sandbox: Arc<dyn Sandbox>,
    registry: Arc<dyn ReferenceRegistry>,
    annotator: Option<Arc<dyn Annotator>>,
}

impl Judge {
    pub fn new(sandbox: Arc<dyn Sandbox>, registry: Arc<dyn ReferenceRegistry>) -> Self {
        Self {
            sandbox,
            registry,
            annotator: None,
        }
    }

    pub fn with_annotator(mut self, annotator: Arc<dyn Annotator>) -> Self {
        self.annotator = Some(annotator);
        self
    }

    /// Executes one request to a final report.
    ///
    /// `Err` is returned only for requests rejected before dispatch;
    /// everything after that point degrades into a report so the caller
    /// always has logs to show.
    pub async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionReport> {
        self.validate(request)?;

        if request.category == ProblemCategory::Conceptual {
            debug!(title = %request.problem_title, "conceptual submission accepted without execution");
            return Ok(ExecutionReport {
                status: Verdict::Accepted,
                logs: vec!["Conceptual submission recorded; nothing to execute.".into()],
                analysis: None,
            });
        }

        let job_id = Uuid::new_v4();
        info!(
            job_id = %job_id,
            language = %request.language,
            title = %request.problem_title,
            "starting execution"
        );

        let cases = match &request.custom_input {
            Some(values) => vec![TestCase::exploratory(values.clone())],
            None if request.test_cases.is_empty() => {
                warn!(job_id = %job_id, title = %request.problem_title, "no test cases configured");
                return Ok(ExecutionReport {
                    status: Verdict::Error,
                    logs: vec!["No test cases configured for this problem.".into()],
                    analysis: None,
                });
            }
            None => request.test_cases.clone(),
        };

        let emitter = harness::emitter_for(request.language);
        let program = harness::synthesize(
            emitter.as_ref(),
            &request.source_code,
            &request.entry_point,
            &cases,
        );

        let reference = if request.custom_input.is_some() {
            self.registry.lookup(&request.problem_title)
        } else {
            None
        };

        let (user_run, reference_run) = match reference {
            Some(solution) => {
                debug!(job_id = %job_id, "dispatching user and reference runs concurrently");
                let ref_emitter = harness::emitter_for(solution.language);
                let ref_program = harness::synthesize(
                    ref_emitter.as_ref(),
                    &solution.source_code,
                    &solution.entry_point,
                    &cases,
                );
                let (user, reference) = tokio::join!(
                    self.sandbox.run(request.language, &program, ""),
                    self.sandbox.run(solution.language, &ref_program, ""),
                );
                (user, Some(reference))
            }
            None => (
                self.sandbox.run(request.language, &program, "").await,
                None,
            ),
        };

        let user_result = match user_run {
            Ok(result) => result,
            Err(e) => {
                error!(job_id = %job_id, error = %e, "sandbox dispatch failed");
                return Ok(ExecutionReport {
                    status: Verdict::Error,
                    logs: vec![format!("Execution failed: {e}")],
                    analysis: None,
                });
            }
        };

        let mut parsed = verdict::classify(&user_result);

        if let Some(reference_run) = reference_run {
            self.reconcile(&mut parsed, reference_run, job_id);
        }

        let analysis = if parsed.verdict == Verdict::Accepted {
            self.annotate(request).await
        } else {
            None
        };

        info!(job_id = %job_id, verdict = %parsed.verdict, "execution finished");
        Ok(ExecutionReport {
            status: parsed.verdict,
            logs: parsed.logs,
            analysis,
        })
    }

    fn validate(&self, request: &ExecutionRequest) -> Result<()> {
        if request.source_code.trim().is_empty() {
            return Err(JudgeError::Request("source code must not be empty".into()));
        }
        if request.source_code.len() > MAX_SOURCE_BYTES {
            return Err(JudgeError::Request(format!(
                "source code exceeds {MAX_SOURCE_BYTES} bytes"
            )));
        }
        if request.problem_title.trim().is_empty() {
            return Err(JudgeError::Request("problem title must not be empty".into()));
        }
        if request.category == ProblemCategory::Executable {
            // the entry point is spliced into generated source, so it must
            // be a plain identifier
            if !valid_identifier(&request.entry_point) {
                return Err(JudgeError::Request(format!(
                    "entry point {:?} is not a valid identifier",
                    request.entry_point
                )));
            }
            if !self.sandbox.supports(request.language) {
                return Err(JudgeError::Configuration(format!(
                    "language {} is not configured",
                    request.language
                )));
            }
        }
        Ok(())
    }

    /// Reconciles a completed custom run against the reference result.
    ///
    /// Runs only when the user's harness finished its exploratory pass; a
    /// timed-out or crashed user run keeps its coarse verdict. An unusable
    /// reference run (host failure, compile failure, timeout, or no
    /// `Result:` line) also keeps the coarse verdict.
    fn reconcile(&self, parsed: &mut ParsedRun, reference_run: Result<SandboxResult>, job_id: Uuid) {
        if parsed.verdict != Verdict::CustomRunComplete {
            debug!(job_id = %job_id, verdict = %parsed.verdict, "user run did not complete; skipping reconciliation");
            return;
        }
        let reference = match reference_run {
            Ok(result) if result.completed() => result,
            Ok(_) => {
                warn!(job_id = %job_id, "reference run did not complete; keeping coarse verdict");
                return;
            }
            Err(e) => {
                warn!(job_id = %job_id, error = %e, "reference run failed; keeping coarse verdict");
                return;
            }
        };
        let reference_logs = verdict::collect_logs(&reference.stdout);
        let Some(expected) = verdict::extract_result_payload(&reference_logs) else {
            warn!(job_id = %job_id, "reference run produced no result line; keeping coarse verdict");
            return;
        };
        let actual = verdict::extract_result_payload(&parsed.logs);
        parsed.logs.push(format!("Expected: {expected}"));
        parsed.verdict = if actual.as_deref() == Some(expected.as_str()) {
            Verdict::Accepted
        } else {
            Verdict::WrongAnswer
        };
    }

    async fn annotate(&self, request: &ExecutionRequest) -> Option<proctor_common::types::Analysis> {
        let annotator = self.annotator.as_ref()?;
        match annotator
            .annotate(request.language, &request.source_code)
            .await
        {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!(error = %e, "annotation failed; verdict unchanged");
                None
            }
        }
    }
}

fn valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
