//! Turning raw sandbox output into a verdict and ordered logs.

use proctor_common::types::Verdict;

use crate::harness::marker;
use crate::sandbox::{SandboxResult, SandboxStatus};

/// Verdict plus the log lines that justify it, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRun {
    pub verdict: Verdict,
    pub logs: Vec<String>,
}

/// Splits stdout into ordered log lines, dropping blank lines and
/// trailing carriage returns.
pub fn collect_logs(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect()
}

/// Classifies one sandbox result.
///
/// Precedence: timeout, then compile failure, then the harness marker
/// lines. Timeouts and compile failures come from the host's structured
/// channels; only the remaining classes key off the marker vocabulary in
/// stdout. A guest that prints a bare `VERDICT:` line of its own can
/// still spoof those classes, which is inherited behavior.
///
/// The timeout notice quotes the budget carried on the status, so it
/// names whichever phase's limit actually expired.
pub fn classify(result: &SandboxResult) -> ParsedRun {
    if let SandboxStatus::TimedOut { budget_ms } = result.status {
        let mut logs = collect_logs(&result.stdout);
        logs.push(format!(
            "Time Limit Exceeded: execution did not finish within {budget_ms} ms"
        ));
        return ParsedRun {
            verdict: Verdict::TimeLimitExceeded,
            logs,
        };
    }

    if result.compile_failed {
        let mut logs = vec![marker::COMPILATION_ERROR.to_string()];
        logs.extend(collect_logs(&result.stdout));
        logs.extend(collect_logs(&result.stderr));
        return ParsedRun {
            verdict: Verdict::CompilationError,
            logs,
        };
    }

    let logs = collect_logs(&result.stdout);
    let verdict = if has_marker(&logs, marker::RUNTIME_ERROR) {
        Verdict::RuntimeError
    } else if has_marker(&logs, marker::ACCEPTED) {
        Verdict::Accepted
    } else if has_marker(&logs, marker::CUSTOM_RUN_COMPLETE) {
        Verdict::CustomRunComplete
    } else {
        // no terminal marker at all also lands here, e.g. a guest that
        // exited early without printing its verdict line
        Verdict::WrongAnswer
    };
    ParsedRun { verdict, logs }
}

fn has_marker(logs: &[String], marker: &str) -> bool {
    logs.iter().any(|line| line == marker)
}

/// Payload of the first `Result:` line, trimmed.
pub fn extract_result_payload(logs: &[String]) -> Option<String> {
    logs.iter().find_map(|line| {
        line.strip_prefix(marker::RESULT_PREFIX)
            .map(|rest| rest.trim().to_string())
    })
}
