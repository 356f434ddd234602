use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Languages the judge can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    Java,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Python,
        Language::JavaScript,
        Language::Java,
        Language::Cpp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Java => "java",
            Language::Cpp => "cpp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" | "python3" | "py" => Ok(Language::Python),
            "javascript" | "js" | "node" => Ok(Language::JavaScript),
            "java" => Ok(Language::Java),
            "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// A single test case: positional arguments for the entry point, plus an
/// optional expected output.
///
/// `output` distinguishes "no expected value" from an expected value that
/// happens to be falsy: `Some(0)` and `Some(false)` are judged values,
/// while an explicit JSON `null` means the same as an absent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
}

impl TestCase {
    pub fn judged(input: Vec<Value>, output: Value) -> Self {
        Self {
            input,
            output: Some(output),
        }
    }

    /// A case with no expected output; it prints its result instead of
    /// being compared.
    pub fn exploratory(input: Vec<Value>) -> Self {
        Self {
            input,
            output: None,
        }
    }

    /// Expected output, treating an explicit `null` as absent.
    pub fn expected(&self) -> Option<&Value> {
        match &self.output {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn is_judged(&self) -> bool {
        self.expected().is_some()
    }
}

/// Whether a problem's submissions are executed or accepted on receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemCategory {
    #[default]
    Executable,
    Conceptual,
}

/// An execution request as received over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub language: Language,
    pub source_code: String,
    pub problem_title: String,
    /// Name of the `Solution` method the harness invokes.
    pub entry_point: String,
    #[serde(default)]
    pub category: ProblemCategory,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    /// When present, overrides the stored test set with a single
    /// exploratory case built from these arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_input: Option<Vec<Value>>,
}

/// Final classification of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    RuntimeError,
    CompilationError,
    TimeLimitExceeded,
    CustomRunComplete,
    Error,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Accepted => "accepted",
            Verdict::WrongAnswer => "wrong_answer",
            Verdict::RuntimeError => "runtime_error",
            Verdict::CompilationError => "compilation_error",
            Verdict::TimeLimitExceeded => "time_limit_exceeded",
            Verdict::CustomRunComplete => "custom_run_complete",
            Verdict::Error => "error",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional post-acceptance code annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Time complexity, e.g. `O(n log n)`.
    pub time: String,
    /// Space complexity.
    pub space: String,
    pub explanation: String,
}

/// The response returned for every execution request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub status: Verdict,
    /// Ordered per-case log lines from the harness, plus any notices the
    /// judge appends.
    pub logs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}

/// A trusted implementation used to verify custom-input runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSolution {
    pub language: Language,
    pub entry_point: String,
    pub source_code: String,
}
