//! End-to-end scenarios against a live Docker daemon.
//!
//! These run real containers, so they are ignored by default. Run them
//! with `cargo test -- --ignored` on a host with Docker and the language
//! images available.

use std::sync::Arc;

use proctor_common::config::{JudgeConfig, LanguageSettings};
use proctor_common::types::{ExecutionRequest, Language, ProblemCategory, TestCase, Verdict};
use serde_json::json;

use crate::orchestrator::Judge;
use crate::registry::StaticRegistry;
use crate::sandbox::{DockerSandbox, Sandbox};

const PYTHON_TWO_SUM: &str = r#"class Solution:
    def twoSum(self, nums, target):
        seen = {}
        for i, n in enumerate(nums):
            if target - n in seen:
                return [seen[target - n], i]
            seen[n] = i
        return []
"#;

const JS_TWO_SUM: &str = r#"class Solution {
    twoSum(nums, target) {
        const seen = new Map();
        for (let i = 0; i < nums.length; i++) {
            if (seen.has(target - nums[i])) {
                return [seen.get(target - nums[i]), i];
            }
            seen.set(nums[i], i);
        }
        return [];
    }
}
"#;

const JAVA_TWO_SUM: &str = r#"import java.util.*;

class Solution {
    public int[] twoSum(int[] nums, int target) {
        Map<Integer, Integer> seen = new HashMap<>();
        for (int i = 0; i < nums.length; i++) {
            if (seen.containsKey(target - nums[i])) {
                return new int[]{seen.get(target - nums[i]), i};
            }
            seen.put(nums[i], i);
        }
        return new int[]{};
    }
}
"#;

const CPP_TWO_SUM: &str = r#"class Solution {
public:
    vector<int> twoSum(vector<int>& nums, int target) {
        unordered_map<int, int> seen;
        for (int i = 0; i < (int)nums.size(); i++) {
            auto it = seen.find(target - nums[i]);
            if (it != seen.end()) {
                return {it->second, i};
            }
            seen[nums[i]] = i;
        }
        return {};
    }
};
"#;

const JS_PALINDROME: &str = r#"class Solution {
    isPalindrome(s) {
        const cleaned = [...s.toLowerCase()].filter(c => /[a-z0-9]/.test(c));
        return cleaned.join("") === cleaned.slice().reverse().join("");
    }
}
"#;

fn docker_judge() -> Judge {
    let sandbox = DockerSandbox::connect(JudgeConfig::default(), LanguageSettings::builtin())
        .expect("docker connection");
    Judge::new(Arc::new(sandbox), Arc::new(StaticRegistry::builtin()))
}

fn two_sum_request(language: Language, source: &str) -> ExecutionRequest {
    ExecutionRequest {
        language,
        source_code: source.into(),
        problem_title: "Two Sum".into(),
        entry_point: "twoSum".into(),
        category: ProblemCategory::Executable,
        test_cases: vec![
            TestCase::judged(vec![json!([2, 7, 11, 15]), json!(9)], json!([0, 1])),
            TestCase::judged(vec![json!([3, 2, 4]), json!(6)], json!([1, 2])),
        ],
        custom_input: None,
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn sandbox_runs_plain_python() {
    let sandbox = DockerSandbox::connect(JudgeConfig::default(), LanguageSettings::builtin())
        .expect("docker connection");
    let result = sandbox
        .run(Language::Python, "print('hello from the guest')", "")
        .await
        .unwrap();
    assert!(result.completed());
    assert!(result.stdout.contains("hello from the guest"));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn python_two_sum_accepted() {
    let report = docker_judge()
        .execute(&two_sum_request(Language::Python, PYTHON_TWO_SUM))
        .await
        .unwrap();
    assert_eq!(report.status, Verdict::Accepted, "logs: {:?}", report.logs);
    assert!(report.logs.contains(&"Test Case 1: PASSED".to_string()));
    assert!(report.logs.contains(&"Test Case 2: PASSED".to_string()));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn javascript_two_sum_accepted() {
    let report = docker_judge()
        .execute(&two_sum_request(Language::JavaScript, JS_TWO_SUM))
        .await
        .unwrap();
    assert_eq!(report.status, Verdict::Accepted, "logs: {:?}", report.logs);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn java_two_sum_accepted() {
    let report = docker_judge()
        .execute(&two_sum_request(Language::Java, JAVA_TWO_SUM))
        .await
        .unwrap();
    assert_eq!(report.status, Verdict::Accepted, "logs: {:?}", report.logs);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn cpp_two_sum_accepted() {
    let report = docker_judge()
        .execute(&two_sum_request(Language::Cpp, CPP_TWO_SUM))
        .await
        .unwrap();
    assert_eq!(report.status, Verdict::Accepted, "logs: {:?}", report.logs);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn wrong_python_solution_fails_with_diff() {
    let buggy = r#"class Solution:
    def twoSum(self, nums, target):
        return [0, 0]
"#;
    let report = docker_judge()
        .execute(&two_sum_request(Language::Python, buggy))
        .await
        .unwrap();
    assert_eq!(report.status, Verdict::WrongAnswer);
    assert!(report.logs.iter().any(|l| l.starts_with("Expected: ")));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn cpp_syntax_error_is_compilation_error() {
    let broken = "class Solution {\npublic:\n    vector<int> twoSum(vector<int>& nums, int target) {\n        return {}\n    }\n};\n";
    let report = docker_judge()
        .execute(&two_sum_request(Language::Cpp, broken))
        .await
        .unwrap();
    assert_eq!(report.status, Verdict::CompilationError);
    assert_eq!(report.logs[0], "Compilation Error");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn python_syntax_error_is_compilation_error() {
    let broken = "class Solution:\n    def twoSum(self, nums, target)\n        return []\n";
    let report = docker_judge()
        .execute(&two_sum_request(Language::Python, broken))
        .await
        .unwrap();
    assert_eq!(report.status, Verdict::CompilationError);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn python_exception_is_runtime_error() {
    let crashing = r#"class Solution:
    def twoSum(self, nums, target):
        raise ValueError("no answer today")
"#;
    let report = docker_judge()
        .execute(&two_sum_request(Language::Python, crashing))
        .await
        .unwrap();
    // per-case recovery keeps iterating, so this lands as wrong answer
    // unless the failure is fatal; either way the message is logged
    assert!(matches!(
        report.status,
        Verdict::WrongAnswer | Verdict::RuntimeError
    ));
    assert!(report
        .logs
        .iter()
        .any(|l| l.contains("RUNTIME ERROR") && l.contains("no answer today")));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn infinite_loop_is_time_limit_exceeded() {
    let spinning = r#"class Solution:
    def twoSum(self, nums, target):
        while True:
            pass
"#;
    let report = docker_judge()
        .execute(&two_sum_request(Language::Python, spinning))
        .await
        .unwrap();
    assert_eq!(report.status, Verdict::TimeLimitExceeded);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn custom_input_verified_against_builtin_reference() {
    let mut request = two_sum_request(Language::JavaScript, JS_TWO_SUM);
    request.test_cases = vec![];
    request.custom_input = Some(vec![json!([1, 5, 3]), json!(8)]);
    let report = docker_judge().execute(&request).await.unwrap();
    assert_eq!(report.status, Verdict::Accepted, "logs: {:?}", report.logs);
    assert!(report.logs.iter().any(|l| l.starts_with("Expected: ")));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn custom_input_reconciles_across_languages() {
    // python submission against the stored javascript reference; the two
    // harnesses must agree on the Result: payload text
    let mut request = two_sum_request(Language::Python, PYTHON_TWO_SUM);
    request.test_cases = vec![];
    request.custom_input = Some(vec![json!([1, 5, 3]), json!(8)]);
    let report = docker_judge().execute(&request).await.unwrap();
    assert_eq!(report.status, Verdict::Accepted, "logs: {:?}", report.logs);
    assert!(report.logs.contains(&"Result: [1, 2]".to_string()));
    assert!(report.logs.contains(&"Expected: [1, 2]".to_string()));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn boolean_results_reconcile_across_languages() {
    // javascript submission against the stored python reference
    let request = ExecutionRequest {
        language: Language::JavaScript,
        source_code: JS_PALINDROME.into(),
        problem_title: "Valid Palindrome".into(),
        entry_point: "isPalindrome".into(),
        category: ProblemCategory::Executable,
        test_cases: vec![],
        custom_input: Some(vec![json!("A man, a plan, a canal: Panama")]),
    };
    let report = docker_judge().execute(&request).await.unwrap();
    assert_eq!(report.status, Verdict::Accepted, "logs: {:?}", report.logs);
    assert!(report.logs.contains(&"Expected: true".to_string()));
}
