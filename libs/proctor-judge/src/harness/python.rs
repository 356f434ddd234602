use proctor_common::types::Language;
use serde_json::Value;

use super::LanguageEmitter;
use crate::literal;

/// Emits a Python 3 driver. The whole driver lives in a `_run()` function
/// so the construction guard can abort with a plain `return`; `_show`
/// renders the shared repr (lowercase booleans, `null`, comma-space lists)
/// instead of `str()`.
pub struct PythonEmitter;

impl PythonEmitter {
    fn args(&self, args: &[Value]) -> String {
        args.iter()
            .map(|value| literal::render(value, Language::Python))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl LanguageEmitter for PythonEmitter {
    fn language(&self) -> Language {
        Language::Python
    }

    fn prologue(&self, user_source: &str) -> String {
        format!(
            r#"{user_source}

def _show(value):
    if isinstance(value, bool):
        return "true" if value else "false"
    if value is None:
        return "null"
    if isinstance(value, (list, tuple)):
        return "[" + ", ".join(_show(item) for item in value) + "]"
    return str(value)

def _run():
    try:
        sol = Solution()
    except Exception as exc:
        print("Runtime Error: " + str(exc))
        print("VERDICT: RUNTIME ERROR")
        return
    passed = 0
"#
        )
    }

    fn render_call(&self, entry_point: &str, args: &[Value]) -> String {
        format!("sol.{entry_point}({})", self.args(args))
    }

    fn render_comparison(
        &self,
        case_no: usize,
        entry_point: &str,
        args: &[Value],
        expected: &Value,
    ) -> String {
        let call = self.render_call(entry_point, args);
        let expected = literal::render(expected, Language::Python);
        format!(
            r#"    try:
        actual = {call}
        expected = {expected}
        if actual == expected:
            passed += 1
            print("Test Case {case_no}: PASSED")
        else:
            print("Test Case {case_no}: FAILED")
            print("Expected: " + _show(expected) + " Got: " + _show(actual))
    except Exception as exc:
        print("Test Case {case_no}: RUNTIME ERROR - " + str(exc))
"#
        )
    }

    fn render_result_line(&self, case_no: usize, entry_point: &str, args: &[Value]) -> String {
        let call = self.render_call(entry_point, args);
        format!(
            r#"    try:
        print("Result: " + _show({call}))
    except Exception as exc:
        print("Test Case {case_no}: RUNTIME ERROR - " + str(exc))
"#
        )
    }

    fn epilogue(&self, judged: bool, judged_total: usize) -> String {
        if judged {
            format!(
                r#"    if passed == {judged_total}:
        print("VERDICT: ACCEPTED")
    else:
        print("VERDICT: WRONG ANSWER")

_run()
"#
            )
        } else {
            r#"    print("VERDICT: CUSTOM RUN COMPLETE")

_run()
"#
            .to_string()
        }
    }
}
