use proctor_common::types::Language;
use serde_json::Value;

use super::LanguageEmitter;
use crate::literal;

/// Emits a Node.js driver. Comparison is array-aware (`__eq` recurses into
/// arrays, strict equality for scalars) and `__show` renders the shared
/// repr: comma-space arrays, bare scalars.
pub struct JsEmitter;

impl JsEmitter {
    fn args(&self, args: &[Value]) -> String {
        args.iter()
            .map(|value| literal::render(value, Language::JavaScript))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl LanguageEmitter for JsEmitter {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn prologue(&self, user_source: &str) -> String {
        format!(
            r#"{user_source}

function __eq(a, b) {{
    if (Array.isArray(a) && Array.isArray(b)) {{
        if (a.length !== b.length) return false;
        for (let i = 0; i < a.length; i++) {{
            if (!__eq(a[i], b[i])) return false;
        }}
        return true;
    }}
    return a === b;
}}

function __show(value) {{
    if (Array.isArray(value)) {{
        return "[" + value.map(__show).join(", ") + "]";
    }}
    return String(value);
}}

function __fail(err) {{
    return err && err.message ? err.message : String(err);
}}

function __main() {{
    let sol;
    try {{
        sol = new Solution();
    }} catch (err) {{
        console.log("Runtime Error: " + __fail(err));
        console.log("VERDICT: RUNTIME ERROR");
        return;
    }}
    let passed = 0;
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
        let expected = literal::render(expected, Language::JavaScript);
        format!(
            r#"    try {{
        const actual = {call};
        const expected = {expected};
        if (__eq(actual, expected)) {{
            passed += 1;
            console.log("Test Case {case_no}: PASSED");
        }} else {{
            console.log("Test Case {case_no}: FAILED");
            console.log("Expected: " + __show(expected) + " Got: " + __show(actual));
        }}
    }} catch (err) {{
        console.log("Test Case {case_no}: RUNTIME ERROR - " + __fail(err));
    }}
"#
        )
    }

    fn render_result_line(&self, case_no: usize, entry_point: &str, args: &[Value]) -> String {
        let call = self.render_call(entry_point, args);
        format!(
            r#"    try {{
        console.log("Result: " + __show({call}));
    }} catch (err) {{
        console.log("Test Case {case_no}: RUNTIME ERROR - " + __fail(err));
    }}
"#
        )
    }

    fn epilogue(&self, judged: bool, judged_total: usize) -> String {
        if judged {
            format!(
                r#"    if (passed === {judged_total}) {{
        console.log("VERDICT: ACCEPTED");
    }} else {{
        console.log("VERDICT: WRONG ANSWER");
    }}
}}

__main();
"#
            )
        } else {
            r#"    console.log("VERDICT: CUSTOM RUN COMPLETE");
}

__main();
"#
            .to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proctor_common::types::TestCase;
    use serde_json::json;

    #[test]
    fn call_renders_js_literals() {
        let call = JsEmitter.render_call("twoSum", &[json!([2, 7, 11, 15]), json!(9)]);
        assert_eq!(call, "sol.twoSum([2, 7, 11, 15], 9)");
    }

    #[test]
    fn comparison_uses_deep_equality_helper() {
        let block =
            JsEmitter.render_comparison(2, "twoSum", &[json!([3, 2, 4]), json!(6)], &json!([1, 2]));
        assert!(block.contains("const actual = sol.twoSum([3, 2, 4], 6);"));
        assert!(block.contains("__eq(actual, expected)"));
        assert!(block.contains("Test Case 2: PASSED"));
        assert!(block.contains("Test Case 2: RUNTIME ERROR - "));
    }

    #[test]
    fn cases_scope_their_locals() {
        // consecutive judged cases redeclare `actual` inside separate try
        // blocks; the program must not hoist them into a shared scope
        let cases = vec![
            TestCase::judged(vec![json!(1)], json!(1)),
            TestCase::judged(vec![json!(2)], json!(2)),
        ];
        let program = super::super::synthesize(&JsEmitter, "class Solution {}", "id", &cases);
        assert_eq!(program.matches("const actual =").count(), 2);
        assert_eq!(program.matches("try {").count(), 3); // guard + 2 cases
    }

    #[test]
    fn exploratory_prints_single_result() {
        let block = JsEmitter.render_result_line(1, "twoSum", &[json!([1, 2]), json!(3)]);
        assert!(block.contains("console.log(\"Result: \" + __show(sol.twoSum([1, 2], 3)));"));
    }

    #[test]
    fn show_helper_renders_arrays_comma_space() {
        // payloads must compare byte-for-byte against the other emitters
        // during reconciliation, so no JSON.stringify
        let prologue = JsEmitter.prologue("class Solution {}");
        assert!(prologue.contains(r#"value.map(__show).join(", ")"#));
        assert!(!prologue.contains("JSON.stringify"));
    }
}
