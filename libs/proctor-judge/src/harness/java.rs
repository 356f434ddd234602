use proctor_common::types::Language;
use serde_json::Value;

use super::LanguageEmitter;
use crate::literal;

/// Emits a Java driver as a single `Main.java` compilation unit: shared
/// imports, the user's (non-public) `Solution` class, then the `Main`
/// class.
///
/// Results are held as `Object` so primitive returns autobox; `same`
/// dispatches to `Arrays.equals`/`deepEquals` for arrays and
/// `Objects.equals` otherwise.
pub struct JavaEmitter;

impl JavaEmitter {
    fn args(&self, args: &[Value]) -> String {
        args.iter()
            .map(|value| literal::render(value, Language::Java))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl LanguageEmitter for JavaEmitter {
    fn language(&self) -> Language {
        Language::Java
    }

    fn prologue(&self, user_source: &str) -> String {
        format!(
            r#"import java.util.*;

{user_source}

public class Main {{
    static String show(Object value) {{
        if (value instanceof int[]) return Arrays.toString((int[]) value);
        if (value instanceof long[]) return Arrays.toString((long[]) value);
        if (value instanceof double[]) return Arrays.toString((double[]) value);
        if (value instanceof boolean[]) return Arrays.toString((boolean[]) value);
        if (value instanceof char[]) return Arrays.toString((char[]) value);
        if (value instanceof Object[]) return Arrays.deepToString((Object[]) value);
        return String.valueOf(value);
    }}

    static boolean same(Object a, Object b) {{
        if (a instanceof int[] && b instanceof int[]) return Arrays.equals((int[]) a, (int[]) b);
        if (a instanceof long[] && b instanceof long[]) return Arrays.equals((long[]) a, (long[]) b);
        if (a instanceof double[] && b instanceof double[]) return Arrays.equals((double[]) a, (double[]) b);
        if (a instanceof boolean[] && b instanceof boolean[]) return Arrays.equals((boolean[]) a, (boolean[]) b);
        if (a instanceof char[] && b instanceof char[]) return Arrays.equals((char[]) a, (char[]) b);
        if (a instanceof Object[] && b instanceof Object[]) return Arrays.deepEquals((Object[]) a, (Object[]) b);
        return Objects.equals(a, b);
    }}

    public static void main(String[] args) {{
        Solution sol;
        try {{
            sol = new Solution();
        }} catch (Throwable t) {{
            System.out.println("Runtime Error: " + t);
            System.out.println("VERDICT: RUNTIME ERROR");
            return;
        }}
        int passed = 0;
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
        let expected = literal::render(expected, Language::Java);
        format!(
            r#"        try {{
            Object actual = {call};
            Object expected = {expected};
            if (same(actual, expected)) {{
                passed += 1;
                System.out.println("Test Case {case_no}: PASSED");
            }} else {{
                System.out.println("Test Case {case_no}: FAILED");
                System.out.println("Expected: " + show(expected) + " Got: " + show(actual));
            }}
        }} catch (Throwable t) {{
            System.out.println("Test Case {case_no}: RUNTIME ERROR - " + t);
        }}
"#
        )
    }

    fn render_result_line(&self, case_no: usize, entry_point: &str, args: &[Value]) -> String {
        let call = self.render_call(entry_point, args);
        format!(
            r#"        try {{
            System.out.println("Result: " + show({call}));
        }} catch (Throwable t) {{
            System.out.println("Test Case {case_no}: RUNTIME ERROR - " + t);
        }}
"#
        )
    }

    fn epilogue(&self, judged: bool, judged_total: usize) -> String {
        if judged {
            format!(
                r#"        if (passed == {judged_total}) {{
            System.out.println("VERDICT: ACCEPTED");
        }} else {{
            System.out.println("VERDICT: WRONG ANSWER");
        }}
    }}
}}
"#
            )
        } else {
            r#"        System.out.println("VERDICT: CUSTOM RUN COMPLETE");
    }
}
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
    fn call_renders_typed_array_literals() {
        let call = JavaEmitter.render_call("twoSum", &[json!([2, 7, 11, 15]), json!(9)]);
        assert_eq!(call, "sol.twoSum(new int[]{2, 7, 11, 15}, 9)");
    }

    #[test]
    fn nested_arrays_get_nested_types() {
        let call = JavaEmitter.render_call("rotate", &[json!([[1, 2], [3, 4]])]);
        assert_eq!(
            call,
            "sol.rotate(new int[][]{new int[]{1, 2}, new int[]{3, 4}})"
        );
    }

    #[test]
    fn comparison_holds_results_as_object() {
        let block =
            JavaEmitter.render_comparison(1, "twoSum", &[json!([2, 7]), json!(9)], &json!([0, 1]));
        assert!(block.contains("Object actual = sol.twoSum(new int[]{2, 7}, 9);"));
        assert!(block.contains("Object expected = new int[]{0, 1};"));
        assert!(block.contains("same(actual, expected)"));
        assert!(block.contains("catch (Throwable t)"));
    }

    #[test]
    fn imports_precede_user_source() {
        let cases = vec![TestCase::judged(vec![json!(1)], json!(1))];
        let program =
            super::super::synthesize(&JavaEmitter, "class Solution { int id(int x) { return x; } }", "id", &cases);
        let imports = program.find("import java.util.*;").unwrap();
        let user = program.find("class Solution").unwrap();
        let main = program.find("public class Main").unwrap();
        assert!(imports < user && user < main);
    }
}
