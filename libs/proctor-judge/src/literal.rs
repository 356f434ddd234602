//! Rendering semantic test values as target-language source literals.

use proctor_common::types::Language;
use serde_json::Value;

/// Renders `value` as a source literal for `language`.
///
/// Strings are wrapped in double quotes with no escaping of embedded
/// quotes or backslashes, matching what the content store holds. Typed
/// languages infer array element types from the first element, so empty
/// and mixed-type arrays render best-effort.
pub fn render(value: &Value, language: Language) -> String {
    match value {
        Value::Null => null_literal(language).to_string(),
        Value::Bool(b) => match language {
            Language::Python => if *b { "True" } else { "False" }.to_string(),
            _ => b.to_string(),
        },
        Value::Number(n) => match language {
            Language::Java => java_number(n),
            _ => n.to_string(),
        },
        Value::String(s) => format!("\"{s}\""),
        Value::Array(items) => render_array(items, language),
        // Objects sit outside the judge's value domain; degrade to the
        // language's null-ish literal rather than emit broken syntax.
        Value::Object(_) => null_literal(language).to_string(),
    }
}

fn null_literal(language: Language) -> &'static str {
    match language {
        Language::Python => "None",
        Language::JavaScript | Language::Java => "null",
        Language::Cpp => "0",
    }
}

// integer literals past the int range need the long suffix to compile
fn java_number(n: &serde_json::Number) -> String {
    match n.as_i64() {
        Some(i) if i32::try_from(i).is_err() => format!("{i}L"),
        _ => n.to_string(),
    }
}

fn render_array(items: &[Value], language: Language) -> String {
    let rendered: Vec<String> = items.iter().map(|v| render(v, language)).collect();
    let joined = rendered.join(", ");
    match language {
        Language::Python | Language::JavaScript => format!("[{joined}]"),
        Language::Cpp => format!("{{{joined}}}"),
        Language::Java => format!("new {}{{{joined}}}", java_array_type(items)),
    }
}

/// Java array type for an array literal, inferred from the first element.
/// Empty arrays fall back to `int[]`.
pub(crate) fn java_array_type(items: &[Value]) -> String {
    format!("{}[]", java_element_type(items.first()))
}

fn java_element_type(first: Option<&Value>) -> String {
    match first {
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => match n.as_i64() {
            Some(i) if i32::try_from(i).is_ok() => "int".into(),
            _ => "long".into(),
        },
        Some(Value::Number(_)) => "double".into(),
        Some(Value::Bool(_)) => "boolean".into(),
        Some(Value::String(_)) => "String".into(),
        Some(Value::Array(inner)) => format!("{}[]", java_element_type(inner.first())),
        _ => "int".into(),
    }
}

/// C++ declaration type for a value, used when the harness materializes
/// arguments as named locals.
pub(crate) fn cpp_type(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => match n.as_i64() {
            Some(i) if i32::try_from(i).is_ok() => "int".into(),
            _ => "long long".into(),
        },
        Value::Number(_) => "double".into(),
        Value::Bool(_) => "bool".into(),
        Value::String(_) => "string".into(),
        Value::Array(items) => {
            let element = items.first().unwrap_or(&Value::Null);
            format!("vector<{}>", cpp_type(element))
        }
        Value::Null | Value::Object(_) => "int".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_per_language() {
        assert_eq!(render(&json!(42), Language::Python), "42");
        assert_eq!(render(&json!(2.5), Language::Cpp), "2.5");
        assert_eq!(render(&json!(true), Language::Python), "True");
        assert_eq!(render(&json!(true), Language::Java), "true");
        assert_eq!(render(&json!("abc"), Language::JavaScript), "\"abc\"");
    }

    #[test]
    fn null_maps_to_language_idiom() {
        assert_eq!(render(&Value::Null, Language::Python), "None");
        assert_eq!(render(&Value::Null, Language::JavaScript), "null");
        assert_eq!(render(&Value::Null, Language::Java), "null");
        assert_eq!(render(&Value::Null, Language::Cpp), "0");
    }

    #[test]
    fn nested_arrays_per_language() {
        let value = json!([[1, 2], [3]]);
        assert_eq!(render(&value, Language::Python), "[[1, 2], [3]]");
        assert_eq!(render(&value, Language::JavaScript), "[[1, 2], [3]]");
        assert_eq!(
            render(&value, Language::Java),
            "new int[][]{new int[]{1, 2}, new int[]{3}}"
        );
        assert_eq!(render(&value, Language::Cpp), "{{1, 2}, {3}}");
    }

    #[test]
    fn java_element_types_follow_first_element() {
        assert_eq!(render(&json!([1.5, 2]), Language::Java), "new double[]{1.5, 2}");
        assert_eq!(
            render(&json!(["a", "b"]), Language::Java),
            "new String[]{\"a\", \"b\"}"
        );
        assert_eq!(
            render(&json!([true, false]), Language::Java),
            "new boolean[]{true, false}"
        );
        // empty arrays degrade to int[]
        assert_eq!(render(&json!([]), Language::Java), "new int[]{}");
    }

    #[test]
    fn wide_integers_widen_to_long() {
        assert_eq!(render(&json!(10_000_000_000i64), Language::Java), "10000000000L");
        assert_eq!(render(&json!(10_000_000_000i64), Language::Python), "10000000000");
        assert_eq!(
            render(&json!([10_000_000_000i64, 1]), Language::Java),
            "new long[]{10000000000L, 1}"
        );
        assert_eq!(cpp_type(&json!([10_000_000_000i64])), "vector<long long>");
        assert_eq!(cpp_type(&json!(-3_000_000_000i64)), "long long");
    }

    #[test]
    fn cpp_types_follow_first_element() {
        assert_eq!(cpp_type(&json!([1, 2])), "vector<int>");
        assert_eq!(cpp_type(&json!([[1], [2]])), "vector<vector<int>>");
        assert_eq!(cpp_type(&json!("s")), "string");
        assert_eq!(cpp_type(&json!(3.2)), "double");
        assert_eq!(cpp_type(&json!([])), "vector<int>");
    }

    #[test]
    fn strings_are_not_escaped() {
        // Embedded quotes pass through untouched; content authors own
        // their payloads.
        let value = json!("say \"hi\"");
        assert_eq!(render(&value, Language::Python), "\"say \"hi\"\"");
    }
}
