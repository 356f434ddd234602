use proctor_common::types::Language;
use serde_json::Value;

use super::LanguageEmitter;
use crate::literal;

/// Emits a C++17 driver.
///
/// Arguments are materialized as typed locals before the call because
/// contest-style signatures take containers by non-const reference, which
/// cannot bind a braced temporary. `render_call` therefore invokes over
/// the names `arg1..argN` declared by the case block.
pub struct CppEmitter;

impl CppEmitter {
    fn declare_args(&self, args: &[Value], indent: &str) -> String {
        args.iter()
            .enumerate()
            .map(|(i, value)| {
                format!(
                    "{indent}{} arg{} = {};\n",
                    literal::cpp_type(value),
                    i + 1,
                    literal::render(value, Language::Cpp)
                )
            })
            .collect()
    }
}

impl LanguageEmitter for CppEmitter {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn prologue(&self, user_source: &str) -> String {
        format!(
            r#"#include <bits/stdc++.h>
using namespace std;

{user_source}

static string __show(bool value) {{ return value ? "true" : "false"; }}
static string __show(int value) {{ return to_string(value); }}
static string __show(long long value) {{ return to_string(value); }}
static string __show(double value) {{
    ostringstream out;
    out << value;
    return out.str();
}}
static string __show(const string& value) {{ return value; }}
static string __show(const char* value) {{ return string(value); }}
template <typename T>
static string __show(const vector<T>& value) {{
    string out = "[";
    for (size_t i = 0; i < value.size(); ++i) {{
        if (i > 0) out += ", ";
        out += __show(value[i]);
    }}
    out += "]";
    return out;
}}

int main() {{
    unique_ptr<Solution> __sol;
    try {{
        __sol = make_unique<Solution>();
    }} catch (const exception& e) {{
        cout << "Runtime Error: " << e.what() << endl;
        cout << "VERDICT: RUNTIME ERROR" << endl;
        return 0;
    }} catch (...) {{
        cout << "Runtime Error: solution construction failed" << endl;
        cout << "VERDICT: RUNTIME ERROR" << endl;
        return 0;
    }}
    Solution& sol = *__sol;
    int passed = 0;
"#
        )
    }

    fn render_call(&self, entry_point: &str, args: &[Value]) -> String {
        let names: Vec<String> = (1..=args.len()).map(|i| format!("arg{i}")).collect();
        format!("sol.{entry_point}({})", names.join(", "))
    }

    fn render_comparison(
        &self,
        case_no: usize,
        entry_point: &str,
        args: &[Value],
        expected: &Value,
    ) -> String {
        let decls = self.declare_args(args, "        ");
        let call = self.render_call(entry_point, args);
        let expected_type = literal::cpp_type(expected);
        let expected = literal::render(expected, Language::Cpp);
        format!(
            r#"    try {{
{decls}        auto actual = {call};
        {expected_type} expected = {expected};
        if (actual == expected) {{
            passed += 1;
            cout << "Test Case {case_no}: PASSED" << endl;
        }} else {{
            cout << "Test Case {case_no}: FAILED" << endl;
            cout << "Expected: " << __show(expected) << " Got: " << __show(actual) << endl;
        }}
    }} catch (const exception& e) {{
        cout << "Test Case {case_no}: RUNTIME ERROR - " << e.what() << endl;
    }} catch (...) {{
        cout << "Test Case {case_no}: RUNTIME ERROR - unknown exception" << endl;
    }}
"#
        )
    }

    fn render_result_line(&self, case_no: usize, entry_point: &str, args: &[Value]) -> String {
        let decls = self.declare_args(args, "        ");
        let call = self.render_call(entry_point, args);
        format!(
            r#"    try {{
{decls}        cout << "Result: " << __show({call}) << endl;
    }} catch (const exception& e) {{
        cout << "Test Case {case_no}: RUNTIME ERROR - " << e.what() << endl;
    }} catch (...) {{
        cout << "Test Case {case_no}: RUNTIME ERROR - unknown exception" << endl;
    }}
"#
        )
    }

    fn epilogue(&self, judged: bool, judged_total: usize) -> String {
        if judged {
            format!(
                r#"    if (passed == {judged_total}) {{
        cout << "VERDICT: ACCEPTED" << endl;
    }} else {{
        cout << "VERDICT: WRONG ANSWER" << endl;
    }}
    return 0;
}}
"#
            )
        } else {
            r#"    cout << "VERDICT: CUSTOM RUN COMPLETE" << endl;
    return 0;
}
"#
            .to_string()
        }
    }
}
