//! Test-harness synthesis.
//!
//! One iteration plan drives four language emitters. Emitters own syntax
//! only; pacing, case ordering, and the stdout line vocabulary live here.
//! Every generated program speaks the same vocabulary so verdict parsing
//! stays language-agnostic:
//!
//! - `Test Case <n>: PASSED` / `Test Case <n>: FAILED`
//! - `Expected: <repr> Got: <repr>` after a failed comparison
//! - `Test Case <n>: RUNTIME ERROR - <message>` for a recovered case
//! - `Result: <repr>` for an exploratory case
//! - `Runtime Error: <message>` then `VERDICT: RUNTIME ERROR` when the
//!   solution type cannot be constructed
//! - a single closing `VERDICT: ...` line
//!
//! Value reprs inside those lines are shared as well: comma-space arrays
//! (`[0, 1]`), lowercase `true`/`false`, `null`, bare strings. Custom-input
//! reconciliation compares `Result:` payloads byte-for-byte across
//! languages, so emitters must not drift from this form.

mod cpp;
mod java;
mod javascript;
mod python;

pub use cpp::CppEmitter;
pub use java::JavaEmitter;
pub use javascript::JsEmitter;
pub use python::PythonEmitter;

use proctor_common::types::{Language, TestCase};
use serde_json::Value;

/// Marker lines shared by every generated harness.
pub mod marker {
    pub const ACCEPTED: &str = "VERDICT: ACCEPTED";
    pub const WRONG_ANSWER: &str = "VERDICT: WRONG ANSWER";
    pub const CUSTOM_RUN_COMPLETE: &str = "VERDICT: CUSTOM RUN COMPLETE";
    pub const RUNTIME_ERROR: &str = "VERDICT: RUNTIME ERROR";
    pub const RESULT_PREFIX: &str = "Result: ";
    pub const COMPILATION_ERROR: &str = "Compilation Error";
}

/// Per-language code emitter driven by [`synthesize`].
///
/// All emitters expect the user source to define a `Solution` class whose
/// instance method named by the entry point takes the marshalled
/// arguments positionally.
pub trait LanguageEmitter: Send + Sync {
    fn language(&self) -> Language;

    /// Program text up to and including construction of the user's
    /// `Solution`, guarded so a failed construction aborts the run with
    /// the fatal runtime-error lines.
    fn prologue(&self, user_source: &str) -> String;

    /// Expression invoking the entry point. Languages that cannot pass
    /// literals inline (C++ reference parameters) invoke over named
    /// locals declared by their case blocks.
    fn render_call(&self, entry_point: &str, args: &[Value]) -> String;

    /// A judged case: invoke, compare with array-aware equality, report
    /// `PASSED`/`FAILED`, bump the pass counter. Errors are recovered
    /// per case.
    fn render_comparison(
        &self,
        case_no: usize,
        entry_point: &str,
        args: &[Value],
        expected: &Value,
    ) -> String;

    /// An exploratory case: invoke and print one `Result:` line. Errors
    /// are recovered per case.
    fn render_result_line(&self, case_no: usize, entry_point: &str, args: &[Value]) -> String;

    /// Terminal verdict block and program close. `judged_total` is the
    /// number of compared cases the pass counter is checked against.
    fn epilogue(&self, judged: bool, judged_total: usize) -> String;
}

/// Builds the complete single-file program for one run: user source plus
/// the generated driver.
///
/// The set is judged when its first case carries an expected output; a
/// judged run closes with `ACCEPTED`/`WRONG ANSWER`, an exploratory run
/// (including the empty set) with `CUSTOM RUN COMPLETE`.
pub fn synthesize(
    emitter: &dyn LanguageEmitter,
    user_source: &str,
    entry_point: &str,
    cases: &[TestCase],
) -> String {
    let judged = cases.first().map(TestCase::is_judged).unwrap_or(false);
    let judged_total = cases.iter().filter(|case| case.is_judged()).count();

    let mut program = emitter.prologue(user_source);
    for (idx, case) in cases.iter().enumerate() {
        let number = idx + 1;
        let block = match case.expected() {
            Some(expected) => {
                emitter.render_comparison(number, entry_point, &case.input, expected)
            }
            None => emitter.render_result_line(number, entry_point, &case.input),
        };
        program.push_str(&block);
    }
    program.push_str(&emitter.epilogue(judged, judged_total));
    program
}

pub fn emitter_for(language: Language) -> Box<dyn LanguageEmitter> {
    match language {
        Language::Python => Box::new(PythonEmitter),
        Language::JavaScript => Box::new(JsEmitter),
        Language::Java => Box::new(JavaEmitter),
        Language::Cpp => Box::new(CppEmitter),
    }
}
