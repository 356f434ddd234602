//! Sandboxed execution of untrusted submissions against per-problem test
//! sets, producing a verdict, ordered logs, and optional analysis.
//!
//! The pipeline: marshal test values into source literals, synthesize a
//! single-file harness around the user's code, run it in a throwaway
//! Docker container, classify the captured output, and (for custom input)
//! reconcile against a trusted reference run.

pub mod annotate;
pub mod error;
pub mod harness;
pub mod literal;
pub mod orchestrator;
pub mod registry;
pub mod sandbox;
pub mod verdict;
pub mod workspace;

#[cfg(test)]
mod docker_tests;

pub use annotate::Annotator;
pub use error::{JudgeError, Result};
pub use orchestrator::Judge;
pub use registry::{ReferenceRegistry, StaticRegistry};
pub use sandbox::{DockerSandbox, Sandbox, SandboxResult, SandboxStatus};
