//! Optional post-acceptance code annotation.

use async_trait::async_trait;

use proctor_common::types::{Analysis, Language};

/// Produces a complexity/quality annotation for an accepted submission.
///
/// Annotators are external collaborators. The judge attaches their output
/// when available and drops every failure on the floor; analysis can
/// never change a verdict or fail a request.
#[async_trait]
pub trait Annotator: Send + Sync {
    async fn annotate(&self, language: Language, source: &str) -> anyhow::Result<Analysis>;
}
