use thiserror::Error;

/// Failures the judge reports to its caller.
///
/// Outcomes of the guest program itself (compile failures, crashes, wrong
/// answers, timeouts) are data, not errors; they travel through
/// [`crate::sandbox::SandboxResult`] and end up as a verdict.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// The deployment is unusable for this request: unknown language
    /// profile, broken config file, and the like.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The host failed around the guest: workspace I/O, Docker API calls,
    /// image pulls.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),

    /// The request itself is invalid and was rejected before dispatch.
    #[error("invalid request: {0}")]
    Request(String),
}

pub type Result<T> = std::result::Result<T, JudgeError>;
