// ABOUTME: Error taxonomy for image configuration resolution.
// ABOUTME: Validation failures are retried in place and never appear here.

use thiserror::Error;

use crate::dockerfile::DockerfileError;
use crate::prompt::PromptError;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The container engine client cannot be constructed or reached.
    #[error("cannot create container engine client: {0}")]
    ClientUnavailable(String),

    /// Login failed against a registry that has no interactive retry path.
    #[error("registry authentication failed for {registry}.\n         {hint}")]
    AuthenticationFailed { registry: String, hint: String },

    #[error(transparent)]
    DockerfileRead(#[from] DockerfileError),

    /// The user cancelled an interactive prompt. Surfaced distinctly so the
    /// caller can exit without an error banner.
    #[error("aborted")]
    Aborted,
}

impl From<PromptError> for ResolveError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Aborted => ResolveError::Aborted,
            PromptError::Terminal(msg) => ResolveError::ClientUnavailable(msg),
        }
    }
}
