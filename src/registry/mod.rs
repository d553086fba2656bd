// ABOUTME: Registry client capability trait and credential types.
// ABOUTME: Probing, login, and daemon ping against a container registry.

mod classify;
mod docker;

pub use classify::{RegistryKind, classify};
pub use docker::DockerRegistryClient;

use async_trait::async_trait;
use thiserror::Error;

/// Result of a credential probe or login attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthOutcome {
    pub username: String,
    pub authenticated: bool,
}

impl AuthOutcome {
    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            authenticated: true,
        }
    }

    pub fn unauthenticated() -> Self {
        Self::default()
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("container engine unreachable: {0}")]
    Unreachable(String),

    #[error("credential probe failed: {0}")]
    ProbeFailed(String),

    #[error("login failed: {0}")]
    LoginFailed(String),
}

/// External registry/engine operations consumed by the resolver.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Look up stored credentials for `host`. Errors are non-fatal to the
    /// caller; they are treated as "not authenticated".
    async fn probe_credentials(&self, host: &str) -> Result<AuthOutcome, RegistryError>;

    /// Attempt a login against `host` with the given credentials.
    async fn login(&self, host: &str, username: &str, password: &str)
    -> Result<(), RegistryError>;

    /// Check that the container engine is reachable.
    async fn ping(&self) -> Result<(), RegistryError>;
}
