// ABOUTME: Authentication negotiation against a selected registry.
// ABOUTME: Pure login state machine plus the async driver that feeds it.

use super::ResolveContext;
use super::error::ResolveError;
use crate::prompt::{PromptError, Question};
use crate::registry::{AuthOutcome, RegistryKind};

/// State of the interactive login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    /// Checking stored credentials.
    Probing,
    /// Waiting for the user to enter credentials.
    Prompting,
    /// A login attempt is in flight with the entered credentials.
    Attempting { username: String, password: String },
    /// Terminal: a verified identity exists.
    Authenticated { username: String },
    /// Terminal: the user cancelled.
    Aborted,
}

/// Events fed into the login state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    ProbeConfirmed { username: String },
    ProbeMissed,
    Submitted { username: String, password: String },
    LoginSucceeded,
    LoginFailed,
    Cancelled,
}

/// Pure transition function. Terminal states absorb every further event
/// except that `Cancelled` always wins over non-terminal states.
pub fn advance(state: LoginState, event: LoginEvent) -> LoginState {
    use LoginEvent::*;
    use LoginState::*;

    match (state, event) {
        (Probing, ProbeConfirmed { username }) => Authenticated { username },
        (Probing, ProbeMissed) => Prompting,
        (Prompting, Submitted { username, password }) => Attempting { username, password },
        (Attempting { username, .. }, LoginSucceeded) => Authenticated { username },
        (Attempting { .. }, LoginFailed) => Prompting,
        (state @ (Authenticated { .. } | Aborted), _) => state,
        (_, Cancelled) => Aborted,
        (state, _) => state,
    }
}

/// Resolve a verified registry identity for `host`.
///
/// Stored credentials are probed first; probe errors are non-fatal. Docker
/// Hub gets an unbounded interactive retry loop that only a successful login
/// or a user abort terminates. Any other registry fails immediately with a
/// remediation hint - the user must authenticate externally and re-run.
pub async fn negotiate(
    ctx: &ResolveContext<'_>,
    host: &str,
    kind: RegistryKind,
) -> Result<AuthOutcome, ResolveError> {
    ctx.output.progress("Checking registry authentication...");

    let mut state = match ctx.registry.probe_credentials(host).await {
        Ok(outcome) if outcome.authenticated => advance(
            LoginState::Probing,
            LoginEvent::ProbeConfirmed {
                username: outcome.username,
            },
        ),
        Ok(_) => advance(LoginState::Probing, LoginEvent::ProbeMissed),
        Err(e) => {
            tracing::debug!(host, error = %e, "credential probe failed");
            advance(LoginState::Probing, LoginEvent::ProbeMissed)
        }
    };

    if state == LoginState::Prompting {
        if kind != RegistryKind::DockerHub {
            return Err(ResolveError::AuthenticationFailed {
                registry: host.to_string(),
                hint: format!("Please login via `docker login {host}` and try again."),
            });
        }

        ctx.output.warn("You are not logged in to Docker Hub");
        ctx.output
            .warn("Please make sure you have a https://hub.docker.com account");
    }

    loop {
        state = match state {
            LoginState::Authenticated { username } => {
                return Ok(AuthOutcome::authenticated(username));
            }
            LoginState::Aborted => return Err(ResolveError::Aborted),
            LoginState::Probing => advance(LoginState::Probing, LoginEvent::ProbeMissed),
            LoginState::Prompting => {
                match ask_credentials(ctx).await {
                    Ok(Some((username, password))) => advance(
                        LoginState::Prompting,
                        LoginEvent::Submitted { username, password },
                    ),
                    Ok(None) => advance(LoginState::Prompting, LoginEvent::Cancelled),
                    Err(e) => return Err(e),
                }
            }
            LoginState::Attempting { username, password } => {
                match ctx.registry.login(host, &username, &password).await {
                    Ok(()) => advance(
                        LoginState::Attempting { username, password },
                        LoginEvent::LoginSucceeded,
                    ),
                    Err(e) => {
                        ctx.output.warn(&e.to_string());
                        advance(
                            LoginState::Attempting { username, password },
                            LoginEvent::LoginFailed,
                        )
                    }
                }
            }
        };
    }
}

/// Ask for username and password. `Ok(None)` means the user cancelled.
async fn ask_credentials(
    ctx: &ResolveContext<'_>,
) -> Result<Option<(String, String)>, ResolveError> {
    let username = Question::new("What is your Docker Hub username?");
    let username = match ctx.prompter.ask(&username).await {
        Ok(answer) => answer,
        Err(PromptError::Aborted) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let password =
        Question::new("What is your Docker Hub password? (will only be sent to the registry)")
            .masked();
    let password = match ctx.prompter.ask(&password).await {
        Ok(answer) => answer,
        Err(PromptError::Aborted) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Ok(Some((username, password)))
}
