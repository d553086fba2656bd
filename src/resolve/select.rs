// ABOUTME: Registry selection front-end and repository name confirmation.
// ABOUTME: Offers Docker Hub, a free-text registry, or skipping the push entirely.

use super::ResolveContext;
use super::error::ResolveError;
use crate::cloud::PROJECT_PLACEHOLDER;
use crate::config::DOCKER_HUB_HOSTNAME;
use crate::prompt::Question;
use crate::registry::{AuthOutcome, RegistryKind};
use crate::types::ImageName;

const USE_OTHER_REGISTRY: &str = "Use other registry";
const SKIP_IMAGE_PUSH: &str =
    "Always skip image push (advanced, config will not work with remote clusters)";

/// Where the built image should be pushed, as chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryChoice {
    /// Never push; the configuration must carry an explicit skip-push flag.
    SkipPush,
    UseHub,
    UseOther(String),
}

/// Ask the user which registry to push to.
///
/// The Docker Hub option is the default and is annotated with the logged-in
/// username when stored credentials reveal one. A free-text registry host is
/// trimmed of surrounding slashes and whitespace.
pub async fn select_registry(ctx: &ResolveContext<'_>) -> Result<RegistryChoice, ResolveError> {
    let mut use_hub = format!("Use {DOCKER_HUB_HOSTNAME}");
    match ctx.registry.probe_credentials(DOCKER_HUB_HOSTNAME).await {
        Ok(outcome) if outcome.authenticated && !outcome.username.is_empty() => {
            use_hub = format!("{use_hub} => you are logged in as {}", outcome.username);
        }
        Ok(_) => {}
        Err(e) => tracing::debug!(error = %e, "Docker Hub credential probe failed"),
    }

    let question = Question::new("Which registry do you want to use for storing your images?")
        .with_default(use_hub.clone())
        .with_options(vec![
            use_hub.clone(),
            USE_OTHER_REGISTRY.to_string(),
            SKIP_IMAGE_PUSH.to_string(),
        ]);
    let answer = ctx.prompter.ask(&question).await?;

    if answer == SKIP_IMAGE_PUSH {
        Ok(RegistryChoice::SkipPush)
    } else if answer == use_hub {
        Ok(RegistryChoice::UseHub)
    } else {
        let question = Question::new("Please enter the registry URL without image name:")
            .with_default("my.registry.tld/username");
        let host = ctx.prompter.ask(&question).await?;
        Ok(RegistryChoice::UseOther(
            host.trim_matches(['/', ' ']).to_string(),
        ))
    }
}

/// Confirm the repository name to push to, seeded from a per-registry
/// suggestion the user can edit. Invalid input re-prompts without state loss.
pub async fn confirm_repository(
    ctx: &ResolveContext<'_>,
    host: &str,
    kind: RegistryKind,
    image_name: &str,
    auth: &AuthOutcome,
) -> Result<ImageName, ResolveError> {
    let (text, suggestion) = match kind {
        RegistryKind::DockerHub => (
            "Which image name do you want to use on Docker Hub?",
            format!("{}/{image_name}", auth.username),
        ),
        RegistryKind::GoogleContainerRegistry => {
            let project = ctx
                .projects
                .current_project()
                .unwrap_or_else(|| PROJECT_PLACEHOLDER.to_string());
            (
                "Which image name do you want to push to?",
                format!("{host}/{project}/{image_name}"),
            )
        }
        _ => {
            let username = if auth.username.is_empty() {
                "myuser"
            } else {
                &auth.username
            };
            (
                "Which image name do you want to push to?",
                format!("{host}/{username}/{image_name}"),
            )
        }
    };

    loop {
        let question = Question::new(text)
            .with_default(suggestion.clone())
            .with_validator(|name: &str| {
                ImageName::normalize(name).map(|_| ()).map_err(|e| {
                    format!(
                        "Please enter a valid image name \
                         (e.g. myregistry.com/user/repository | allowed characters: /, a-z, 0-9): {e}"
                    )
                })
            });
        let answer = ctx.prompter.ask(&question).await?;

        // The prompter contract guarantees a validated answer; re-ask if a
        // non-conforming prompter slips an invalid one through anyway.
        match ImageName::normalize(&answer) {
            Ok(name) => return Ok(name),
            Err(e) => ctx.output.warn(&e.to_string()),
        }
    }
}
