// ABOUTME: Image configuration resolution - the interactive decision flow.
// ABOUTME: Parses the image reference, selects a registry, verifies auth, pins a target.

mod assemble;
mod auth;
mod error;
mod select;
mod target;

pub use assemble::{ResolvedImage, assemble};
pub use auth::{LoginEvent, LoginState, advance, negotiate};
pub use error::ResolveError;
pub use select::{RegistryChoice, confirm_repository, select_registry};
pub use target::{NO_TARGET_OPTION, resolve_target};

use crate::cloud::ProjectSource;
use crate::config::{
    BuildSpec, DEFAULT_CONTEXT_PATH, DEFAULT_DOCKERFILE_PATH, DOCKER_HUB_HOSTNAME, ImageConfig,
};
use crate::dockerfile::DockerfileInspector;
use crate::output::Output;
use crate::prompt::Prompter;
use crate::registry::{RegistryClient, RegistryKind, classify};
use crate::types::ParsedImage;

/// Collaborator capabilities threaded through one resolution run.
///
/// All entities are constructed fresh per run; nothing here persists state
/// across runs.
pub struct ResolveContext<'a> {
    pub prompter: &'a dyn Prompter,
    pub registry: &'a dyn RegistryClient,
    pub inspector: &'a dyn DockerfileInspector,
    pub projects: &'a dyn ProjectSource,
    pub output: &'a Output,
}

/// Resolve the configuration for a pre-built image. Non-interactive.
///
/// With no Dockerfile the build is disabled and the tag pinned (defaulting to
/// `latest`); with a Dockerfile only the divergent paths are recorded.
pub fn prebuilt_image_config(image_name: &str, dockerfile: &str, context: &str) -> ImageConfig {
    let parsed = ParsedImage::split(image_name, !dockerfile.is_empty());

    let mut config = ImageConfig::new(parsed.name());
    config.tags = parsed.tags();
    config.create_pull_secret = true;

    if dockerfile.is_empty() {
        config.build = BuildSpec::Disabled;
    } else {
        if dockerfile != DEFAULT_DOCKERFILE_PATH {
            config.dockerfile = Some(dockerfile.to_string());
        }
        if !context.is_empty() && context != DEFAULT_CONTEXT_PATH {
            config.context = Some(context.to_string());
        }
    }

    config
}

/// Resolve the full build configuration interactively.
///
/// Flow: registry selection, authentication (possibly looping), build target
/// resolution, assembly. Each suspension point is a blocking prompt or a
/// blocking client call; cancellation unwinds the whole run as `Aborted`.
pub async fn build_image_config(
    ctx: &ResolveContext<'_>,
    image_name: &str,
    dockerfile: &str,
    context: &str,
) -> Result<ImageConfig, ResolveError> {
    let parsed = ParsedImage::split(image_name, true);

    if let Err(e) = ctx.registry.ping().await {
        tracing::debug!(error = %e, "container engine ping failed");
        ctx.output.warn(
            "Docker daemon not reachable. Start Docker to build images locally \
             instead of using the kaniko fallback.",
        );
    }

    let choice = select_registry(ctx).await?;

    let repository = match &choice {
        RegistryChoice::SkipPush => None,
        RegistryChoice::UseHub => {
            let auth = negotiate(ctx, DOCKER_HUB_HOSTNAME, RegistryKind::DockerHub).await?;
            let name = confirm_repository(
                ctx,
                DOCKER_HUB_HOSTNAME,
                RegistryKind::DockerHub,
                parsed.name(),
                &auth,
            )
            .await?;
            Some(name)
        }
        RegistryChoice::UseOther(host) => {
            let kind = classify(host);
            let auth = negotiate(ctx, host, kind).await?;
            let name = confirm_repository(ctx, host, kind, parsed.name(), &auth).await?;
            Some(name)
        }
    };

    let target = resolve_target(ctx, dockerfile).await?;

    Ok(assemble(ResolvedImage {
        parsed,
        choice,
        repository,
        target,
        dockerfile: dockerfile.to_string(),
        context: context.to_string(),
    }))
}
