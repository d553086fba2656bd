// ABOUTME: Final assembly of the image configuration record.
// ABOUTME: Pure merge of parser, registry, auth, and target outputs.

use super::select::RegistryChoice;
use crate::config::{
    BuildSpec, DEFAULT_CONTEXT_PATH, DEFAULT_DOCKERFILE_PATH, ImageConfig, NO_REGISTRY_IMAGE,
};
use crate::types::{ImageName, ParsedImage};

/// Everything the sub-resolutions produced, ready to be merged.
#[derive(Debug)]
pub struct ResolvedImage {
    pub parsed: ParsedImage,
    pub choice: RegistryChoice,
    /// Confirmed, normalized repository name. `None` when push is skipped.
    pub repository: Option<ImageName>,
    pub target: Option<String>,
    pub dockerfile: String,
    pub context: String,
}

/// Merge the resolved parts into one configuration record.
///
/// A skip-push choice forces the no-registry placeholder repository and the
/// skip-push build flag regardless of the other inputs; the build variant is
/// constructed exactly once, so no partially-populated state exists.
pub fn assemble(resolved: ResolvedImage) -> ImageConfig {
    let skip_push = resolved.choice == RegistryChoice::SkipPush;

    let image = if skip_push {
        NO_REGISTRY_IMAGE.to_string()
    } else {
        resolved
            .repository
            .map(ImageName::into_string)
            .unwrap_or_else(|| resolved.parsed.name().to_string())
    };

    let mut config = ImageConfig::new(image);
    config.tags = resolved.parsed.tags();

    if resolved.dockerfile != DEFAULT_DOCKERFILE_PATH {
        config.dockerfile = Some(resolved.dockerfile);
    }
    if !resolved.context.is_empty() && resolved.context != DEFAULT_CONTEXT_PATH {
        config.context = Some(resolved.context);
    }

    config.build = BuildSpec::Docker {
        target: resolved.target,
        skip_push,
    };

    config.inject_restart_helper = true;
    config.prefer_sync_over_rebuild = true;
    config.append_dockerfile_instructions = vec!["USER root".to_string()];

    config
}
