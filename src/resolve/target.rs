// ABOUTME: Build target resolution for multi-stage Dockerfiles.
// ABOUTME: No prompt is issued when the Dockerfile has no named stages.

use std::path::Path;

use super::ResolveContext;
use super::error::ResolveError;
use crate::prompt::Question;

/// Sentinel option meaning "build the complete Dockerfile, no target".
pub const NO_TARGET_OPTION: &str = "[none] (build complete Dockerfile)";

/// Resolve which build stage to pin, if any.
///
/// A Dockerfile read failure is fatal. Zero named stages resolve to no
/// target without any user interaction.
pub async fn resolve_target(
    ctx: &ResolveContext<'_>,
    dockerfile: &str,
) -> Result<Option<String>, ResolveError> {
    let stages = ctx.inspector.extract_stage_names(Path::new(dockerfile))?;
    if stages.is_empty() {
        return Ok(None);
    }

    let mut options = stages;
    options.push(NO_TARGET_OPTION.to_string());

    let question = Question::new(
        "Which build stage (target) within your Dockerfile do you want to use for development?",
    )
    .with_options(options);
    let answer = ctx.prompter.ask(&question).await?;

    if answer == NO_TARGET_OPTION {
        Ok(None)
    } else {
        Ok(Some(answer))
    }
}
