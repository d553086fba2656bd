// ABOUTME: Cloud project lookup for registry name suggestions.
// ABOUTME: Reads the active project from the gcloud CLI, with a placeholder fallback.

use std::process::Command;

/// Placeholder used when no cloud project can be determined.
pub const PROJECT_PLACEHOLDER: &str = "myGCloudProject";

/// Source for the active cloud project identifier.
pub trait ProjectSource: Send + Sync {
    /// The currently configured project, or `None` when unavailable.
    fn current_project(&self) -> Option<String>;
}

/// Reads the active project from the `gcloud` CLI.
pub struct GcloudCli;

impl GcloudCli {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GcloudCli {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectSource for GcloudCli {
    fn current_project(&self) -> Option<String> {
        let output = Command::new("gcloud")
            .args(["config", "get-value", "project"])
            .output()
            .ok()?;

        if !output.status.success() {
            tracing::debug!("gcloud config get-value project failed");
            return None;
        }

        let project = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if project.is_empty() {
            None
        } else {
            Some(project)
        }
    }
}
