// ABOUTME: Dockerfile inspection for multi-stage build targets.
// ABOUTME: Extracts named stages from FROM ... AS <name> instructions.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DockerfileError {
    #[error("failed to read Dockerfile {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Capability to list the named build stages of a Dockerfile, in order.
pub trait DockerfileInspector: Send + Sync {
    fn extract_stage_names(&self, path: &Path) -> Result<Vec<String>, DockerfileError>;
}

/// Inspector that reads Dockerfiles from the filesystem.
pub struct FsDockerfileInspector;

impl FsDockerfileInspector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsDockerfileInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerfileInspector for FsDockerfileInspector {
    fn extract_stage_names(&self, path: &Path) -> Result<Vec<String>, DockerfileError> {
        let content = std::fs::read_to_string(path).map_err(|source| DockerfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(parse_stage_names(&content))
    }
}

/// Collect stage names from `FROM <image> AS <name>` lines.
///
/// Instruction and keyword matching is case-insensitive, matching the
/// Dockerfile grammar. Unnamed FROM lines contribute nothing.
pub fn parse_stage_names(content: &str) -> Vec<String> {
    let mut stages = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(instruction) = tokens.next() else {
            continue;
        };
        if !instruction.eq_ignore_ascii_case("from") {
            continue;
        }

        // Skip --platform and similar flags between FROM and the image.
        let mut rest = tokens.filter(|t| !t.starts_with("--"));
        let _image = rest.next();
        if let (Some(keyword), Some(name)) = (rest.next(), rest.next())
            && keyword.eq_ignore_ascii_case("as")
        {
            stages.push(name.to_string());
        }
    }

    stages
}
