// ABOUTME: Image configuration records and the persisted stevedore.yml map.
// ABOUTME: Handles YAML load/save and keyed add/remove of image entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const CONFIG_FILENAME: &str = "stevedore.yml";
pub const CONFIG_FILENAME_ALT: &str = "stevedore.yaml";

pub const DOCKER_HUB_HOSTNAME: &str = "hub.docker.com";

/// Repository placeholder used when the user opted out of pushing entirely.
pub const NO_REGISTRY_IMAGE: &str = "stevedore";

pub const DEFAULT_DOCKERFILE_PATH: &str = "./Dockerfile";
pub const DEFAULT_CONTEXT_PATH: &str = "./";

/// How (and whether) the image gets built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildSpec {
    /// Pre-built image, nothing to build.
    Disabled,

    /// Build with the Docker engine.
    Docker {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,

        #[serde(default, rename = "skipPush", skip_serializing_if = "is_false")]
        skip_push: bool,
    },

    /// Build in-cluster with kaniko.
    Kaniko,
}

impl BuildSpec {
    /// The conventional build: plain Docker build, full Dockerfile, push enabled.
    pub fn is_default(&self) -> bool {
        matches!(
            self,
            BuildSpec::Docker {
                target: None,
                skip_push: false,
            }
        )
    }

    pub fn skips_push(&self) -> bool {
        matches!(self, BuildSpec::Docker { skip_push: true, .. })
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            BuildSpec::Docker { target, .. } => target.as_deref(),
            _ => None,
        }
    }
}

impl Default for BuildSpec {
    fn default() -> Self {
        BuildSpec::Docker {
            target: None,
            skip_push: false,
        }
    }
}

/// A single image entry as consumed by the deployment tool.
///
/// Optional fields are omitted from the YAML when they match convention
/// defaults; omission itself means "use convention".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub image: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default, skip_serializing_if = "BuildSpec::is_default")]
    pub build: BuildSpec,

    #[serde(default, skip_serializing_if = "is_false")]
    pub create_pull_secret: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub inject_restart_helper: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub prefer_sync_over_rebuild: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub append_dockerfile_instructions: Vec<String>,
}

impl ImageConfig {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            tags: Vec::new(),
            dockerfile: None,
            context: None,
            build: BuildSpec::default(),
            create_pull_secret: false,
            inject_restart_helper: false,
            prefer_sync_over_rebuild: false,
            append_dockerfile_instructions: Vec::new(),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// The persisted configuration: a keyed map of image entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub images: BTreeMap<String, ImageConfig>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the config from `dir`, or start fresh when none exists yet.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        match Self::discover_path(dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        match Self::discover_path(dir) {
            Some(path) => Self::load(&path),
            None => Err(Error::ConfigNotFound(dir.to_path_buf())),
        }
    }

    fn discover_path(dir: &Path) -> Option<PathBuf> {
        [CONFIG_FILENAME, CONFIG_FILENAME_ALT]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = Self::discover_path(dir).unwrap_or_else(|| dir.join(CONFIG_FILENAME));
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Insert an image entry under `key`, replacing any previous entry.
    pub fn add_image(
        &mut self,
        key: &str,
        name: &str,
        tag: Option<&str>,
        context: Option<&str>,
        dockerfile: Option<&str>,
        builder: Option<&str>,
    ) -> Result<()> {
        let mut entry = ImageConfig::new(name);

        if let Some(tag) = tag {
            entry.tags = vec![tag.to_string()];
        }
        entry.context = context.map(str::to_string);
        entry.dockerfile = dockerfile.map(str::to_string);

        entry.build = match builder {
            None | Some("") | Some("docker") => BuildSpec::default(),
            Some("kaniko") => BuildSpec::Kaniko,
            Some(other) => return Err(Error::UnknownBuilder(other.to_string())),
        };

        self.images.insert(key.to_string(), entry);
        Ok(())
    }

    /// Remove entries by key, or all of them when `remove_all` is set.
    pub fn remove_images(&mut self, remove_all: bool, keys: &[String]) -> Result<()> {
        if keys.is_empty() && !remove_all {
            return Err(Error::NoImagesSpecified);
        }

        if remove_all {
            self.images.clear();
        } else {
            self.images.retain(|key, _| !keys.contains(key));
        }

        Ok(())
    }
}
