// ABOUTME: Docker-backed RegistryClient implementation.
// ABOUTME: Pings via bollard, probes ~/.docker/config.json, logs in via docker CLI.

use async_trait::async_trait;
use base64::Engine;
use bollard::Docker;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;

use super::{AuthOutcome, RegistryClient, RegistryError};
use crate::config::DOCKER_HUB_HOSTNAME;

/// Aliases under which Docker Hub credentials may be stored in config.json.
const DOCKER_HUB_CONFIG_KEYS: &[&str] = &[
    "https://index.docker.io/v1/",
    "index.docker.io",
    "registry-1.docker.io",
    "docker.io",
];

/// Shape of Docker's config.json, as far as credential lookup needs it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DockerConfig {
    #[serde(default)]
    auths: HashMap<String, AuthEntry>,
    #[serde(default)]
    creds_store: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthEntry {
    /// Base64-encoded "username:password".
    auth: Option<String>,
    username: Option<String>,
}

/// Response from a docker-credential-* helper.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CredentialResponse {
    username: String,
}

/// Registry client backed by the local Docker installation.
///
/// The daemon is only needed for `ping`; credential probing reads the Docker
/// config file directly and login shells out to `docker login`.
pub struct DockerRegistryClient {
    client: Docker,
    config_path: PathBuf,
}

impl DockerRegistryClient {
    /// Connect to the local Docker daemon.
    pub fn connect() -> Result<Self, RegistryError> {
        let client = Docker::connect_with_local_defaults()
            .map_err(|e| RegistryError::Unreachable(e.to_string()))?;
        Ok(Self {
            client,
            config_path: default_config_path(),
        })
    }

    pub fn with_config_path(mut self, config_path: PathBuf) -> Self {
        self.config_path = config_path;
        self
    }

    fn load_docker_config(&self) -> Result<DockerConfig, RegistryError> {
        let content = std::fs::read_to_string(&self.config_path)
            .map_err(|e| RegistryError::ProbeFailed(format!("failed to read config.json: {e}")))?;
        serde_json::from_str(&content)
            .map_err(|e| RegistryError::ProbeFailed(format!("failed to parse config.json: {e}")))
    }

    /// Config.json keys that may hold credentials for `host`.
    fn config_keys(host: &str) -> Vec<&str> {
        if host == DOCKER_HUB_HOSTNAME {
            DOCKER_HUB_CONFIG_KEYS.to_vec()
        } else {
            vec![host]
        }
    }

    fn username_from_entry(entry: &AuthEntry) -> Option<String> {
        if let Some(username) = &entry.username {
            return Some(username.clone());
        }
        let auth = entry.auth.as_deref()?;
        let decoded = base64::engine::general_purpose::STANDARD.decode(auth).ok()?;
        let auth_str = String::from_utf8(decoded).ok()?;
        auth_str
            .split_once(':')
            .map(|(username, _)| username.to_string())
    }

    /// Ask a docker-credential-* helper for the credentials of `key`.
    fn username_from_helper(helper: &str, key: &str) -> Option<String> {
        let helper_cmd = format!("docker-credential-{helper}");

        let mut child = std::process::Command::new(&helper_cmd)
            .arg("get")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .ok()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(key.as_bytes()).ok();
        }

        let output = child.wait_with_output().ok()?;
        if !output.status.success() {
            tracing::debug!(helper = helper_cmd, key, "credential helper had no entry");
            return None;
        }

        let response: CredentialResponse = serde_json::from_slice(&output.stdout).ok()?;
        Some(response.username)
    }
}

#[async_trait]
impl RegistryClient for DockerRegistryClient {
    async fn probe_credentials(&self, host: &str) -> Result<AuthOutcome, RegistryError> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "Docker config.json not found");
            return Ok(AuthOutcome::unauthenticated());
        }

        let config = self.load_docker_config()?;

        for key in Self::config_keys(host) {
            if let Some(entry) = config.auths.get(key)
                && let Some(username) = Self::username_from_entry(entry)
            {
                tracing::debug!(key, "found stored credentials");
                return Ok(AuthOutcome::authenticated(username));
            }
        }

        if let Some(helper) = &config.creds_store {
            for key in Self::config_keys(host) {
                if let Some(username) = Self::username_from_helper(helper, key) {
                    return Ok(AuthOutcome::authenticated(username));
                }
            }
        }

        tracing::debug!(host, "no stored credentials");
        Ok(AuthOutcome::unauthenticated())
    }

    async fn login(
        &self,
        host: &str,
        username: &str,
        password: &str,
    ) -> Result<(), RegistryError> {
        let mut cmd = tokio::process::Command::new("docker");
        cmd.arg("login");
        // The docker CLI defaults to Docker Hub when no server is given.
        if host != DOCKER_HUB_HOSTNAME {
            cmd.arg(host);
        }
        cmd.args(["--username", username, "--password-stdin"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| RegistryError::LoginFailed(format!("failed to run docker login: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(password.as_bytes())
                .await
                .map_err(|e| RegistryError::LoginFailed(e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| RegistryError::LoginFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RegistryError::LoginFailed(stderr.trim().to_string()));
        }

        tracing::debug!(host, username, "login succeeded");
        Ok(())
    }

    async fn ping(&self) -> Result<(), RegistryError> {
        self.client
            .ping()
            .await
            .map_err(|e| RegistryError::Unreachable(e.to_string()))?;
        Ok(())
    }
}

fn default_config_path() -> PathBuf {
    std::env::var("DOCKER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".docker"))
                .unwrap_or_else(|| PathBuf::from(".docker"))
        })
        .join("config.json")
}
