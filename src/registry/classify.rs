// ABOUTME: Pure classification of registry hosts.
// ABOUTME: Distinguishes Docker Hub, GCR-style hosts, and generic registries.

use crate::config::DOCKER_HUB_HOSTNAME;

/// Category of a registry endpoint, decided from its host name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    /// No registry at all (push will be skipped).
    NoRegistry,
    DockerHub,
    GoogleContainerRegistry,
    Generic,
}

/// Classify a registry host. Rules are checked in order and the match is
/// anchored: `hub.docker.com.evil.com` is generic, not Docker Hub.
pub fn classify(host: &str) -> RegistryKind {
    if host.is_empty() {
        RegistryKind::NoRegistry
    } else if host == DOCKER_HUB_HOSTNAME {
        RegistryKind::DockerHub
    } else if is_gcr_host(host) {
        RegistryKind::GoogleContainerRegistry
    } else {
        RegistryKind::Generic
    }
}

/// `gcr.io` itself, or any subdomain of it (`eu.gcr.io`, `asia.gcr.io`).
fn is_gcr_host(host: &str) -> bool {
    host == "gcr.io" || (host.ends_with(".gcr.io") && host.len() > ".gcr.io".len())
}
