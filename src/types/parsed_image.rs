// ABOUTME: Splits a raw "name[:tag]" string into repository and tag.
// ABOUTME: Tag defaulting depends on whether a Dockerfile is part of the project.

/// A raw image string split into name and optional tag.
///
/// When the input carries no tag, the default depends on context: a pre-built
/// image must be pinned (`latest`), while a fresh build resolves its tag at
/// build time (no tag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImage {
    name: String,
    tag: Option<String>,
}

impl ParsedImage {
    /// Split `raw` on the first `:`. Never fails; malformed input (e.g. an
    /// empty name) is passed through and caught later during validation.
    pub fn split(raw: &str, dockerfile_present: bool) -> Self {
        match raw.split_once(':') {
            Some((name, tag)) => Self {
                name: name.to_string(),
                tag: Some(tag.to_string()),
            },
            None if dockerfile_present => Self {
                name: raw.to_string(),
                tag: None,
            },
            None => Self {
                name: raw.to_string(),
                tag: Some("latest".to_string()),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Tag as an owned list for the configuration record: zero or one entries.
    pub fn tags(&self) -> Vec<String> {
        self.tag.iter().cloned().collect()
    }
}
