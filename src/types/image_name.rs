// ABOUTME: Validated, normalized container image repository names.
// ABOUTME: Normalization strips tag/digest suffixes and rejects invalid characters.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageNameError {
    #[error("image name cannot be empty")]
    Empty,

    #[error("invalid character in image name: '{0}'")]
    InvalidChar(char),

    #[error("image name must be lowercase")]
    NotLowercase,

    #[error("image name cannot start or end with '/'")]
    DanglingSlash,
}

/// A syntactically valid image repository name without tag or digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageName(String);

impl ImageName {
    /// Validate `raw` and strip any `:tag` or `@digest` suffix.
    ///
    /// A trailing `:port` segment on the registry host is kept (the colon is
    /// only treated as a tag separator when the remainder contains no `/`).
    pub fn normalize(raw: &str) -> Result<Self, ImageNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ImageNameError::Empty);
        }

        let without_digest = match trimmed.split_once('@') {
            Some((before, _)) => before,
            None => trimmed,
        };

        let without_tag = match without_digest.rsplit_once(':') {
            Some((before, after)) if !after.contains('/') => before,
            _ => without_digest,
        };

        if without_tag.is_empty() {
            return Err(ImageNameError::Empty);
        }
        if without_tag.starts_with('/') || without_tag.ends_with('/') {
            return Err(ImageNameError::DanglingSlash);
        }

        for c in without_tag.chars() {
            if c.is_ascii_uppercase() {
                return Err(ImageNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase()
                && !c.is_ascii_digit()
                && c != '/'
                && c != '.'
                && c != '-'
                && c != '_'
                && c != ':'
            {
                return Err(ImageNameError::InvalidChar(c));
            }
        }

        Ok(Self(without_tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
