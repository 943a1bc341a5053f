//! Core types for Blogcast

use serde::Serialize;

use crate::error::PublishError;

/// Where a post's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// Written by the generation service
    Generated,
    /// Built by the fixed template
    Fallback,
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::Generated => write!(f, "generated"),
            ContentSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Post copy ready for publishing, tagged with its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedContent {
    pub text: String,
    pub source: ContentSource,
}

impl GeneratedContent {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ContentSource::Generated,
        }
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ContentSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ContentSource::Fallback
    }
}

/// Outcome of one publish attempt
///
/// A dry run and a live success both report `success = true`; only a live
/// success carries a `remote_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub success: bool,
    pub remote_id: Option<String>,
    pub error: Option<PublishError>,
}

impl PublishResult {
    pub fn published(remote_id: impl Into<String>) -> Self {
        Self {
            success: true,
            remote_id: Some(remote_id.into()),
            error: None,
        }
    }

    pub fn dry_run() -> Self {
        Self {
            success: true,
            remote_id: None,
            error: None,
        }
    }

    pub fn failed(error: PublishError) -> Self {
        Self {
            success: false,
            remote_id: None,
            error: Some(error),
        }
    }

    /// Convert into a `Result`, yielding the remote id (if any) on success
    pub fn into_result(self) -> Result<Option<String>, PublishError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.remote_id),
        }
    }
}
