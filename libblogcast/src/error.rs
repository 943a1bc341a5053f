//! Error types for Blogcast

use std::path::PathBuf;

use thiserror::Error;

use crate::transport::TransportError;

pub type Result<T> = std::result::Result<T, BlogcastError>;

#[derive(Error, Debug)]
pub enum BlogcastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("HTTP client error: {0}")]
    Transport(#[from] TransportError),
}

impl BlogcastError {
    /// Returns the process exit code for this error
    ///
    /// Every failure that reaches the CLI boundary is fatal for the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            BlogcastError::Config(_) => 1,
            BlogcastError::Document(_) => 1,
            BlogcastError::Publish(_) => 1,
            BlogcastError::Transport(_) => 1,
        }
    }

    /// Returns the broad category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogcastError::Config(_) => ErrorKind::Config,
            BlogcastError::Document(_) => ErrorKind::Document,
            BlogcastError::Publish(err) => err.kind(),
            BlogcastError::Transport(_) => ErrorKind::Network,
        }
    }
}

/// Error categories observable by callers and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Document,
    MissingCredentials,
    Generation,
    PlatformRejected,
    Network,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Config => write!(f, "config"),
            ErrorKind::Document => write!(f, "document"),
            ErrorKind::MissingCredentials => write!(f, "missing_credentials"),
            ErrorKind::Generation => write!(f, "generation"),
            ErrorKind::PlatformRejected => write!(f, "platform_rejected"),
            ErrorKind::Network => write!(f, "network"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse frontmatter from {}", .0.display())]
    MissingFrontmatter(PathBuf),
}

/// Failures of the generation service call
///
/// These never leave the content generator: every variant degrades to the
/// fallback template.
#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    #[error("LLM_API_KEY not set")]
    MissingApiKey,

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("generation service returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid response from generation service: {0}")]
    InvalidResponse(String),

    #[error("response contained no text block")]
    NoTextBlock,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Generation
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PublishError {
    #[error("{} must be set for {platform}", .missing.join(" and "))]
    MissingCredentials {
        platform: String,
        missing: Vec<String>,
    },

    #[error("{platform} API error ({status}): {body}")]
    PlatformRejected {
        platform: String,
        status: u16,
        body: String,
    },

    #[error("Network error while publishing to {platform}: {message}")]
    Network { platform: String, message: String },
}

impl PublishError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PublishError::MissingCredentials { .. } => ErrorKind::MissingCredentials,
            PublishError::PlatformRejected { .. } => ErrorKind::PlatformRejected,
            PublishError::Network { .. } => ErrorKind::Network,
        }
    }
}
