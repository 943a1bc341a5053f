//! Platform abstraction and implementations
//!
//! Every supported platform implements [`Publisher`], so the pipeline never
//! needs to know which platform it is talking to. Adapters differ only in the
//! credentials they need and the shape of the request they compose; the
//! dry-run, send and response handling is shared by [`dispatch`].
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use libblogcast::config::Config;
//! use libblogcast::platforms::{create_publisher, PlatformKind};
//! use libblogcast::transport::ReqwestTransport;
//!
//! # async fn example(document: libblogcast::document::ParsedDocument) -> libblogcast::Result<()> {
//! let config = Config::load()?;
//! let transport = Arc::new(ReqwestTransport::new()?);
//! let publisher = create_publisher(PlatformKind::LinkedIn, &config, transport);
//!
//! let result = publisher.publish("Fresh from the blog", &document, true).await;
//! assert!(result.success);
//! # Ok(())
//! # }
//! ```

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info};

use crate::config::Config;
use crate::document::ParsedDocument;
use crate::error::PublishError;
use crate::transport::{HttpRequest, HttpTransport, TransportError};
use crate::types::PublishResult;

pub mod facebook;
pub mod linkedin;

pub use facebook::FacebookPublisher;
pub use linkedin::LinkedInPublisher;

/// Marker returned when a successful response carries no post id
pub const UNKNOWN_REMOTE_ID: &str = "unknown";

const REDACTED: &str = "[REDACTED]";

/// The platforms Blogcast can publish to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    Facebook,
    LinkedIn,
}

impl PlatformKind {
    pub const ALL: [PlatformKind; 2] = [PlatformKind::Facebook, PlatformKind::LinkedIn];

    /// Lowercase identifier used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKind::Facebook => "facebook",
            PlatformKind::LinkedIn => "linkedin",
        }
    }

    /// Human-readable name used in logs and prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            PlatformKind::Facebook => "Facebook",
            PlatformKind::LinkedIn => "LinkedIn",
        }
    }
}

impl FromStr for PlatformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "facebook" | "fb" => Ok(PlatformKind::Facebook),
            "linkedin" | "li" => Ok(PlatformKind::LinkedIn),
            _ => Err(format!(
                "Unknown platform: '{}'. Valid options: facebook, linkedin",
                s
            )),
        }
    }
}

impl std::fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully composed publish request, before it is sent
#[derive(Debug, Clone)]
pub struct OutboundPost {
    pub platform: PlatformKind,
    pub request: HttpRequest,
    /// Text the audience will read
    pub message: String,
    pub link: String,
    /// Paths (JSON pointers) of body fields that hold secrets
    pub secret_fields: Vec<&'static str>,
}

impl OutboundPost {
    /// The request body with secret fields replaced, safe to log
    pub fn redacted_body(&self) -> Value {
        let mut body = self.request.body.clone();
        for pointer in &self.secret_fields {
            if let Some(field) = body.pointer_mut(pointer) {
                *field = Value::String(REDACTED.to_string());
            }
        }
        body
    }
}

/// Common interface for publishing to a social platform
#[async_trait]
pub trait Publisher: Send + Sync {
    fn kind(&self) -> PlatformKind;

    /// Lowercase identifier (e.g. "facebook")
    fn name(&self) -> &str {
        self.kind().as_str()
    }

    /// Names of required credentials that are absent or blank
    fn missing_credentials(&self) -> Vec<&'static str>;

    /// Build the platform request for `content`
    ///
    /// Returns `MissingCredentials` when [`missing_credentials`](Self::missing_credentials)
    /// is non-empty.
    fn compose(
        &self,
        content: &str,
        document: &ParsedDocument,
    ) -> Result<OutboundPost, PublishError>;

    fn transport(&self) -> &dyn HttpTransport;

    /// Publish `content` with a link to `document`
    ///
    /// With `dry_run` the composed request is logged instead of sent. Missing
    /// credentials fail before anything is composed, in either mode.
    async fn publish(
        &self,
        content: &str,
        document: &ParsedDocument,
        dry_run: bool,
    ) -> PublishResult {
        let post = match self.compose(content, document) {
            Ok(post) => post,
            Err(e) => {
                error!("{}", e);
                return PublishResult::failed(e);
            }
        };

        dispatch(self.transport(), post, dry_run).await
    }
}

/// The `MissingCredentials` error for `kind`
pub(crate) fn missing_credentials_error(
    kind: PlatformKind,
    missing: Vec<&'static str>,
) -> PublishError {
    PublishError::MissingCredentials {
        platform: kind.display_name().to_string(),
        missing: missing.into_iter().map(String::from).collect(),
    }
}

/// Blank strings count as missing credentials
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Send (or, in dry-run mode, log) a composed post and interpret the response
pub async fn dispatch(
    transport: &dyn HttpTransport,
    post: OutboundPost,
    dry_run: bool,
) -> PublishResult {
    let platform = post.platform.display_name();

    if dry_run {
        info!("=== DRY RUN: would publish to {} ===", platform);
        info!("{}", post.message);
        info!("Link: {}", post.link);
        info!("Payload: {}", post.redacted_body());
        return PublishResult::dry_run();
    }

    let timeout = post.request.timeout;
    let response = match transport.post_json(post.request).await {
        Ok(response) => response,
        Err(e) => {
            let message = network_message(&e, timeout);
            error!("Network error while publishing to {}: {}", platform, message);
            return PublishResult::failed(PublishError::Network {
                platform: platform.to_string(),
                message,
            });
        }
    };

    if !response.is_success() {
        error!(
            "{} API error ({}): {}",
            platform, response.status, response.body
        );
        return PublishResult::failed(PublishError::PlatformRejected {
            platform: platform.to_string(),
            status: response.status,
            body: response.body,
        });
    }

    let remote_id = remote_id(&response.body);
    info!("Published to {}. Post ID: {}", platform, remote_id);
    PublishResult::published(remote_id)
}

fn network_message(error: &TransportError, timeout: Duration) -> String {
    match error {
        TransportError::Timeout(_) => format!("no response within {}s", timeout.as_secs()),
        other => other.to_string(),
    }
}

/// The `id` field of a JSON response body, or [`UNKNOWN_REMOTE_ID`]
pub fn remote_id(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    match parsed.as_ref().and_then(|v| v.get("id")) {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => UNKNOWN_REMOTE_ID.to_string(),
    }
}

/// Create the publisher for `kind` from configuration
pub fn create_publisher(
    kind: PlatformKind,
    config: &Config,
    transport: Arc<dyn HttpTransport>,
) -> Box<dyn Publisher> {
    match kind {
        PlatformKind::Facebook => Box::new(FacebookPublisher::from_config(
            &config.facebook,
            config.http.timeout(),
            transport,
        )),
        PlatformKind::LinkedIn => Box::new(LinkedInPublisher::from_config(
            &config.linkedin,
            config.http.timeout(),
            transport,
        )),
    }
}
