//! Facebook Page publishing via the Graph API
//!
//! Posts go to `{api_base}/{api_version}/{page_id}/feed` with the page access
//! token in the JSON body. The article link is appended to the message and
//! also sent as the `link` field so Facebook renders a preview card.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use super::{missing_credentials_error, present, OutboundPost, PlatformKind, Publisher};
use crate::config::FacebookConfig;
use crate::document::ParsedDocument;
use crate::error::PublishError;
use crate::transport::{HttpRequest, HttpTransport};

pub const PAGE_ID_VAR: &str = "FACEBOOK_PAGE_ID";
pub const ACCESS_TOKEN_VAR: &str = "FACEBOOK_ACCESS_TOKEN";

pub struct FacebookPublisher {
    page_id: Option<String>,
    access_token: Option<SecretString>,
    api_base: String,
    api_version: String,
    timeout: Duration,
    transport: Arc<dyn HttpTransport>,
}

impl FacebookPublisher {
    pub fn new(
        page_id: Option<String>,
        access_token: Option<SecretString>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let defaults = FacebookConfig::default();
        Self {
            page_id,
            access_token,
            api_base: defaults.api_base,
            api_version: defaults.api_version,
            timeout: Duration::from_secs(30),
            transport,
        }
    }

    pub fn from_config(
        config: &FacebookConfig,
        timeout: Duration,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            page_id: config.page_id.clone(),
            access_token: config
                .access_token
                .as_ref()
                .map(|token| SecretString::from(token.expose_secret().to_string())),
            api_base: config.api_base.clone(),
            api_version: config.api_version.clone(),
            timeout,
            transport,
        }
    }

    fn credentials(&self) -> Result<(&str, &str), PublishError> {
        let page_id = present(self.page_id.as_deref());
        let token = present(self.access_token.as_ref().map(|t| t.expose_secret()));

        match (page_id, token) {
            (Some(page_id), Some(token)) => Ok((page_id.trim(), token)),
            _ => Err(missing_credentials_error(
                self.kind(),
                self.missing_credentials(),
            )),
        }
    }

    fn feed_url(&self, page_id: &str) -> String {
        format!("{}/{}/{}/feed", self.api_base, self.api_version, page_id)
    }
}

/// Message text with the article link as a trailing line
pub fn full_message(content: &str, link: &str) -> String {
    format!("{}\n\nRead more: {}", content, link)
}

#[async_trait]
impl Publisher for FacebookPublisher {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Facebook
    }

    fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if present(self.page_id.as_deref()).is_none() {
            missing.push(PAGE_ID_VAR);
        }
        if present(self.access_token.as_ref().map(|t| t.expose_secret())).is_none() {
            missing.push(ACCESS_TOKEN_VAR);
        }
        missing
    }

    fn compose(
        &self,
        content: &str,
        document: &ParsedDocument,
    ) -> Result<OutboundPost, PublishError> {
        let (page_id, token) = self.credentials()?;

        let message = full_message(content, &document.url);
        let body = json!({
            "message": message,
            "link": document.url,
            "access_token": token,
        });

        Ok(OutboundPost {
            platform: self.kind(),
            request: HttpRequest::post_json(self.feed_url(page_id), body, self.timeout)
                .with_header("Content-Type", "application/json"),
            message,
            link: document.url.clone(),
            secret_fields: vec!["/access_token"],
        })
    }

    fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }
}
