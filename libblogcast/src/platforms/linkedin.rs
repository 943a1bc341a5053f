//! LinkedIn organisation page publishing via the UGC Posts API
//!
//! Posts are authored by `urn:li:organization:{org_id}` and carry the article
//! as an `ARTICLE` media attachment, so the link is not repeated in the
//! commentary text. Authentication is a bearer token header.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use super::{missing_credentials_error, present, OutboundPost, PlatformKind, Publisher};
use crate::config::LinkedInConfig;
use crate::document::ParsedDocument;
use crate::error::PublishError;
use crate::transport::{HttpRequest, HttpTransport};

pub const ORG_ID_VAR: &str = "LINKEDIN_ORG_ID";
pub const ACCESS_TOKEN_VAR: &str = "LINKEDIN_ACCESS_TOKEN";

const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

pub struct LinkedInPublisher {
    org_id: Option<String>,
    access_token: Option<SecretString>,
    api_base: String,
    timeout: Duration,
    transport: Arc<dyn HttpTransport>,
}

impl LinkedInPublisher {
    pub fn new(
        org_id: Option<String>,
        access_token: Option<SecretString>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            org_id,
            access_token,
            api_base: LinkedInConfig::default().api_base,
            timeout: Duration::from_secs(30),
            transport,
        }
    }

    pub fn from_config(
        config: &LinkedInConfig,
        timeout: Duration,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            org_id: config.org_id.clone(),
            access_token: config
                .access_token
                .as_ref()
                .map(|token| SecretString::from(token.expose_secret().to_string())),
            api_base: config.api_base.clone(),
            timeout,
            transport,
        }
    }

    fn credentials(&self) -> Result<(&str, &str), PublishError> {
        let org_id = present(self.org_id.as_deref());
        let token = present(self.access_token.as_ref().map(|t| t.expose_secret()));

        match (org_id, token) {
            (Some(org_id), Some(token)) => Ok((org_id.trim(), token)),
            _ => Err(missing_credentials_error(
                self.kind(),
                self.missing_credentials(),
            )),
        }
    }

    fn ugc_posts_url(&self) -> String {
        format!("{}/v2/ugcPosts", self.api_base)
    }
}

/// UGC post body sharing `document` as an article with `content` as commentary
pub fn ugc_post_body(org_id: &str, content: &str, document: &ParsedDocument) -> Value {
    json!({
        "author": format!("urn:li:organization:{}", org_id),
        "lifecycleState": "PUBLISHED",
        "specificContent": {
            "com.linkedin.ugc.ShareContent": {
                "shareCommentary": { "text": content },
                "shareMediaCategory": "ARTICLE",
                "media": [{
                    "status": "READY",
                    "originalUrl": document.url,
                    "title": { "text": document.title },
                }],
            }
        },
        "visibility": {
            "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC"
        },
    })
}

#[async_trait]
impl Publisher for LinkedInPublisher {
    fn kind(&self) -> PlatformKind {
        PlatformKind::LinkedIn
    }

    fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if present(self.access_token.as_ref().map(|t| t.expose_secret())).is_none() {
            missing.push(ACCESS_TOKEN_VAR);
        }
        if present(self.org_id.as_deref()).is_none() {
            missing.push(ORG_ID_VAR);
        }
        missing
    }

    fn compose(
        &self,
        content: &str,
        document: &ParsedDocument,
    ) -> Result<OutboundPost, PublishError> {
        let (org_id, token) = self.credentials()?;

        let request = HttpRequest::post_json(
            self.ugc_posts_url(),
            ugc_post_body(org_id, content, document),
            self.timeout,
        )
        .with_header("Authorization", format!("Bearer {}", token))
        .with_header("Content-Type", "application/json")
        .with_header("X-Restli-Protocol-Version", RESTLI_PROTOCOL_VERSION);

        Ok(OutboundPost {
            platform: self.kind(),
            request,
            message: content.to_string(),
            link: document.url.clone(),
            secret_fields: Vec::new(),
        })
    }

    fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }
}
