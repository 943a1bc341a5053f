//! Post copy generation
//!
//! [`ContentGenerator`] asks the generation service (Anthropic Messages API)
//! for platform-tailored copy. Generation is best-effort: a missing API key or
//! any failure of the single request yields the [`fallback`] template instead,
//! and the returned [`GeneratedContent`] records which path was taken.

use std::time::Duration;

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::config::{Config, GenerationConfig, OrganizationConfig};
use crate::document::ParsedDocument;
use crate::error::GenerationError;
use crate::policy::PlatformPolicy;
use crate::transport::{HttpRequest, HttpTransport};
use crate::types::GeneratedContent;

pub mod fallback;
pub mod prompt;

/// Anthropic API version header value
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

pub struct ContentGenerator<'a> {
    generation: &'a GenerationConfig,
    organization: &'a OrganizationConfig,
    timeout: Duration,
    transport: &'a dyn HttpTransport,
}

impl<'a> ContentGenerator<'a> {
    pub fn new(config: &'a Config, transport: &'a dyn HttpTransport) -> Self {
        Self {
            generation: &config.generation,
            organization: &config.organization,
            timeout: config.http.timeout(),
            transport,
        }
    }

    /// Produce post copy for `document` under `policy`
    ///
    /// Never fails: every generation error is logged and replaced by the
    /// fallback template.
    pub async fn generate(
        &self,
        document: &ParsedDocument,
        policy: &PlatformPolicy,
    ) -> GeneratedContent {
        match self.request_copy(document, policy).await {
            Ok(text) => {
                info!(
                    "AI-generated {} post created successfully.",
                    policy.platform.display_name()
                );
                GeneratedContent::generated(text)
            }
            Err(GenerationError::MissingApiKey) => {
                warn!("LLM_API_KEY not set, using fallback template.");
                self.fallback(document)
            }
            Err(e) => {
                warn!("Generation service error: {}. Using fallback template.", e);
                self.fallback(document)
            }
        }
    }

    fn fallback(&self, document: &ParsedDocument) -> GeneratedContent {
        GeneratedContent::fallback(fallback::build(document, self.organization))
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.generation.base_url)
    }

    async fn request_copy(
        &self,
        document: &ParsedDocument,
        policy: &PlatformPolicy,
    ) -> Result<String, GenerationError> {
        let api_key = self
            .generation
            .api_key
            .as_ref()
            .ok_or(GenerationError::MissingApiKey)?;

        let body = json!({
            "model": self.generation.model,
            "max_tokens": self.generation.max_tokens,
            "system": prompt::system_prompt(policy, self.organization),
            "messages": [{
                "role": "user",
                "content": prompt::user_message(document, policy, self.organization),
            }],
        });

        let request = HttpRequest::post_json(self.messages_url(), body, self.timeout)
            .with_header("x-api-key", api_key.expose_secret())
            .with_header("anthropic-version", ANTHROPIC_API_VERSION)
            .with_header("Content-Type", "application/json");

        tracing::debug!(model = %self.generation.model, "Requesting post copy");

        let response = self.transport.post_json(request).await?;

        if !response.is_success() {
            return Err(GenerationError::Rejected {
                status: response.status,
                body: response.body,
            });
        }

        extract_text(&response.body)
    }
}

/// First non-empty text block of a Messages API response body
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let parsed: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

    parsed
        .content
        .into_iter()
        .find(|block| block.block_type == "text")
        .and_then(|block| block.text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(GenerationError::NoTextBlock)
}
