//! Blog post to social post pipeline
//!
//! One run reads a post, produces copy for one platform and publishes it (or
//! logs it, in dry-run mode). Steps run strictly in order: parse, policy,
//! generate, publish.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::document::{self, ParsedDocument};
use crate::error::BlogcastError;
use crate::generator::ContentGenerator;
use crate::platforms::{create_publisher, PlatformKind};
use crate::policy::PlatformPolicy;
use crate::transport::HttpTransport;
use crate::types::{GeneratedContent, PublishResult};
use crate::Result;

/// Request to publish one blog post to one platform
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub post_path: PathBuf,
    pub platform: PlatformKind,
    pub dry_run: bool,
}

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub document: ParsedDocument,
    pub content: GeneratedContent,
    pub result: PublishResult,
}

pub struct Pipeline {
    config: Config,
    transport: Arc<dyn HttpTransport>,
}

impl Pipeline {
    pub fn new(config: Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the pipeline for `request`
    ///
    /// # Errors
    ///
    /// Returns a `Document` error when the post cannot be read or has no
    /// frontmatter, and a `Publish` error when publishing fails. Generation
    /// problems never fail a run; they switch the copy to the fallback
    /// template.
    pub async fn run(&self, request: &PublishRequest) -> Result<PublishReport> {
        let document = self.read_document(&request.post_path)?;

        let policy = PlatformPolicy::for_platform(request.platform, &self.config.organization);

        info!("Generating {} post...", request.platform.display_name());
        let generator = ContentGenerator::new(&self.config, self.transport.as_ref());
        let content = generator.generate(&document, &policy).await;
        info!(source = %content.source, "Post copy ready");

        info!("Publishing to {}...", request.platform.display_name());
        let publisher = create_publisher(request.platform, &self.config, self.transport.clone());
        let result = publisher
            .publish(&content.text, &document, request.dry_run)
            .await;

        if let Some(error) = result.error.clone() {
            return Err(BlogcastError::Publish(error));
        }

        Ok(PublishReport {
            document,
            content,
            result,
        })
    }

    fn read_document(&self, path: &Path) -> Result<ParsedDocument> {
        info!("Reading blog post: {}", path.display());
        let document = document::parse(path, &self.config.site.base_url)?;
        info!("Title: {}", document.title);
        info!("URL: {}", document.url);
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::transport::mock::{MockReply, MockTransport};
    use crate::types::ContentSource;
    use secrecy::SecretString;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const POST: &str = "---\ntitle: \"New Routes\"\ndescription: \"Expanded coverage\"\ntags: [\"Safety\", \"Birmingham\"]\n---\nWe are expanding our routes across the West Midlands.\n";

    fn post_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".md")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn facebook_config() -> Config {
        let mut config = Config::default();
        config.facebook.page_id = Some("1234567890".to_string());
        config.facebook.access_token = Some(SecretString::from("page-token".to_string()));
        config
    }

    fn request(file: &NamedTempFile, platform: PlatformKind, dry_run: bool) -> PublishRequest {
        PublishRequest {
            post_path: file.path().to_path_buf(),
            platform,
            dry_run,
        }
    }

    #[tokio::test]
    async fn test_dry_run_without_api_key_makes_no_calls() {
        let file = post_file(POST);
        let transport = Arc::new(MockTransport::new());
        let pipeline = Pipeline::new(facebook_config(), transport.clone());

        let report = pipeline
            .run(&request(&file, PlatformKind::Facebook, true))
            .await
            .unwrap();

        assert_eq!(report.content.source, ContentSource::Fallback);
        assert_eq!(report.result, PublishResult::dry_run());
        assert_eq!(report.document.title, "New Routes");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_live_run_publishes_generated_copy() {
        let file = post_file(POST);
        let mut config = facebook_config();
        config.generation.api_key = Some(SecretString::from("sk-test".to_string()));
        let transport = Arc::new(
            MockTransport::new()
                .with_route(
                    "/v1/messages",
                    MockReply::json(json!({"content": [{"type": "text", "text": "Generated copy"}]})),
                )
                .with_route("/feed", MockReply::json(json!({"id": "1234567890_1"}))),
        );
        let pipeline = Pipeline::new(config, transport.clone());

        let report = pipeline
            .run(&request(&file, PlatformKind::Facebook, false))
            .await
            .unwrap();

        assert_eq!(report.content, GeneratedContent::generated("Generated copy"));
        assert_eq!(report.result.remote_id.as_deref(), Some("1234567890_1"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].url.ends_with("/v1/messages"));
        assert!(requests[1].body["message"]
            .as_str()
            .unwrap()
            .starts_with("Generated copy\n\nRead more: "));
    }

    #[tokio::test]
    async fn test_missing_document_fails_before_any_call() {
        let transport = Arc::new(MockTransport::new());
        let pipeline = Pipeline::new(facebook_config(), transport.clone());
        let request = PublishRequest {
            post_path: PathBuf::from("/nonexistent/blog/post.md"),
            platform: PlatformKind::Facebook,
            dry_run: true,
        };

        let err = pipeline.run(&request).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Document);
        assert_eq!(err.exit_code(), 1);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_publish_failure_is_an_error() {
        let file = post_file(POST);
        let transport = Arc::new(
            MockTransport::new().with_route("/feed", MockReply::status(401, "{\"error\":\"bad token\"}")),
        );
        let pipeline = Pipeline::new(facebook_config(), transport);

        let err = pipeline
            .run(&request(&file, PlatformKind::Facebook, false))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PlatformRejected);
        assert!(err.to_string().contains("bad token"));
    }

    #[tokio::test]
    async fn test_missing_credentials_is_an_error_in_dry_run() {
        let file = post_file(POST);
        let transport = Arc::new(MockTransport::new());
        let pipeline = Pipeline::new(Config::default(), transport.clone());

        let err = pipeline
            .run(&request(&file, PlatformKind::LinkedIn, true))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingCredentials);
        assert_eq!(transport.call_count(), 0);
    }
}
