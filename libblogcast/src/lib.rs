//! Blogcast - promote blog posts on social platforms
//!
//! This library reads a markdown blog post, asks a language model for
//! platform-tailored post copy (falling back to a fixed template when that is
//! unavailable) and publishes the result to a Facebook Page or a LinkedIn
//! organisation page.

pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod logging;
pub mod pipeline;
pub mod platforms;
pub mod policy;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use document::ParsedDocument;
pub use error::{BlogcastError, ErrorKind, Result};
pub use pipeline::{Pipeline, PublishReport, PublishRequest};
pub use platforms::{PlatformKind, Publisher};
pub use types::{ContentSource, GeneratedContent, PublishResult};
