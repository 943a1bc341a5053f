//! Blog post parsing
//!
//! A blog post is a UTF-8 markdown file that starts with a frontmatter block
//! delimited by `---` lines, followed by the article body:
//!
//! ```text
//! ---
//! title: "New Routes"
//! description: Expanded coverage across the city
//! tags: [Safety, Birmingham]
//! ---
//! Article body...
//! ```
//!
//! Only `title`, `description` and `tags` are read from the frontmatter.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::DocumentError;

/// Maximum number of body characters kept for generation
pub const BODY_CHAR_LIMIT: usize = 2000;

static FRONTMATTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n(.*))?\z")
        .expect("frontmatter pattern is valid")
});

/// A parsed blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    /// Frontmatter title, or the file stem when absent
    pub title: String,
    pub description: String,
    /// File stem, used in the canonical URL
    pub slug: String,
    pub tags: Vec<String>,
    /// Trimmed body, at most [`BODY_CHAR_LIMIT`] characters
    pub body: String,
    /// `{base_url}/blog/{slug}`
    pub url: String,
}

/// Read and parse the blog post at `path`
pub fn parse(path: &Path, base_url: &str) -> Result<ParsedDocument, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_content(&content, path, base_url)
}

/// Parse already-loaded file content; `path` supplies the slug
pub fn parse_content(
    content: &str,
    path: &Path,
    base_url: &str,
) -> Result<ParsedDocument, DocumentError> {
    let captures = FRONTMATTER
        .captures(content)
        .ok_or_else(|| DocumentError::MissingFrontmatter(path.to_path_buf()))?;

    let frontmatter = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str()).trim();

    let slug = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let title = Some(extract_scalar(frontmatter, "title"))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| slug.clone());

    Ok(ParsedDocument {
        title,
        description: extract_scalar(frontmatter, "description"),
        tags: extract_list(frontmatter, "tags"),
        body: truncate_chars(body, BODY_CHAR_LIMIT).to_string(),
        url: format!("{}/blog/{}", base_url, slug),
        slug,
    })
}

/// Value of a `key: value` line, unquoted and trimmed; empty if absent
pub fn extract_scalar(frontmatter: &str, key: &str) -> String {
    let pattern = format!(
        r#"(?m)^{}:[ \t]*["']?(.*?)["']?[ \t\r]*$"#,
        regex::escape(key)
    );

    Regex::new(&pattern)
        .ok()
        .and_then(|re| re.captures(frontmatter))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Items of a `key: [a, b, c]` line with quotes stripped; empty if absent
pub fn extract_list(frontmatter: &str, key: &str) -> Vec<String> {
    let pattern = format!(r"(?m)^{}:[ \t]*\[(.*?)\]", regex::escape(key));

    let Some(inner) = Regex::new(&pattern)
        .ok()
        .and_then(|re| re.captures(frontmatter))
        .and_then(|captures| captures.get(1))
    else {
        return Vec::new();
    };

    inner
        .as_str()
        .replace(['"', '\''], "")
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Longest prefix of `s` with at most `max` characters
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}
