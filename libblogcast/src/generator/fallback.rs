//! Fixed post template used when generation is unavailable

use crate::config::OrganizationConfig;
use crate::document::ParsedDocument;

/// Build the fallback post for `document`
///
/// Pure and deterministic. The description paragraph is omitted when the
/// post has no description.
pub fn build(document: &ParsedDocument, organization: &OrganizationConfig) -> String {
    let mut sections = vec![format!(
        "New on the {} blog: {}",
        organization.short_name, document.title
    )];

    if !document.description.is_empty() {
        sections.push(document.description.clone());
    }

    sections.push("Read the full article on our website.".to_string());

    if !organization.fallback_hashtags.is_empty() {
        sections.push(organization.fallback_hashtags.join(" "));
    }

    sections.join("\n\n")
}
