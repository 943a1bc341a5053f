//! Per-platform content rules for generated posts
//!
//! A [`PlatformPolicy`] is plain data: the generator turns it into prompt
//! instructions, nothing enforces it after generation.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::config::OrganizationConfig;
use crate::platforms::PlatformKind;

/// How the article link reaches the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPlacement {
    /// Appended to the message text by the publisher
    AppendedToMessage,
    /// Sent as a separate link attachment
    Attachment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformPolicy {
    pub platform: PlatformKind,
    /// Extra framing placed after the task sentence, if any
    pub audience_note: Option<String>,
    pub tone_directives: Vec<String>,
    pub paragraph_range: RangeInclusive<u32>,
    /// Total word count bounds
    pub length_range: RangeInclusive<u32>,
    pub emoji_budget: RangeInclusive<u32>,
    pub emoji_themes: Option<String>,
    /// Phrases the copy must never contain
    pub forbidden_phrases: BTreeSet<String>,
    /// At least one of these must appear in the copy
    pub required_mentions: BTreeSet<String>,
    pub mention_once: bool,
    pub hashtag_count_range: RangeInclusive<u32>,
    pub hashtag_examples: Vec<String>,
    pub link_placement: LinkPlacement,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_forbidden_phrases() -> BTreeSet<String> {
    [
        "In today's fast-paced world",
        "It goes without saying",
        "At the end of the day",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl PlatformPolicy {
    /// The policy for `platform`, with mentions taken from `organization`
    pub fn for_platform(platform: PlatformKind, organization: &OrganizationConfig) -> Self {
        match platform {
            PlatformKind::Facebook => Self::facebook(organization),
            PlatformKind::LinkedIn => Self::linkedin(organization),
        }
    }

    pub fn facebook(organization: &OrganizationConfig) -> Self {
        Self {
            platform: PlatformKind::Facebook,
            audience_note: None,
            tone_directives: strings(&[
                "Professional but approachable tone",
                "End with a call to action to read the full article",
                "Use British English spelling",
            ]),
            paragraph_range: 2..=3,
            length_range: 150..=250,
            emoji_budget: 2..=3,
            emoji_themes: Some("transport, safety, community themed".to_string()),
            forbidden_phrases: default_forbidden_phrases(),
            required_mentions: required_mentions(organization),
            mention_once: false,
            hashtag_count_range: 3..=5,
            hashtag_examples: strings(&["#SENDTransport", "#Birmingham"]),
            link_placement: LinkPlacement::AppendedToMessage,
        }
    }

    pub fn linkedin(organization: &OrganizationConfig) -> Self {
        Self {
            platform: PlatformKind::LinkedIn,
            audience_note: Some(
                "This will be published as the organisation, not a personal profile.".to_string(),
            ),
            tone_directives: strings(&[
                "Professional and authoritative tone, this is B2B/stakeholder content",
                "Focus on industry insight, thought leadership, or community impact",
                "End with a call to action to read the full article",
                "Use British English spelling",
            ]),
            paragraph_range: 2..=3,
            length_range: 150..=300,
            emoji_budget: 1..=2,
            emoji_themes: Some("keep it professional".to_string()),
            forbidden_phrases: default_forbidden_phrases(),
            required_mentions: required_mentions(organization),
            mention_once: true,
            hashtag_count_range: 3..=5,
            hashtag_examples: strings(&["#SENDTransport", "#NHS", "#FleetManagement"]),
            link_placement: LinkPlacement::Attachment,
        }
    }
}

fn required_mentions(organization: &OrganizationConfig) -> BTreeSet<String> {
    [&organization.name, &organization.short_name]
        .into_iter()
        .filter(|name| !name.trim().is_empty())
        .cloned()
        .collect()
}
