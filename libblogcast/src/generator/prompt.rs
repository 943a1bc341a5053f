//! Prompt text for the generation service

use std::ops::RangeInclusive;

use crate::config::OrganizationConfig;
use crate::document::{truncate_chars, ParsedDocument};
use crate::platforms::PlatformKind;
use crate::policy::{LinkPlacement, PlatformPolicy};

/// Number of body characters included in the user turn
pub const EXCERPT_CHARS: usize = 500;

fn range(r: &RangeInclusive<u32>) -> String {
    if r.start() == r.end() {
        r.start().to_string()
    } else {
        format!("{}-{}", r.start(), r.end())
    }
}

/// Instructional system message built from `policy`
pub fn system_prompt(policy: &PlatformPolicy, organization: &OrganizationConfig) -> String {
    let mut prompt = format!(
        "You are a social media manager for {}, {}.\nWrite a {} post to promote a new blog article.",
        organization.name,
        organization.description,
        policy.platform.display_name()
    );
    if let Some(note) = &policy.audience_note {
        prompt.push(' ');
        prompt.push_str(note);
    }
    prompt.push_str(" Rules:\n");

    let mut rules: Vec<String> = policy.tone_directives.clone();

    rules.push(format!(
        "{} paragraphs (total {} words)",
        range(&policy.paragraph_range),
        range(&policy.length_range)
    ));

    let emojis = match &policy.emoji_themes {
        Some(themes) => format!(
            "Include {} relevant emojis ({})",
            range(&policy.emoji_budget),
            themes
        ),
        None => format!("Include {} relevant emojis", range(&policy.emoji_budget)),
    };
    rules.push(emojis);

    rules.push(match policy.link_placement {
        LinkPlacement::AppendedToMessage => {
            "Do NOT include the URL, it will be added automatically".to_string()
        }
        LinkPlacement::Attachment => {
            "Do NOT include the URL, it will be added as a link attachment".to_string()
        }
    });

    if !policy.required_mentions.is_empty() {
        let mentions = policy
            .required_mentions
            .iter()
            .rev()
            .map(|m| format!("\"{}\"", m))
            .collect::<Vec<_>>()
            .join(" or ");
        let frequency = if policy.mention_once { "once" } else { "at least once" };
        rules.push(format!("Mention {} {}", mentions, frequency));
    }

    let hashtags = if policy.hashtag_examples.is_empty() {
        format!(
            "Include {} relevant hashtags at the end",
            range(&policy.hashtag_count_range)
        )
    } else {
        format!(
            "Include {} relevant hashtags at the end (e.g. {})",
            range(&policy.hashtag_count_range),
            policy.hashtag_examples.join(" ")
        )
    };
    rules.push(hashtags);

    if !policy.forbidden_phrases.is_empty() {
        let phrases = policy
            .forbidden_phrases
            .iter()
            .map(|p| format!("\"{}\"", p))
            .collect::<Vec<_>>()
            .join(", ");
        rules.push(format!("NEVER use: {}", phrases));
    }

    for rule in rules {
        prompt.push_str("- ");
        prompt.push_str(&rule);
        prompt.push('\n');
    }

    prompt
}

/// User turn carrying the article excerpt
pub fn user_message(
    document: &ParsedDocument,
    policy: &PlatformPolicy,
    organization: &OrganizationConfig,
) -> String {
    let request = match policy.platform {
        PlatformKind::Facebook => "Generate a Facebook post to promote this article.".to_string(),
        PlatformKind::LinkedIn => format!(
            "Generate a LinkedIn post for the {} company page.",
            organization.name
        ),
    };

    format!(
        "Blog title: {}\nDescription: {}\nTags: {}\n\nFirst {} characters of the article:\n{}\n\n{}",
        document.title,
        document.description,
        document.tags.join(", "),
        EXCERPT_CHARS,
        truncate_chars(&document.body, EXCERPT_CHARS),
        request
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> ParsedDocument {
        ParsedDocument {
            title: "New Routes".to_string(),
            description: "Expanded coverage".to_string(),
            slug: "new-routes".to_string(),
            tags: vec!["Safety".to_string(), "Birmingham".to_string()],
            body: "x".repeat(1200),
            url: "https://www.afjltd.co.uk/blog/new-routes".to_string(),
        }
    }

    #[test]
    fn test_facebook_system_prompt() {
        let org = OrganizationConfig::default();
        let prompt = system_prompt(&PlatformPolicy::facebook(&org), &org);

        assert!(prompt.starts_with(
            "You are a social media manager for AFJ Limited, a Birmingham-based transport company."
        ));
        assert!(prompt.contains("Write a Facebook post to promote a new blog article. Rules:"));
        assert!(prompt.contains("- Professional but approachable tone\n"));
        assert!(prompt.contains("- 2-3 paragraphs (total 150-250 words)\n"));
        assert!(prompt.contains("- Include 2-3 relevant emojis (transport, safety, community themed)\n"));
        assert!(prompt.contains("it will be added automatically"));
        assert!(prompt.contains("- Mention \"AFJ Limited\" or \"AFJ\" at least once\n"));
        assert!(prompt.contains("(e.g. #SENDTransport #Birmingham)"));
        assert!(prompt.contains("\"In today's fast-paced world\""));
    }

    #[test]
    fn test_linkedin_system_prompt() {
        let org = OrganizationConfig::default();
        let prompt = system_prompt(&PlatformPolicy::linkedin(&org), &org);

        assert!(prompt.contains("Write a LinkedIn post to promote a new blog article. This will be published as the organisation, not a personal profile. Rules:"));
        assert!(prompt.contains("(total 150-300 words)"));
        assert!(prompt.contains("- Include 1-2 relevant emojis (keep it professional)\n"));
        assert!(prompt.contains("added as a link attachment"));
        assert!(prompt.contains("\"AFJ\" once\n"));
        assert!(prompt.contains("#FleetManagement"));
    }

    #[test]
    fn test_single_value_ranges() {
        let org = OrganizationConfig::default();
        let mut policy = PlatformPolicy::facebook(&org);
        policy.emoji_budget = 1..=1;
        policy.emoji_themes = None;

        let prompt = system_prompt(&policy, &org);
        assert!(prompt.contains("- Include 1 relevant emojis\n"));
    }

    #[test]
    fn test_user_message_excerpt() {
        let org = OrganizationConfig::default();
        let message = user_message(&document(), &PlatformPolicy::facebook(&org), &org);

        assert!(message.starts_with("Blog title: New Routes\nDescription: Expanded coverage\nTags: Safety, Birmingham\n"));
        assert!(message.contains(&"x".repeat(EXCERPT_CHARS)));
        assert!(!message.contains(&"x".repeat(EXCERPT_CHARS + 1)));
        assert!(message.ends_with("Generate a Facebook post to promote this article."));
    }

    #[test]
    fn test_user_message_linkedin_request() {
        let org = OrganizationConfig::default();
        let message = user_message(&document(), &PlatformPolicy::linkedin(&org), &org);
        assert!(message.ends_with("Generate a LinkedIn post for the AFJ Limited company page."));
    }
}
