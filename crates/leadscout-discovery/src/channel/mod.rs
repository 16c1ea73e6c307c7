//! Per-channel rules: query building, URL filtering, field extraction and
//! result mapping.
//!
//! Each [`Channel`] variant resolves to one static [`ChannelStrategy`] through
//! [`strategy_for`]. Adding a platform means adding one implementation and one
//! match arm there.

mod generic;
mod linkedin;
mod quora;
mod reddit;
mod twitter;

use leadscout_core::Channel;
use url::Url;

use crate::extract::ParsedPage;
use crate::types::{ChannelFields, ExtractedContent, MappedFields};

pub use generic::GenericStrategy;
pub use linkedin::LinkedInStrategy;
pub use quora::QuoraStrategy;
pub use reddit::RedditStrategy;
pub use twitter::TwitterStrategy;

/// Buying-intent phrases OR-ed into every search query.
pub const INTENT_PHRASES: &[&str] = &[
    "looking for a solution for",
    "need help with",
    "can anyone recommend",
    "alternative to",
    "struggling with",
    "how do you handle",
];

/// Channel-specific behavior used by the discovery pipeline.
pub trait ChannelStrategy: Send + Sync {
    fn channel(&self) -> Channel;

    /// Search-engine query for the user's free text.
    fn build_query(&self, free_text: &str) -> String;

    /// Whether a search hit belongs to this channel and looks like a post or profile.
    fn accepts_url(&self, url: &str) -> bool;

    /// Channel fields parsed from a fetched page.
    fn extract_fields(&self, page: &ParsedPage<'_>) -> ChannelFields;

    /// Result-record fields with the channel's fallback chain applied.
    fn map_to_result(&self, content: &ExtractedContent) -> MappedFields;
}

static LINKEDIN: LinkedInStrategy = LinkedInStrategy;
static TWITTER: TwitterStrategy = TwitterStrategy;
static REDDIT: RedditStrategy = RedditStrategy;
static QUORA: QuoraStrategy = QuoraStrategy;
static GENERIC: GenericStrategy = GenericStrategy;

/// Strategy table lookup.
#[must_use]
pub fn strategy_for(channel: Channel) -> &'static dyn ChannelStrategy {
    match channel {
        Channel::LinkedIn => &LINKEDIN,
        Channel::Twitter => &TWITTER,
        Channel::Reddit => &REDDIT,
        Channel::Quora => &QUORA,
        Channel::Other => &GENERIC,
    }
}

/// `(phrase one OR phrase two OR ...)`
#[must_use]
pub fn intent_clause() -> String {
    format!("({})", INTENT_PHRASES.join(" OR "))
}

/// `site:<domain> <intent> <query> [<extra> ]posts`
pub(crate) fn site_query(domain: &str, free_text: &str, extra: Option<&str>) -> String {
    let free_text = free_text.trim();
    let intent = intent_clause();
    match extra {
        Some(extra) => format!("site:{domain} {intent} {free_text} {extra} posts"),
        None => format!("site:{domain} {intent} {free_text} posts"),
    }
}

/// True when the URL's host is one of `domains` or a subdomain of one.
pub(crate) fn host_matches(url: &str, domains: &[&str]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    domains
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{d}")))
}

/// True when the lower-cased URL path contains any of `patterns`.
pub(crate) fn path_contains_any(url: &str, patterns: &[&str]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let path = parsed.path().to_ascii_lowercase();
    patterns.iter().any(|p| path.contains(p))
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
