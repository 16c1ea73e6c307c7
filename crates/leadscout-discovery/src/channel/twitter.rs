use leadscout_core::Channel;
use scraper::Selector;
use url::Url;

use super::{host_matches, non_empty, site_query, ChannelStrategy};
use crate::extract::ParsedPage;
use crate::types::{ChannelFields, ExtractedContent, MappedFields};

const DOMAINS: &[&str] = &["twitter.com", "x.com"];
const QUERY_FILTERS: &str = "-filter:links -filter:retweets";

pub struct TwitterStrategy;

impl ChannelStrategy for TwitterStrategy {
    fn channel(&self) -> Channel {
        Channel::Twitter
    }

    fn build_query(&self, free_text: &str) -> String {
        site_query(DOMAINS[0], free_text, Some(QUERY_FILTERS))
    }

    fn accepts_url(&self, url: &str) -> bool {
        host_matches(url, DOMAINS)
    }

    fn extract_fields(&self, page: &ParsedPage<'_>) -> ChannelFields {
        let status_link = Selector::parse(r#"a[href*="/status/"]"#).expect("valid status selector");
        let verified_marker =
            Selector::parse(r#"svg[aria-label="Verified Account"], [data-testid="icon-verified"]"#)
                .expect("valid verified selector");

        let username = page
            .document
            .select(&status_link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(username_from_href)
            .unwrap_or_default();

        let follower_count = page
            .meta
            .get("profile:followers_count")
            .and_then(|raw| raw.replace(',', "").trim().parse::<u64>().ok());

        ChannelFields::Twitter {
            username,
            follower_count,
            verified: page.document.select(&verified_marker).next().is_some(),
        }
    }

    fn map_to_result(&self, content: &ExtractedContent) -> MappedFields {
        let username = match &content.fields {
            ChannelFields::Twitter { username, .. } => non_empty(username),
            _ => None,
        };

        MappedFields {
            contact_info: username.as_ref().map(|u| format!("@{u}")),
            company_name: username.unwrap_or_else(|| "Unknown User".to_string()),
            ..MappedFields::default()
        }
    }
}

/// First path segment of a status link: `/jack/status/20` and
/// `https://twitter.com/jack/status/20` both yield `jack`.
fn username_from_href(href: &str) -> String {
    let path = match Url::parse(href) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => href.to_string(),
    };
    path.split('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .trim_start_matches('@')
        .to_string()
}
