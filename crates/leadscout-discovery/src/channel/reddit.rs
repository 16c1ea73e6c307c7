use leadscout_core::Channel;

use super::{host_matches, non_empty, path_contains_any, site_query, ChannelStrategy};
use crate::extract::ParsedPage;
use crate::types::{ChannelFields, ExtractedContent, MappedFields};

const DOMAIN: &str = "reddit.com";
const ACCEPTED_PATHS: &[&str] = &["/r/", "/comments/"];

pub struct RedditStrategy;

impl ChannelStrategy for RedditStrategy {
    fn channel(&self) -> Channel {
        Channel::Reddit
    }

    fn build_query(&self, free_text: &str) -> String {
        site_query(DOMAIN, free_text, None)
    }

    fn accepts_url(&self, url: &str) -> bool {
        host_matches(url, &[DOMAIN]) && path_contains_any(url, ACCEPTED_PATHS)
    }

    fn extract_fields(&self, page: &ParsedPage<'_>) -> ChannelFields {
        ChannelFields::Reddit {
            subreddit: subreddit_from_url(page.url),
            score: page
                .meta
                .get("score")
                .and_then(|s| s.trim().parse::<i64>().ok())
                .unwrap_or(0),
            comment_count: page
                .meta
                .get("num_comments")
                .and_then(|s| s.replace(',', "").trim().parse::<u64>().ok())
                .unwrap_or(0),
        }
    }

    fn map_to_result(&self, content: &ExtractedContent) -> MappedFields {
        let subreddit = match &content.fields {
            ChannelFields::Reddit { subreddit, .. } => non_empty(subreddit),
            _ => None,
        };

        MappedFields {
            company_name: format!(
                "Reddit user in r/{}",
                subreddit.as_deref().unwrap_or("Unknown")
            ),
            industry: subreddit,
            ..MappedFields::default()
        }
    }
}

/// Path segment after `/r/`, or `""` when the URL has none.
fn subreddit_from_url(url: &str) -> String {
    url.split_once("/r/")
        .map(|(_, rest)| rest.split(['/', '?', '#']).next().unwrap_or_default())
        .unwrap_or_default()
        .to_string()
}
