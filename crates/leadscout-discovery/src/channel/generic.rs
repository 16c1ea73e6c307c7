use leadscout_core::Channel;

use super::{intent_clause, non_empty, ChannelStrategy};
use crate::extract::ParsedPage;
use crate::types::{ChannelFields, ExtractedContent, MappedFields};

/// Open-web search with no site restriction.
pub struct GenericStrategy;

impl ChannelStrategy for GenericStrategy {
    fn channel(&self) -> Channel {
        Channel::Other
    }

    fn build_query(&self, free_text: &str) -> String {
        format!("{} {}", free_text.trim(), intent_clause())
    }

    fn accepts_url(&self, _url: &str) -> bool {
        true
    }

    fn extract_fields(&self, _page: &ParsedPage<'_>) -> ChannelFields {
        ChannelFields::Generic
    }

    fn map_to_result(&self, content: &ExtractedContent) -> MappedFields {
        title_as_company(content)
    }
}

/// Page title as the company name, `"Unknown Source"` when the page has none.
pub(super) fn title_as_company(content: &ExtractedContent) -> MappedFields {
    MappedFields {
        company_name: non_empty(&content.title).unwrap_or_else(|| "Unknown Source".to_string()),
        ..MappedFields::default()
    }
}
