use leadscout_core::Channel;

use super::generic::title_as_company;
use super::{host_matches, site_query, ChannelStrategy};
use crate::extract::ParsedPage;
use crate::types::{ChannelFields, ExtractedContent, MappedFields};

const DOMAIN: &str = "quora.com";

pub struct QuoraStrategy;

impl ChannelStrategy for QuoraStrategy {
    fn channel(&self) -> Channel {
        Channel::Quora
    }

    fn build_query(&self, free_text: &str) -> String {
        site_query(DOMAIN, free_text, None)
    }

    fn accepts_url(&self, url: &str) -> bool {
        host_matches(url, &[DOMAIN])
    }

    fn extract_fields(&self, _page: &ParsedPage<'_>) -> ChannelFields {
        ChannelFields::Generic
    }

    fn map_to_result(&self, content: &ExtractedContent) -> MappedFields {
        title_as_company(content)
    }
}
