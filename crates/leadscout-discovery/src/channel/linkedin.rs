use leadscout_core::Channel;

use super::{host_matches, non_empty, path_contains_any, site_query, ChannelStrategy};
use crate::employee::parse_employee_count;
use crate::extract::ParsedPage;
use crate::types::{ChannelFields, CompanyInfo, ExtractedContent, MappedFields, ProfileInfo};

const DOMAIN: &str = "linkedin.com";
const ACCEPTED_PATHS: &[&str] = &["/posts/", "/in/", "/pulse/", "/activity/"];

pub struct LinkedInStrategy;

impl ChannelStrategy for LinkedInStrategy {
    fn channel(&self) -> Channel {
        Channel::LinkedIn
    }

    fn build_query(&self, free_text: &str) -> String {
        site_query(DOMAIN, free_text, None)
    }

    fn accepts_url(&self, url: &str) -> bool {
        host_matches(url, &[DOMAIN]) && path_contains_any(url, ACCEPTED_PATHS)
    }

    fn extract_fields(&self, page: &ParsedPage<'_>) -> ChannelFields {
        let company = page.url.contains("/company/").then(|| CompanyInfo {
            name: page
                .meta
                .get("og:title")
                .unwrap_or_default()
                .split('|')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
            industry: page.meta.get("industry").map(str::to_string),
            size: page.meta.get("company-size").map(str::to_string),
            location: page.meta.get("location").map(str::to_string),
        });

        let profile = page
            .url
            .contains("/in/")
            .then(|| parse_profile_title(page.title));

        ChannelFields::LinkedIn { company, profile }
    }

    fn map_to_result(&self, content: &ExtractedContent) -> MappedFields {
        let (company, profile) = match &content.fields {
            ChannelFields::LinkedIn { company, profile } => (company.as_ref(), profile.as_ref()),
            _ => (None, None),
        };

        let company_name = company
            .and_then(|c| non_empty(&c.name))
            .or_else(|| profile.and_then(|p| non_empty(&p.company)))
            .unwrap_or_else(|| "Unknown Company".to_string());

        MappedFields {
            company_name,
            contact_info: profile.and_then(|p| non_empty(&p.name)),
            employee_count: company
                .and_then(|c| c.size.as_deref())
                .and_then(parse_employee_count),
            industry: company.and_then(|c| c.industry.clone()),
            location: company.and_then(|c| c.location.clone()),
        }
    }
}

/// Split a profile title such as `"Jane Doe - VP Sales at Acme | LinkedIn"`
/// into name, role and company.
///
/// The site suffix after `|` is dropped first. Name and role are separated by
/// `-`; the company follows the last ` at `.
fn parse_profile_title(title: &str) -> ProfileInfo {
    let title = title.split('|').next().unwrap_or_default().trim();

    let (name, rest) = match title.split_once('-') {
        Some((name, rest)) => (name.trim(), rest),
        None => (title, ""),
    };
    let headline = rest.split('-').next().unwrap_or_default().trim();

    let (role, company) = match headline.rsplit_once(" at ") {
        Some((role, company)) => (role.trim(), company.trim()),
        None => (
            headline,
            title
                .rsplit_once(" at ")
                .map(|(_, c)| c.trim())
                .unwrap_or_default(),
        ),
    };

    ProfileInfo {
        name: name.to_string(),
        role: role.to_string(),
        company: company.to_string(),
    }
}
