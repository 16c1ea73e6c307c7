//! Channel-tailored analysis prompts.

use leadscout_core::Channel;

use crate::types::{ChannelFields, ExtractedContent};

/// JSON shape the model must return.
const RESPONSE_SCHEMA: &str = r#"{
    "intent_score": (number between 0-1),
    "decision_maker_score": (number between 0-1),
    "urgency_score": (number between 0-1),
    "relevance_score": (number between 0-1),
    "overall_confidence": (number between 0-1),
    "key_insights": ["insight1", "insight2", ...]
}"#;

const CONSIDER: &str = "Consider:
1. Buying intent signals
2. Pain points mentioned
3. Decision-maker status
4. Relevance to the product/service";

/// Build the analysis prompt for one page.
#[must_use]
pub fn build_prompt(content: &ExtractedContent, query: &str, channel: Channel) -> String {
    let body = match channel {
        Channel::LinkedIn => linkedin_details(content, query),
        Channel::Twitter => format!(
            "Analyze this Twitter post for sales opportunities.\n\
             Tweet: {}\n\
             User Info: {}\n\n\
             {CONSIDER}: {query}",
            content.content,
            twitter_user(&content.fields),
        ),
        Channel::Reddit => format!(
            "Analyze this Reddit post for sales opportunities.\n\
             Post Content: {}\n\
             Subreddit: {}\n\n\
             {CONSIDER}: {query}",
            content.content,
            match &content.fields {
                ChannelFields::Reddit { subreddit, .. } => subreddit.as_str(),
                _ => "",
            },
        ),
        Channel::Quora | Channel::Other => format!(
            "Analyze this content for sales opportunities.\n\
             Content: {}\n\
             Title: {}\n\n\
             {CONSIDER}: {query}",
            content.content, content.title,
        ),
    };

    format!(
        "{body}\n\nReturn ONLY a JSON object with no additional text, using these exact fields:\n{RESPONSE_SCHEMA}\n"
    )
}

fn linkedin_details(content: &ExtractedContent, query: &str) -> String {
    let (company, profile) = match &content.fields {
        ChannelFields::LinkedIn { company, profile } => (company.as_ref(), profile.as_ref()),
        _ => (None, None),
    };

    let company_line = company.map_or_else(
        || "none".to_string(),
        |c| {
            format!(
                "name={}, industry={}, size={}, location={}",
                c.name,
                c.industry.as_deref().unwrap_or(""),
                c.size.as_deref().unwrap_or(""),
                c.location.as_deref().unwrap_or(""),
            )
        },
    );
    let profile_line = profile.map_or_else(
        || "none".to_string(),
        |p| format!("name={}, role={}, company={}", p.name, p.role, p.company),
    );

    format!(
        "Analyze this LinkedIn post to identify potential sales leads.\n\n\
         Post details:\n\
         - Content: {}\n\
         - Title: {}\n\
         - Company Info: {company_line}\n\
         - Profile Info: {profile_line}\n\n\
         Criteria for a valid lead:\n\
         - The post is written by an individual, not company news, documentation or a generic update.\n\
         - The post discusses a challenge, frustration or need related to: \"{query}\".\n\
         - Industry news, technical documentation and self-promotion are not leads.\n\
         - Direct buying signals (asking for recommendations, looking for a solution, describing pain points) score highest.",
        content.content, content.title,
    )
}

fn twitter_user(fields: &ChannelFields) -> String {
    match fields {
        ChannelFields::Twitter {
            username,
            follower_count,
            verified,
        } => format!(
            "username={username}, followers={}, verified={verified}",
            follower_count.map_or_else(|| "unknown".to_string(), |n| n.to_string()),
        ),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProfileInfo;

    fn content(fields: ChannelFields) -> ExtractedContent {
        ExtractedContent {
            title: "Need a CRM".to_string(),
            content: "Spreadsheets are killing our sales team".to_string(),
            fields,
            ..ExtractedContent::bare("https://example.com/post", "2025-01-01")
        }
    }

    #[test]
    fn every_prompt_demands_the_json_fields() {
        for channel in [
            Channel::LinkedIn,
            Channel::Twitter,
            Channel::Reddit,
            Channel::Quora,
            Channel::Other,
        ] {
            let prompt = build_prompt(&content(ChannelFields::Generic), "CRM software", channel);
            assert!(prompt.contains("Return ONLY a JSON object"), "{channel}");
            for key in [
                "intent_score",
                "decision_maker_score",
                "urgency_score",
                "relevance_score",
                "overall_confidence",
                "key_insights",
            ] {
                assert!(prompt.contains(key), "{channel} prompt missing {key}");
            }
            assert!(prompt.contains("CRM software"));
        }
    }

    #[test]
    fn reddit_prompt_names_subreddit() {
        let prompt = build_prompt(
            &content(ChannelFields::Reddit {
                subreddit: "sales".to_string(),
                score: 1,
                comment_count: 2,
            }),
            "CRM software",
            Channel::Reddit,
        );
        assert!(prompt.contains("Subreddit: sales"));
        assert!(prompt.contains("Post Content: Spreadsheets are killing our sales team"));
    }

    #[test]
    fn linkedin_prompt_includes_profile_and_criteria() {
        let prompt = build_prompt(
            &content(ChannelFields::LinkedIn {
                company: None,
                profile: Some(ProfileInfo {
                    name: "Jane Doe".to_string(),
                    role: "VP Sales".to_string(),
                    company: "Acme".to_string(),
                }),
            }),
            "CRM software",
            Channel::LinkedIn,
        );
        assert!(prompt.contains("Profile Info: name=Jane Doe, role=VP Sales, company=Acme"));
        assert!(prompt.contains("Company Info: none"));
        assert!(prompt.contains("related to: \"CRM software\""));
    }

    #[test]
    fn twitter_prompt_describes_user() {
        let prompt = build_prompt(
            &content(ChannelFields::Twitter {
                username: "jack".to_string(),
                follower_count: Some(10),
                verified: true,
            }),
            "CRM software",
            Channel::Twitter,
        );
        assert!(prompt.contains("User Info: username=jack, followers=10, verified=true"));
    }
}
