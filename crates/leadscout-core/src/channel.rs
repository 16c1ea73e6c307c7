use serde::{Deserialize, Serialize};

/// Content platform a discovery run is restricted to.
///
/// Names outside the four supported platforms fall back to [`Channel::Other`],
/// which searches the open web without a site restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    LinkedIn,
    Twitter,
    Reddit,
    Quora,
    Other,
}

impl Channel {
    /// Resolve a channel from its display name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "linkedin" => Channel::LinkedIn,
            "twitter" => Channel::Twitter,
            "reddit" => Channel::Reddit,
            "quora" => Channel::Quora,
            _ => Channel::Other,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::LinkedIn => write!(f, "linkedin"),
            Channel::Twitter => write!(f, "twitter"),
            Channel::Reddit => write!(f, "reddit"),
            Channel::Quora => write!(f, "quora"),
            Channel::Other => write!(f, "other"),
        }
    }
}

/// Source label shown to users: first letter upper-cased, remainder lower-cased.
///
/// `"reddit"` becomes `"Reddit"`, `"LINKEDIN"` becomes `"Linkedin"`.
#[must_use]
pub fn source_label(channel_name: &str) -> String {
    let trimmed = channel_name.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str().to_lowercase()),
        None => String::new(),
    }
}
