//! HTML metadata parsing shared by every channel.

use std::collections::HashMap;

use scraper::{Html, Selector};

/// `<meta>` tag values keyed by their `property` attribute, or `name` when
/// `property` is absent. Tags without content are skipped; when a key
/// repeats, the last tag wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTags(HashMap<String, String>);

impl MetaTags {
    #[must_use]
    pub fn from_document(document: &Html) -> Self {
        let selector = Selector::parse("meta").expect("valid meta selector");
        let mut tags = HashMap::new();
        for element in document.select(&selector) {
            let attrs = element.value();
            let Some(key) = attrs.attr("property").or_else(|| attrs.attr("name")) else {
                continue;
            };
            let Some(content) = attrs.attr("content").map(str::trim) else {
                continue;
            };
            if key.is_empty() || content.is_empty() {
                continue;
            }
            tags.insert(key.trim().to_string(), content.to_string());
        }
        Self(tags)
    }

    /// Non-empty value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// First non-empty value among `keys`, or `""`.
    #[must_use]
    pub fn first_of(&self, keys: &[&str]) -> &str {
        keys.iter().find_map(|k| self.get(k)).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A fetched page after HTML parsing, handed to channel strategies.
pub struct ParsedPage<'a> {
    pub url: &'a str,
    pub document: &'a Html,
    pub meta: &'a MetaTags,
    /// Resolved title: `og:title`, then `title` meta, then the `<title>` element.
    pub title: &'a str,
}

/// Text of the document's `<title>` element, whitespace-collapsed.
pub(crate) fn document_title(document: &Html) -> String {
    let selector = Selector::parse("title").expect("valid title selector");
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}
