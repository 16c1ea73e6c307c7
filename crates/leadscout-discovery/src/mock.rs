//! Synthetic candidates for demos and for callers whose live discovery came
//! back empty. Never mixed with live results.

use leadscout_core::{ScoredCandidate, SearchRequest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_TERM: &str = "Tech";
const MOCK_SOURCE: &str = "LinkedIn";

struct MockProfile {
    company: fn(&str) -> String,
    email: fn(&str) -> String,
    handle: &'static str,
    score: f64,
    employees: u64,
    industry: &'static str,
    location: &'static str,
}

const PROFILES: [MockProfile; 3] = [
    MockProfile {
        company: |term| format!("{term} Solutions Inc."),
        email: |term| format!("s.chen@{term}solutions.com"),
        handle: "schen",
        score: 0.95,
        employees: 1000,
        industry: "Software",
        location: "San Francisco, CA",
    },
    MockProfile {
        company: |term| format!("{term} Technologies"),
        email: |term| format!("mike.j@{term}tech.com"),
        handle: "mjohnson",
        score: 0.85,
        employees: 500,
        industry: "IT Services",
        location: "New York, NY",
    },
    MockProfile {
        company: |term| format!("Global {term}"),
        email: |term| format!("l.wong@global{term}.com"),
        handle: "lwong",
        score: 0.75,
        employees: 2000,
        industry: "Finance",
        location: "London, UK",
    },
];

/// Three synthetic candidates named after the query's first word.
///
/// Scores are fixed at 0.95, 0.85 and 0.75; `rng` only supplies the numeric
/// suffix of each profile link.
pub fn generate_mock<R: Rng>(request: &SearchRequest, rng: &mut R) -> Vec<ScoredCandidate> {
    let term = request
        .query
        .split_whitespace()
        .next()
        .unwrap_or(DEFAULT_TERM);
    let lower = term.to_lowercase();

    PROFILES
        .iter()
        .map(|p| {
            let suffix: u32 = rng.random_range(10_000..=99_999);
            ScoredCandidate {
                company_name: (p.company)(term),
                contact_info: Some((p.email)(&lower)),
                channel_key: request.channel_key,
                confidence_score: p.score,
                source: MOCK_SOURCE.to_string(),
                source_link: format!("https://linkedin.com/posts/{}_{suffix}", p.handle),
                employee_count: Some(p.employees),
                industry: Some(p.industry.to_string()),
                location: Some(p.location.to_string()),
            }
        })
        .collect()
}

/// [`generate_mock`] with a seeded RNG; equal seeds give equal output.
#[must_use]
pub fn generate_mock_seeded(request: &SearchRequest, seed: u64) -> Vec<ScoredCandidate> {
    generate_mock(request, &mut StdRng::seed_from_u64(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: &str) -> SearchRequest {
        SearchRequest::new(query, "linkedin", 42)
    }

    #[test]
    fn names_companies_after_first_word() {
        let mock = generate_mock_seeded(&request("Payroll automation tools"), 7);
        let names: Vec<_> = mock.iter().map(|c| c.company_name.as_str()).collect();
        assert_eq!(
            names,
            ["Payroll Solutions Inc.", "Payroll Technologies", "Global Payroll"]
        );
        assert_eq!(
            mock[0].contact_info.as_deref(),
            Some("s.chen@payrollsolutions.com")
        );
        assert_eq!(mock[1].contact_info.as_deref(), Some("mike.j@payrolltech.com"));
        assert_eq!(mock[2].contact_info.as_deref(), Some("l.wong@globalpayroll.com"));
    }

    #[test]
    fn fixed_scores_and_firmographics() {
        let mock = generate_mock_seeded(&request("CRM"), 1);
        let scores: Vec<f64> = mock.iter().map(|c| c.confidence_score).collect();
        assert_eq!(scores, [0.95, 0.85, 0.75]);
        assert_eq!(mock[0].employee_count, Some(1000));
        assert_eq!(mock[1].industry.as_deref(), Some("IT Services"));
        assert_eq!(mock[2].location.as_deref(), Some("London, UK"));
        assert!(mock.iter().all(|c| c.channel_key == 42 && c.source == "LinkedIn"));
    }

    #[test]
    fn empty_query_uses_default_term() {
        let mock = generate_mock_seeded(&request("   "), 3);
        assert_eq!(mock[0].company_name, "Tech Solutions Inc.");
        assert_eq!(mock[2].contact_info.as_deref(), Some("l.wong@globaltech.com"));
    }

    #[test]
    fn links_carry_five_digit_suffix() {
        let mock = generate_mock_seeded(&request("CRM"), 99);
        for (candidate, prefix) in mock.iter().zip([
            "https://linkedin.com/posts/schen_",
            "https://linkedin.com/posts/mjohnson_",
            "https://linkedin.com/posts/lwong_",
        ]) {
            let suffix = candidate
                .source_link
                .strip_prefix(prefix)
                .expect("link prefix");
            let n: u32 = suffix.parse().expect("numeric suffix");
            assert!((10_000..=99_999).contains(&n));
        }
    }

    #[test]
    fn same_seed_same_output() {
        let r = request("CRM software");
        assert_eq!(generate_mock_seeded(&r, 5), generate_mock_seeded(&r, 5));
    }
}
