//! Pipeline tests with in-process fakes of the search engine, page fetcher
//! and language model.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use leadscout_core::SearchRequest;
use leadscout_discovery::{
    ContentExtractor, DiscoveryConfig, DiscoveryError, DiscoveryPipeline, LanguageModel,
    LeadAnalyzer, PageFetcher, SearchEngine, SearchProvider,
};

struct FakeEngine {
    links: Vec<String>,
    queries: Mutex<Vec<String>>,
}

impl FakeEngine {
    fn new(links: &[&str]) -> Self {
        Self {
            links: links.iter().map(|s| (*s).to_string()).collect(),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SearchEngine for FakeEngine {
    async fn fetch_page(
        &self,
        query: &str,
        _page_size: usize,
        offset: usize,
    ) -> Result<Vec<String>, DiscoveryError> {
        self.queries.lock().unwrap().push(query.to_string());
        if offset == 0 {
            Ok(self.links.clone())
        } else {
            Ok(Vec::new())
        }
    }
}

struct FailingEngine;

#[async_trait]
impl SearchEngine for FailingEngine {
    async fn fetch_page(&self, _: &str, _: usize, _: usize) -> Result<Vec<String>, DiscoveryError> {
        Err(DiscoveryError::SearchApi("quota exceeded".to_string()))
    }
}

/// Serves pages from a map; unknown URLs fail with 404. URLs listed in
/// `slow` never complete within the test timeout.
#[derive(Default)]
struct FakeFetcher {
    pages: HashMap<String, String>,
    slow: Vec<String>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeFetcher {
    fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

/// Decrements the in-flight counter when the fetch completes or is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DiscoveryError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.peak.fetch_max(now, Ordering::SeqCst);
        let delay = if self.slow.iter().any(|s| s == url) {
            Duration::from_secs(3600)
        } else {
            Duration::from_millis(10)
        };
        tokio::time::sleep(delay).await;

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| DiscoveryError::UnexpectedStatus {
                status: 404,
                url: url.to_string(),
            })
    }
}

/// Replies with scores keyed by a marker found in the prompt.
struct FakeModel {
    replies: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn complete(&self, prompt: &str) -> Result<String, DiscoveryError> {
        self.replies
            .iter()
            .find(|(marker, _)| prompt.contains(marker))
            .map(|(_, reply)| (*reply).to_string())
            .ok_or_else(|| DiscoveryError::LanguageModel("no canned reply".to_string()))
    }
}

fn page(description: &str) -> String {
    format!(r#"<html><head><meta property="og:description" content="{description}"></head></html>"#)
}

fn config(timeout: Duration, width: usize) -> DiscoveryConfig {
    DiscoveryConfig {
        target_results: 10,
        page_delay: Duration::ZERO,
        max_concurrent_candidates: width,
        candidate_timeout: timeout,
    }
}

fn pipeline(
    engine: Arc<dyn SearchEngine>,
    fetcher: Arc<FakeFetcher>,
    model: FakeModel,
    config: DiscoveryConfig,
) -> DiscoveryPipeline {
    DiscoveryPipeline::new(
        Some(SearchProvider::new(engine, Duration::ZERO)),
        ContentExtractor::new(fetcher),
        LeadAnalyzer::new(Arc::new(model)),
        config,
    )
}

const GOOD: &str = "https://www.reddit.com/r/sales/comments/abc/need_crm";
const BROKEN: &str = "https://www.reddit.com/r/smallbusiness/comments/def/crm_help";

#[tokio::test]
async fn reddit_run_drops_failed_fetch_and_scores_the_rest() {
    let engine = Arc::new(FakeEngine::new(&[BROKEN, GOOD]));
    let fetcher = Arc::new(
        FakeFetcher::default().with_page(GOOD, &page("Our team keeps losing deals in spreadsheets")),
    );
    let model = FakeModel {
        replies: vec![(
            "losing deals",
            r#"```json
{"intent_score": 0.8, "decision_maker_score": 0.6, "urgency_score": 0.5, "relevance_score": 0.7, "overall_confidence": 0.9, "key_insights": ["evaluating CRMs"]}
```"#,
        )],
    };
    let pipeline = pipeline(engine.clone(), fetcher, model, config(Duration::from_secs(5), 4));

    let request = SearchRequest::new("CRM software", "reddit", 7);
    let report = pipeline.discover_report(&request).await;

    assert_eq!(report.searched, 2);
    assert_eq!(report.candidates.len(), 1);
    let lead = &report.candidates[0];
    assert!((lead.confidence_score - 0.67).abs() < 1e-9, "got {}", lead.confidence_score);
    assert_eq!(lead.company_name, "Reddit user in r/sales");
    assert_eq!(lead.industry.as_deref(), Some("sales"));
    assert_eq!(lead.source, "Reddit");
    assert_eq!(lead.source_link, GOOD);
    assert_eq!(lead.channel_key, 7);
    assert!(lead.contact_info.is_none());

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].url, BROKEN);
    assert!(report.skipped[0].reason.contains("404"));

    let queries = engine.queries.lock().unwrap();
    assert!(queries[0].starts_with("site:reddit.com ("));
    assert!(queries[0].ends_with(" CRM software posts"));
}

#[tokio::test]
async fn analysis_failure_keeps_candidate_with_zero_score() {
    let engine = Arc::new(FakeEngine::new(&[GOOD]));
    let fetcher = Arc::new(FakeFetcher::default().with_page(GOOD, &page("hello")));
    let model = FakeModel {
        replies: vec![("hello", "Sorry, I can't rate this post.")],
    };
    let pipeline = pipeline(engine, fetcher, model, config(Duration::from_secs(5), 2));

    let results = pipeline
        .discover(&SearchRequest::new("CRM", "Reddit", 1))
        .await;
    assert_eq!(results.len(), 1);
    assert!(results[0].confidence_score.abs() < f64::EPSILON);
}

#[tokio::test]
async fn results_are_ranked_with_ties_in_discovery_order() {
    let a = "https://example.com/a";
    let b = "https://example.com/b";
    let c = "https://example.com/c";
    let engine = Arc::new(FakeEngine::new(&[a, b, c]));
    let fetcher = Arc::new(
        FakeFetcher::default()
            .with_page(a, &page("alpha"))
            .with_page(b, &page("bravo"))
            .with_page(c, &page("charlie")),
    );
    let model = FakeModel {
        replies: vec![
            ("alpha", r#"{"intent_score": 0.2}"#),
            ("bravo", r#"{"intent_score": 1.0}"#),
            ("charlie", r#"{"intent_score": 0.2}"#),
        ],
    };
    let pipeline = pipeline(engine, fetcher, model, config(Duration::from_secs(5), 3));

    let results = pipeline
        .discover(&SearchRequest::new("CRM", "blog", 3))
        .await;
    let links: Vec<&str> = results.iter().map(|r| r.source_link.as_str()).collect();
    assert_eq!(links, [b, a, c]);
    assert_eq!(results[0].source, "Blog");
    assert_eq!(results[0].company_name, "Unknown Source");
}

#[tokio::test(start_paused = true)]
async fn slow_candidate_times_out_without_failing_the_batch() {
    let engine = Arc::new(FakeEngine::new(&[BROKEN, GOOD]));
    let mut fetcher = FakeFetcher::default()
        .with_page(GOOD, &page("fast page"))
        .with_page(BROKEN, &page("slow page"));
    fetcher.slow.push(BROKEN.to_string());
    let model = FakeModel {
        replies: vec![
            ("fast page", r#"{"intent_score": 1.0}"#),
            ("slow page", r#"{"intent_score": 1.0}"#),
        ],
    };
    let pipeline = pipeline(
        engine,
        Arc::new(fetcher),
        model,
        config(Duration::from_secs(2), 2),
    );

    let report = pipeline
        .discover_report(&SearchRequest::new("CRM", "reddit", 1))
        .await;
    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.candidates[0].source_link, GOOD);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("timed out"));
}

#[tokio::test(start_paused = true)]
async fn dropping_discovery_stops_in_flight_candidates() {
    let slow: Vec<String> = (0..3).map(|i| format!("https://example.com/slow/{i}")).collect();
    let slow_refs: Vec<&str> = slow.iter().map(String::as_str).collect();
    let engine = Arc::new(FakeEngine::new(&slow_refs));
    let mut fetcher = slow
        .iter()
        .fold(FakeFetcher::default(), |f, l| f.with_page(l, &page("slow")));
    fetcher.slow.clone_from(&slow);
    let fetcher = Arc::new(fetcher);
    let pipeline = pipeline(
        engine,
        fetcher.clone(),
        FakeModel { replies: vec![] },
        config(Duration::from_secs(7200), 3),
    );

    let request = SearchRequest::new("CRM", "other", 1);
    let outcome =
        tokio::time::timeout(Duration::from_secs(1), pipeline.discover_report(&request)).await;

    assert!(outcome.is_err(), "discovery should still be waiting on slow pages");
    assert_eq!(fetcher.peak.load(Ordering::SeqCst), 3);
    assert_eq!(fetcher.in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn concurrency_is_bounded_by_width() {
    let links: Vec<String> = (0..8).map(|i| format!("https://example.com/{i}")).collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
    let engine = Arc::new(FakeEngine::new(&link_refs));
    let fetcher = Arc::new(
        links
            .iter()
            .fold(FakeFetcher::default(), |f, l| f.with_page(l, &page("x"))),
    );
    let model = FakeModel { replies: vec![] };
    let pipeline = pipeline(
        engine,
        fetcher.clone(),
        model,
        config(Duration::from_secs(5), 3),
    );

    let results = pipeline
        .discover(&SearchRequest::new("CRM", "other", 1))
        .await;
    assert_eq!(results.len(), 8);
    let peak = fetcher.peak.load(Ordering::SeqCst);
    assert!(peak <= 3, "peak concurrency {peak} exceeded width");
    assert!(peak >= 2, "candidates should overlap, peak was {peak}");
}

#[tokio::test]
async fn search_failure_yields_empty_result() {
    let pipeline = pipeline(
        Arc::new(FailingEngine),
        Arc::new(FakeFetcher::default()),
        FakeModel { replies: vec![] },
        config(Duration::from_secs(5), 2),
    );
    let report = pipeline
        .discover_report(&SearchRequest::new("CRM", "linkedin", 1))
        .await;
    assert!(report.candidates.is_empty());
    assert!(report.skipped.is_empty());
    assert_eq!(report.searched, 0);
}

#[tokio::test]
async fn pipeline_without_search_provider_is_empty() {
    let pipeline = DiscoveryPipeline::new(
        None,
        ContentExtractor::new(Arc::new(FakeFetcher::default())),
        LeadAnalyzer::disabled(),
        DiscoveryConfig::default(),
    );
    assert!(!pipeline.is_live());
    assert!(pipeline
        .discover(&SearchRequest::new("CRM", "reddit", 1))
        .await
        .is_empty());
}
