//! Command handlers for `discover` and `mock`.

use leadscout_core::{AppConfig, ScoredCandidate, SearchRequest};
use leadscout_discovery::{generate_mock, generate_mock_seeded, DiscoveryPipeline};

use crate::output;

/// Run live discovery and print the ranked candidates.
///
/// With `mock_fallback`, an empty live result is replaced by the synthetic
/// set so demos always have something to show. The two are never mixed.
///
/// # Errors
///
/// Returns an error if the pipeline cannot be built or output fails to
/// serialize. Search, fetch and analysis failures are logged, not returned.
pub(crate) async fn run_discover(
    config: &AppConfig,
    request: &SearchRequest,
    mock_fallback: bool,
    json: bool,
) -> anyhow::Result<()> {
    let pipeline = DiscoveryPipeline::from_app_config(config)?;
    let report = pipeline.discover_report(request).await;

    for skipped in &report.skipped {
        tracing::debug!(url = %skipped.url, reason = %skipped.reason, "candidate skipped");
    }

    let candidates = if report.candidates.is_empty() && mock_fallback {
        tracing::info!(
            query = %request.query,
            channel = %request.channel_name,
            "no live candidates, using mock results"
        );
        generate_mock(request, &mut rand::rng())
    } else {
        report.candidates
    };

    emit(&candidates, json)
}

/// Print the synthetic candidate set.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn run_mock(request: &SearchRequest, seed: Option<u64>, json: bool) -> anyhow::Result<()> {
    let candidates = match seed {
        Some(seed) => generate_mock_seeded(request, seed),
        None => generate_mock(request, &mut rand::rng()),
    };
    emit(&candidates, json)
}

fn emit(candidates: &[ScoredCandidate], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", output::render_json(candidates)?);
    } else if candidates.is_empty() {
        println!("no leads found");
    } else {
        print!("{}", output::render_table(candidates));
    }
    Ok(())
}
