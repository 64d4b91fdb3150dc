//! Analyze command handler.
//!
//! Runs the harvest → parse → aggregate pipeline and prints the persisted
//! analysis record as JSON. A failed or unavailable live run degrades to
//! the synthetic fallback generator rather than aborting.

use std::fs;

use brandlens_core::{AnalysisRecord, AppConfig, BatchInput};
use brandlens_harvest::{run_batch, synthesize_batch, HarvestTiming, RunSink};
use brandlens_webdriver::WebDriverClient;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Sink that mirrors orchestrator events to stderr so batch progress is
/// visible during a multi-minute live run.
struct StderrSink;

impl RunSink for StderrSink {
    fn progress(&self, fraction: f64) {
        eprintln!("progress: {:.0}%", fraction * 100.0);
    }

    fn log(&self, line: &str) {
        eprintln!("{line}");
    }
}

/// Assemble the validated batch input from CLI arguments.
///
/// The brand defaults to a title-cased guess from the domain; prompts come
/// from `prompts_file` (one per line) or from the template generator.
pub(crate) fn build_input(
    url: &str,
    brand_override: Option<&str>,
    prompts_file: Option<&str>,
    count: usize,
    competitors: Vec<String>,
    topics: Vec<String>,
) -> anyhow::Result<BatchInput> {
    let domain = brandlens_core::prompts::extract_domain(url);
    if domain.is_empty() {
        anyhow::bail!("could not derive a domain from '{url}'");
    }
    let brand = match brand_override {
        Some(name) => name.to_string(),
        None => brandlens_core::prompts::brand_from_domain(&domain),
    };

    let prompts = match prompts_file {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("failed to read prompts file '{path}': {e}"))?;
            raw.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(ToOwned::to_owned)
                .collect()
        }
        None => brandlens_core::prompts::template_prompts(&brand, &topics, &competitors, count),
    };

    let mut input = BatchInput::new(&brand, &domain, prompts, competitors)?;
    input.topics = topics;
    Ok(input)
}

/// Run the full pipeline and emit the analysis record.
///
/// # Errors
///
/// Returns an error if the WebDriver client cannot be constructed or the
/// output cannot be serialized or written. Per-prompt harvest failures are
/// recorded in the batch, not propagated.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    url: &str,
    input: BatchInput,
    out: Option<&str>,
) -> anyhow::Result<()> {
    let sink = StderrSink;
    let mut rng = StdRng::from_os_rng();

    // Advisory only; not wired into request geo-targeting.
    tracing::info!(country = %config.country, brand = %input.brand, "starting analysis");

    let mut records = if config.live {
        let client = WebDriverClient::new(&config.webdriver_url)
            .map_err(|e| anyhow::anyhow!("failed to build WebDriver client: {e}"))?;
        let timing = HarvestTiming::from_config(config);
        run_batch(&client, &input, &timing, &sink, &mut rng).await
    } else {
        tracing::info!("live automation disabled, generating synthetic batch");
        Vec::new()
    };

    let usable = records.iter().filter(|r| r.is_usable()).count();
    if records.is_empty() || usable == 0 {
        if config.live {
            eprintln!("no usable live records, degrading to synthetic data");
        }
        records = synthesize_batch(&input, &mut rng);
    }

    let facts = brandlens_analysis::parse_batch(&input, records);
    let metrics = brandlens_analysis::aggregate(facts);

    eprintln!(
        "score {:.1} ({} live / {} login-walled / {} synthetic of {} records)",
        metrics.scores.composite,
        metrics.counts.live,
        metrics.counts.login_required,
        metrics.counts.synthetic,
        metrics.counts.total,
    );

    let record = AnalysisRecord::new(url, input, metrics);
    let json = serde_json::to_string_pretty(&record)?;
    match out {
        Some(path) => {
            fs::write(path, &json)
                .map_err(|e| anyhow::anyhow!("failed to write '{path}': {e}"))?;
            eprintln!("wrote {path}");
        }
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_derives_brand_and_domain_from_url() {
        let input = build_input("https://www.acme-corp.io/about", None, None, 5, vec![], vec![])
            .unwrap();
        assert_eq!(input.domain, "acme-corp.io");
        assert_eq!(input.brand, "Acme Corp");
        assert_eq!(input.prompts.len(), 5);
    }

    #[test]
    fn brand_override_wins_over_derivation() {
        let input =
            build_input("https://acme.io", Some("Acme Inc"), None, 3, vec![], vec![]).unwrap();
        assert_eq!(input.brand, "Acme Inc");
    }

    #[test]
    fn bare_url_without_host_is_rejected() {
        assert!(build_input("https:///nope", None, None, 3, vec![], vec![]).is_err());
    }

    #[test]
    fn topics_are_carried_into_the_input() {
        let input = build_input(
            "https://acme.io",
            None,
            None,
            3,
            vec!["Zeta".to_owned()],
            vec!["crm".to_owned()],
        )
        .unwrap();
        assert_eq!(input.topics, vec!["crm"]);
        assert!(input.prompts.iter().any(|p| p.contains("crm")));
    }
}
