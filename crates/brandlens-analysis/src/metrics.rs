//! Batch aggregation and the composite visibility score.
//!
//! Pure and deterministic given its input: the same fact list always
//! produces bit-identical metrics.

use brandlens_core::{
    AnswerError, BatchMetrics, CompetitorCount, DomainCount, ParsedFact, RecordCounts,
    ScoreBreakdown, Sentiment, Surface, SurfaceMetrics,
};
use tracing::info;

const MAX_TOP_DOMAINS: usize = 20;
const MAX_TOP_COMPETITORS: usize = 10;

/// Neutral prior for mean rank when nothing is mentioned. Explicitly not
/// zero so total absence is never rewarded with a perfect rank term.
const DEFAULT_MEAN_RANK: f64 = 5.0;
const DEFAULT_SENTIMENT: f64 = 0.5;

/// Fixed composite weights. Policy constants, preserved for compatibility
/// of scores across runs.
const W_VISIBILITY: f64 = 0.40;
const W_RANK: f64 = 0.20;
const W_SENTIMENT: f64 = 0.20;
const W_OWN_CITATION: f64 = 0.20;

/// Aggregate a full batch of parsed facts into the persisted metrics
/// object. `facts` order is preserved into `results`.
#[must_use]
pub fn aggregate(facts: Vec<ParsedFact>) -> BatchMetrics {
    let scores = score_breakdown(&facts);

    let surfaces = Surface::ALL
        .iter()
        .filter_map(|&surface| {
            let subset: Vec<&ParsedFact> = facts
                .iter()
                .filter(|f| f.record.surface == surface)
                .collect();
            if subset.is_empty() {
                return None;
            }
            let mentioned = subset.iter().filter(|f| f.mentioned).count();
            Some(SurfaceMetrics {
                surface,
                total: subset.len(),
                mentioned,
                scores: score_breakdown_over(&subset),
            })
        })
        .collect();

    let top_domains = top_domains(&facts);
    let top_competitors = top_competitors(&facts);
    let counts = record_counts(&facts);

    info!(
        total = counts.total,
        live = counts.live,
        synthetic = counts.synthetic,
        composite = scores.composite,
        "aggregated batch metrics"
    );

    BatchMetrics {
        scores,
        surfaces,
        top_domains,
        top_competitors,
        counts,
        results: facts,
    }
}

fn score_breakdown(facts: &[ParsedFact]) -> ScoreBreakdown {
    let refs: Vec<&ParsedFact> = facts.iter().collect();
    score_breakdown_over(&refs)
}

#[allow(clippy::cast_precision_loss)]
fn score_breakdown_over(facts: &[&ParsedFact]) -> ScoreBreakdown {
    let total = facts.len();
    let mentioned: Vec<&&ParsedFact> = facts.iter().filter(|f| f.mentioned).collect();

    let visibility_pct = percentage(mentioned.len(), total);

    let ranked: Vec<u32> = mentioned
        .iter()
        .map(|f| f.first_rank)
        .filter(|&r| r > 0)
        .collect();
    let mean_rank = if ranked.is_empty() {
        DEFAULT_MEAN_RANK
    } else {
        f64::from(ranked.iter().sum::<u32>()) / ranked.len() as f64
    };

    let sentiment_score = if mentioned.is_empty() {
        DEFAULT_SENTIMENT
    } else {
        let positives = mentioned
            .iter()
            .filter(|f| f.sentiment == Sentiment::Positive)
            .count();
        let neutrals = mentioned
            .iter()
            .filter(|f| f.sentiment == Sentiment::Neutral)
            .count();
        (positives as f64 + 0.5 * neutrals as f64) / mentioned.len() as f64
    };

    let own_cited = facts.iter().filter(|f| f.own_domain_cited).count();
    let own_citation_pct = percentage(own_cited, total);

    let citing = facts.iter().filter(|f| !f.cited_domains.is_empty()).count();
    let citation_rate_pct = percentage(citing, total);

    let composite = (W_VISIBILITY * visibility_pct
        + W_RANK * (100.0 - mean_rank * 5.0).max(0.0)
        + W_SENTIMENT * sentiment_score * 100.0
        + W_OWN_CITATION * own_citation_pct)
        .clamp(0.0, 100.0);

    ScoreBreakdown {
        visibility_pct,
        mean_rank,
        sentiment_score,
        own_citation_pct,
        citation_rate_pct,
        composite,
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Frequency count of cited domains, descending, first-seen order as the
/// tie-breaker, capped at 20.
fn top_domains(facts: &[ParsedFact]) -> Vec<DomainCount> {
    let mut counts: Vec<DomainCount> = Vec::new();
    for fact in facts {
        for cited in &fact.cited_domains {
            if let Some(entry) = counts.iter_mut().find(|c| c.domain == cited.domain) {
                entry.count += 1;
            } else {
                counts.push(DomainCount {
                    domain: cited.domain.clone(),
                    category: cited.category.clone(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(MAX_TOP_DOMAINS);
    counts
}

/// Frequency count of competitor mentions, descending, capped at 10. The
/// parser already excluded the brand itself.
fn top_competitors(facts: &[ParsedFact]) -> Vec<CompetitorCount> {
    let mut counts: Vec<CompetitorCount> = Vec::new();
    for fact in facts {
        for name in &fact.competitor_mentions {
            if let Some(entry) = counts.iter_mut().find(|c| &c.name == name) {
                entry.count += 1;
            } else {
                counts.push(CompetitorCount {
                    name: name.clone(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(MAX_TOP_COMPETITORS);
    counts
}

fn record_counts(facts: &[ParsedFact]) -> RecordCounts {
    RecordCounts {
        total: facts.len(),
        live: facts.iter().filter(|f| f.record.is_usable()).count(),
        login_required: facts
            .iter()
            .filter(|f| f.record.error == Some(AnswerError::LoginRequired))
            .count(),
        errors: facts
            .iter()
            .filter(|f| {
                f.record
                    .error
                    .is_some_and(|e| e != AnswerError::LoginRequired)
            })
            .count(),
        synthetic: facts.iter().filter(|f| f.record.synthetic).count(),
    }
}
