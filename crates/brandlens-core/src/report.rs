//! Aggregated metrics and the persisted analysis record shape.
//!
//! `BatchMetrics` is the only object handed to external consumers
//! (dashboard, persistence). Everything here must stay fully
//! JSON-serializable with no cyclic references.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::types::{BatchInput, ParsedFact, Surface};

/// The score fields shared by the overall batch and each per-surface
/// breakdown. All percentages are in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub visibility_pct: f64,
    /// Mean first rank over mentioned records; 5.0 neutral prior when none.
    pub mean_rank: f64,
    /// (positives + 0.5 × neutrals) / mentioned, in [0, 1]; 0.5 when none.
    pub sentiment_score: f64,
    pub own_citation_pct: f64,
    /// Share of records citing at least one source.
    pub citation_rate_pct: f64,
    /// 0.40·visibility + 0.20·max(0, 100 − meanRank·5)
    /// + 0.20·sentiment·100 + 0.20·ownCitation, clamped to [0, 100].
    pub composite: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMetrics {
    pub surface: Surface,
    pub total: usize,
    pub mentioned: usize,
    #[serde(flatten)]
    pub scores: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCount {
    pub domain: String,
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorCount {
    pub name: String,
    pub count: usize,
}

/// How much of the score rests on live data versus login walls, errors,
/// and synthetic fallback records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCounts {
    pub total: usize,
    pub live: usize,
    pub login_required: usize,
    pub errors: usize,
    pub synthetic: usize,
}

/// Metrics for one full batch run. Immutable; built once from the complete
/// fact list. `results` preserves strict (surface, prompt-index) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMetrics {
    #[serde(flatten)]
    pub scores: ScoreBreakdown,
    pub surfaces: Vec<SurfaceMetrics>,
    /// Top cited hostnames across all facts, descending, capped at 20.
    pub top_domains: Vec<DomainCount>,
    /// Top competitor mentions, descending, brand excluded, capped at 10.
    pub top_competitors: Vec<CompetitorCount>,
    pub counts: RecordCounts,
    pub results: Vec<ParsedFact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisData {
    pub metrics: BatchMetrics,
    pub intel: BatchInput,
}

/// The record shape an external persistence layer stores under an opaque
/// incrementing id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// ISO-8601 timestamp of the run.
    pub timestamp: String,
    pub url: String,
    pub brand: String,
    pub score: f64,
    pub data: AnalysisData,
}

impl AnalysisRecord {
    #[must_use]
    pub fn new(url: &str, input: BatchInput, metrics: BatchMetrics) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            url: url.to_string(),
            brand: input.brand.clone(),
            score: metrics.scores.composite,
            data: AnalysisData {
                metrics,
                intel: input,
            },
        }
    }
}
