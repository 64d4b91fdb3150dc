//! Response analysis: turns raw answer records into structured facts and
//! aggregates them into a single explainable visibility score.
//!
//! Everything here is pure and deterministic — no I/O, no clock, no
//! randomness — so re-running the analysis over the same records yields
//! bit-identical metrics.

pub mod brands;
pub mod domains;
pub mod metrics;
pub mod parse;
pub mod scorer;
pub mod sentiment;

pub use domains::{categorize_domain, extract_cited_domains};
pub use metrics::aggregate;
pub use parse::{parse_answer, parse_answer_with, parse_batch};
pub use scorer::lexicon_score;
pub use sentiment::{LexiconModel, SentimentModel};
