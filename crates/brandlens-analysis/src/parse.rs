//! Lexical answer parsing. Pure and infallible: every raw record becomes a
//! fact, errors and empty responses included.

use brandlens_core::{AnswerRecord, BatchInput, CitedDomain, ParsedFact};
use tracing::debug;

use crate::brands::KNOWN_BRANDS;
use crate::domains::{categorize_domain, extract_cited_domains};
use crate::sentiment::{score_brand_sentences, LexiconModel, SentimentModel};

const MAX_COMPETITOR_MENTIONS: usize = 8;

/// Parse one answer record with the built-in lexicon sentiment backend.
pub fn parse_answer(input: &BatchInput, record: AnswerRecord) -> ParsedFact {
    parse_answer_with(&LexiconModel, input, record)
}

/// Parse one answer record with an injected sentiment backend.
pub fn parse_answer_with(
    model: &dyn SentimentModel,
    input: &BatchInput,
    record: AnswerRecord,
) -> ParsedFact {
    let text_lower = record.response.to_lowercase();
    let brand_lower = input.brand.to_lowercase();
    let domain_lower = input.domain.to_lowercase();

    let brand_pos = first_position(&text_lower, &[&brand_lower, &domain_lower]);
    let mentioned = brand_pos.is_some();

    // Every rival name with its first position in the text, first-seen order.
    let mut rivals: Vec<(&str, usize)> = Vec::new();
    for name in candidate_names(input) {
        if let Some(pos) = text_lower.find(&name.to_lowercase()) {
            rivals.push((name, pos));
        }
    }
    rivals.sort_by_key(|&(_, pos)| pos);

    let first_rank = match brand_pos {
        Some(pos) => {
            let earlier = rivals.iter().filter(|&&(_, p)| p < pos).count();
            u32::try_from(earlier + 1).unwrap_or(u32::MAX)
        }
        None => 0,
    };

    let competitor_mentions: Vec<String> = rivals
        .iter()
        .take(MAX_COMPETITOR_MENTIONS)
        .map(|&(name, _)| name.to_owned())
        .collect();

    let cited_domains: Vec<CitedDomain> = extract_cited_domains(&record.response, &record.sources)
        .into_iter()
        .map(|domain| {
            let category = categorize_domain(&domain).to_owned();
            CitedDomain { domain, category }
        })
        .collect();
    let own_domain_cited = cited_domains.iter().any(|c| c.domain == input.domain);

    let (sentiment, sentiment_score) =
        score_brand_sentences(model, &record.response, &input.brand, &input.domain);

    debug!(
        surface = %record.surface,
        mentioned,
        first_rank,
        cited = cited_domains.len(),
        "parsed answer"
    );

    ParsedFact {
        record,
        mentioned,
        first_rank,
        sentiment,
        sentiment_score,
        cited_domains,
        competitor_mentions,
        own_domain_cited,
    }
}

/// Parse a whole batch, preserving record order.
pub fn parse_batch(input: &BatchInput, records: Vec<AnswerRecord>) -> Vec<ParsedFact> {
    records
        .into_iter()
        .map(|record| parse_answer(input, record))
        .collect()
}

/// Earliest position of any needle in the haystack.
fn first_position(haystack: &str, needles: &[&str]) -> Option<usize> {
    needles
        .iter()
        .filter(|n| !n.is_empty())
        .filter_map(|n| haystack.find(*n))
        .min()
}

/// Batch competitors plus the supplementary pool, minus the brand itself,
/// de-duplicated case-insensitively with batch names taking precedence.
fn candidate_names(input: &BatchInput) -> Vec<&str> {
    let brand_lower = input.brand.to_lowercase();
    let mut seen: Vec<String> = Vec::new();
    let mut names = Vec::new();
    for name in input
        .competitors
        .iter()
        .map(String::as_str)
        .chain(KNOWN_BRANDS.iter().copied())
    {
        let lower = name.to_lowercase();
        if lower != brand_lower && !seen.contains(&lower) {
            seen.push(lower);
            names.push(name);
        }
    }
    names
}
