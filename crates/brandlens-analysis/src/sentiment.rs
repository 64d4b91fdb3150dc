//! Sentiment classification restricted to brand-bearing sentences.

use brandlens_core::Sentiment;

use crate::scorer::lexicon_score;

/// Classification thresholds on the mean sentence polarity.
const POSITIVE_THRESHOLD: f32 = 0.08;
const NEGATIVE_THRESHOLD: f32 = -0.08;

/// Neutral prior used when no brand-bearing sentence exists.
const NEUTRAL_SCORE: f32 = 0.5;

/// Injectable sentiment backend. The lexicon scorer is the built-in
/// implementation; a smarter model can be swapped in at startup without
/// touching the parser.
pub trait SentimentModel: Send + Sync {
    /// Polarity of one sentence, in `[-1.0, 1.0]`.
    fn polarity(&self, sentence: &str) -> f32;
}

/// The built-in lexicon backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconModel;

impl SentimentModel for LexiconModel {
    fn polarity(&self, sentence: &str) -> f32 {
        lexicon_score(sentence)
    }
}

/// Split text into rough sentences on terminal punctuation.
pub(crate) fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Classify sentiment over only the sentences that mention the brand (by
/// name or canonical domain, case-insensitive).
///
/// Returns the class plus the mean polarity. When no sentence mentions the
/// brand, returns neutral with the 0.5 prior — an explicitly non-zero
/// default so absence of evidence is not scored as criticism.
pub(crate) fn score_brand_sentences(
    model: &dyn SentimentModel,
    text: &str,
    brand: &str,
    domain: &str,
) -> (Sentiment, f32) {
    let brand_lower = brand.to_lowercase();
    let domain_lower = domain.to_lowercase();

    let polarities: Vec<f32> = split_sentences(text)
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            lower.contains(&brand_lower) || lower.contains(&domain_lower)
        })
        .map(|sentence| model.polarity(sentence))
        .collect();

    if polarities.is_empty() {
        return (Sentiment::Neutral, NEUTRAL_SCORE);
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = polarities.iter().sum::<f32>() / polarities.len() as f32;
    let class = if mean > POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if mean < NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };
    (class, mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_brand_sentence_defaults_to_neutral_prior() {
        let (class, score) =
            score_brand_sentences(&LexiconModel, "Zeta is excellent.", "Acme", "acme.io");
        assert_eq!(class, Sentiment::Neutral);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn positive_brand_sentence_classifies_positive() {
        let text = "Zeta is terrible. Acme is excellent and easy to recommend.";
        let (class, score) = score_brand_sentences(&LexiconModel, text, "Acme", "acme.io");
        assert_eq!(class, Sentiment::Positive);
        assert!(score > 0.08);
    }

    #[test]
    fn negative_brand_sentence_classifies_negative() {
        let text = "Acme is buggy and unreliable. Zeta is excellent.";
        let (class, score) = score_brand_sentences(&LexiconModel, text, "Acme", "acme.io");
        assert_eq!(class, Sentiment::Negative);
        assert!(score < -0.08);
    }

    #[test]
    fn surrounding_sentences_do_not_leak_into_the_score() {
        // Heavy negativity outside the brand sentence must not count.
        let text = "Everything else is terrible, worst, buggy. Acme exists.";
        let (class, _) = score_brand_sentences(&LexiconModel, text, "Acme", "acme.io");
        assert_eq!(class, Sentiment::Neutral);
    }

    #[test]
    fn domain_mention_counts_as_a_brand_sentence() {
        let text = "See acme.io for details, it is excellent.";
        let (class, _) = score_brand_sentences(&LexiconModel, text, "Acme", "acme.io");
        assert_eq!(class, Sentiment::Positive);
    }

    #[test]
    fn mention_matching_is_case_insensitive() {
        let text = "ACME is excellent.";
        let (class, _) = score_brand_sentences(&LexiconModel, text, "Acme", "acme.io");
        assert_eq!(class, Sentiment::Positive);
    }
}
