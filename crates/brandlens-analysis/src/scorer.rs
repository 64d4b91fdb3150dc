//! Lexicon polarity scorer for product-review language.

/// Word weights for the vocabulary assistants use when recommending or
/// criticizing tools.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to
/// `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("best", 0.5),
    ("love", 0.5),
    ("loved", 0.5),
    ("praised", 0.5),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("intuitive", 0.4),
    ("powerful", 0.4),
    ("robust", 0.3),
    ("reliable", 0.4),
    ("seamless", 0.4),
    ("easy", 0.3),
    ("responsive", 0.3),
    ("popular", 0.2),
    ("fast", 0.3),
    ("affordable", 0.3),
    ("quality", 0.3),
    ("favorite", 0.4),
    ("leader", 0.3),
    // Negative signals
    ("bad", -0.4),
    ("terrible", -0.6),
    ("worst", -0.6),
    ("poor", -0.4),
    ("buggy", -0.5),
    ("slow", -0.3),
    ("expensive", -0.3),
    ("overpriced", -0.4),
    ("clunky", -0.4),
    ("frustrating", -0.5),
    ("unreliable", -0.5),
    ("limited", -0.3),
    ("limitations", -0.4),
    ("mixed", -0.3),
    ("complaint", -0.4),
    ("complaints", -0.4),
    ("lacking", -0.4),
    ("difficult", -0.3),
    ("problem", -0.3),
    ("problems", -0.3),
    ("issue", -0.3),
    ("issues", -0.3),
    ("disappointing", -0.5),
    ("confusing", -0.4),
    ("outdated", -0.4),
];

/// Score a text string using the review lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}
