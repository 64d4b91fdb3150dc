use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("brand name must not be empty")]
    EmptyBrand,

    #[error("domain must not be empty")]
    EmptyDomain,

    #[error("prompt list must not be empty")]
    NoPrompts,
}

/// One externally hosted conversational AI web interface queried by the
/// system. The markup of these surfaces is an unversioned external contract;
/// everything selector-shaped lives in `brandlens-harvest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    #[serde(rename = "ChatGPT")]
    ChatGpt,
    Gemini,
    Claude,
}

impl Surface {
    /// Fixed query order for a batch run.
    pub const ALL: [Surface; 3] = [Surface::ChatGpt, Surface::Gemini, Surface::Claude];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Surface::ChatGpt => "ChatGPT",
            Surface::Gemini => "Gemini",
            Surface::Claude => "Claude",
        }
    }

    /// Canonical entry URL opened before each prompt.
    #[must_use]
    pub fn entry_url(self) -> &'static str {
        match self {
            Surface::ChatGpt => "https://chatgpt.com/",
            Surface::Gemini => "https://gemini.google.com/app",
            Surface::Claude => "https://claude.ai/new",
        }
    }

    /// Domain suffixes considered "self" links when harvesting sources.
    #[must_use]
    pub fn home_domains(self) -> &'static [&'static str] {
        match self {
            Surface::ChatGpt => &["chatgpt.com", "openai.com"],
            Surface::Gemini => &["google.com", "gstatic.com"],
            Surface::Claude => &["claude.ai", "anthropic.com"],
        }
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed error taxonomy for a single (surface, prompt) interaction.
///
/// None of these abort a batch; they are recorded per-record so the scoring
/// layer can report how much of the score rests on live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerError {
    /// The surface redirected to an authentication flow. Expected, not fatal.
    LoginRequired,
    /// No input-selector candidate matched — markup drift.
    InputNotFound,
    /// Navigation or element wait exceeded its bound.
    Timeout,
    /// Session-level failure (browser would not start, protocol error).
    DriverError,
}

impl AnswerError {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerError::LoginRequired => "login_required",
            AnswerError::InputNotFound => "input_not_found",
            AnswerError::Timeout => "timeout",
            AnswerError::DriverError => "driver_error",
        }
    }
}

/// Raw captured answer for one (surface, prompt) pair.
///
/// Produced by an interaction driver or the synthetic fallback generator,
/// immutable once created, consumed exactly once by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub surface: Surface,
    pub prompt: String,
    /// Rendered answer text as a user would see it. May be empty on error.
    pub response: String,
    /// Outbound URLs observed near the answer, capped at 15 by the driver.
    pub sources: Vec<String>,
    pub error: Option<AnswerError>,
    /// True when produced by the fallback generator rather than a browser.
    pub synthetic: bool,
}

impl AnswerRecord {
    /// A failed interaction: sentinel message in the response field, error
    /// code set, no sources.
    #[must_use]
    pub fn failed(surface: Surface, prompt: &str, error: AnswerError, message: &str) -> Self {
        Self {
            surface,
            prompt: prompt.to_string(),
            response: message.to_string(),
            sources: Vec::new(),
            error: Some(error),
            synthetic: false,
        }
    }

    /// A record is usable when it carries live, non-errored, non-empty text.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.error.is_none() && !self.synthetic && !self.response.trim().is_empty()
    }
}

/// Immutable input contract for one run, supplied by the caller (the site
/// intelligence step is an external collaborator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInput {
    pub brand: String,
    /// Canonical domain: lowercase, no scheme, no leading `www.`.
    pub domain: String,
    pub prompts: Vec<String>,
    pub competitors: Vec<String>,
    /// Advisory category topics carried through to the persisted blob.
    #[serde(default)]
    pub topics: Vec<String>,
}

impl BatchInput {
    /// Build a validated input. The domain is normalized (lowercased,
    /// leading `www.` stripped); prompts and brand must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] when the brand, domain, or prompt list is empty.
    pub fn new(
        brand: &str,
        domain: &str,
        prompts: Vec<String>,
        competitors: Vec<String>,
    ) -> Result<Self, CoreError> {
        let brand = brand.trim();
        if brand.is_empty() {
            return Err(CoreError::EmptyBrand);
        }
        let domain = domain.trim().to_lowercase();
        let domain = domain.strip_prefix("www.").unwrap_or(&domain).to_string();
        if domain.is_empty() {
            return Err(CoreError::EmptyDomain);
        }
        if prompts.is_empty() {
            return Err(CoreError::NoPrompts);
        }
        Ok(Self {
            brand: brand.to_string(),
            domain,
            prompts,
            competitors,
            topics: Vec::new(),
        })
    }
}

/// Lexical sentiment class for the brand-bearing sentences of one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// One cited hostname with its source category (`Review/UGC`, `Editorial`,
/// `Social`, `Corporate`, `Wikipedia`, or `Other`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitedDomain {
    pub domain: String,
    pub category: String,
}

/// Structured facts extracted from one [`AnswerRecord`].
///
/// Invariant: `first_rank > 0` implies `mentioned`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedFact {
    #[serde(flatten)]
    pub record: AnswerRecord,
    /// Brand name or canonical domain found (case-insensitive) in the text.
    pub mentioned: bool,
    /// 1-based rank of the brand's first mention relative to other known
    /// brand names appearing earlier; 0 when not mentioned.
    pub first_rank: u32,
    pub sentiment: Sentiment,
    /// Mean lexicon polarity over brand-bearing sentences, in [-1, 1].
    /// Defaults to 0.5 (neutral prior) when no such sentence exists.
    pub sentiment_score: f32,
    /// Distinct cited hostnames in first-seen order.
    pub cited_domains: Vec<CitedDomain>,
    /// Competitor names found in the text, first-seen order, capped at 8.
    pub competitor_mentions: Vec<String>,
    pub own_domain_cited: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_input_normalizes_domain() {
        let input = BatchInput::new("Acme", "WWW.Acme.IO", vec!["p".into()], vec![]).unwrap();
        assert_eq!(input.domain, "acme.io");
    }

    #[test]
    fn batch_input_rejects_empty_prompts() {
        let err = BatchInput::new("Acme", "acme.io", vec![], vec![]);
        assert!(matches!(err, Err(CoreError::NoPrompts)));
    }

    #[test]
    fn batch_input_rejects_blank_brand() {
        let err = BatchInput::new("  ", "acme.io", vec!["p".into()], vec![]);
        assert!(matches!(err, Err(CoreError::EmptyBrand)));
    }

    #[test]
    fn answer_error_serializes_to_snake_case() {
        let json = serde_json::to_string(&AnswerError::LoginRequired).unwrap();
        assert_eq!(json, "\"login_required\"");
    }

    #[test]
    fn surface_serializes_to_display_label() {
        let json = serde_json::to_string(&Surface::ChatGpt).unwrap();
        assert_eq!(json, "\"ChatGPT\"");
    }

    #[test]
    fn failed_record_is_not_usable() {
        let rec = AnswerRecord::failed(
            Surface::Claude,
            "best tools",
            AnswerError::Timeout,
            "[timed out]",
        );
        assert!(!rec.is_usable());
        assert_eq!(rec.error, Some(AnswerError::Timeout));
    }
}
