//! Cited-domain extraction and source categorization.

use std::sync::OnceLock;

use brandlens_core::prompts::extract_domain;
use regex::Regex;

/// Known source domains and their editorial categories. Matching is by
/// suffix so subdomains (`old.reddit.com`) classify with their parent.
const SOURCE_CATEGORIES: &[(&str, &str)] = &[
    ("wikipedia.org", "Wikipedia"),
    ("reddit.com", "Review/UGC"),
    ("g2.com", "Review/UGC"),
    ("trustpilot.com", "Review/UGC"),
    ("capterra.com", "Review/UGC"),
    ("producthunt.com", "Review/UGC"),
    ("getapp.com", "Review/UGC"),
    ("techcrunch.com", "Editorial"),
    ("wired.com", "Editorial"),
    ("forbes.com", "Editorial"),
    ("cnet.com", "Editorial"),
    ("theverge.com", "Editorial"),
    ("medium.com", "Editorial"),
    ("venturebeat.com", "Editorial"),
    ("zdnet.com", "Editorial"),
    ("twitter.com", "Social"),
    ("x.com", "Social"),
    ("linkedin.com", "Social"),
    ("youtube.com", "Social"),
    ("github.com", "Corporate"),
    ("stackoverflow.com", "Editorial"),
    ("quora.com", "Review/UGC"),
];

/// Category for a cited domain. Longest suffix wins; unknown domains get
/// `"Other"`.
pub fn categorize_domain(domain: &str) -> &'static str {
    let domain = domain.to_lowercase();
    let mut best: Option<(&str, &str)> = None;
    for &(suffix, category) in SOURCE_CATEGORIES {
        let matches = domain == suffix || domain.ends_with(&format!(".{suffix}"));
        if matches && best.is_none_or(|(prev, _)| suffix.len() > prev.len()) {
            best = Some((suffix, category));
        }
    }
    best.map_or("Other", |(_, category)| category)
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"https?://[^\s)\]>"',]+"#).expect("valid regex")
    })
}

/// Distinct domains cited by an answer, first occurrence order preserved.
///
/// Harvested source links come first, then any URL embedded in the response
/// body itself. Duplicates collapse to the first sighting.
pub fn extract_cited_domains(text: &str, sources: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    let candidates = sources
        .iter()
        .map(String::as_str)
        .chain(url_pattern().find_iter(text).map(|m| m.as_str()));
    for url in candidates {
        let domain = extract_domain(url);
        if !domain.is_empty() && !seen.contains(&domain) {
            seen.push(domain);
        }
    }
    seen
}
