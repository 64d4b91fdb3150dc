//! Template prompt generation and brand/domain derivation helpers.
//!
//! The site-intelligence step that crawls a brand's website and produces
//! richer context is an external collaborator; these templates are the
//! built-in generator that makes the CLI usable without it.

/// Extract the bare domain from a URL or hostname: lowercase, no scheme,
/// no path, no port, no leading `www.`.
#[must_use]
pub fn extract_domain(url: &str) -> String {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    let host_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let host = &rest[..host_end];
    let host = host.split('@').next_back().unwrap_or(host);
    let host = host.split(':').next().unwrap_or(host);
    let host = host.to_lowercase();
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

/// Guess a display brand name from a domain: first label, separators to
/// spaces, title case.
#[must_use]
pub fn brand_from_domain(domain: &str) -> String {
    let label = domain.split('.').next().unwrap_or(domain);
    label
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate up to `n` high-intent conversational prompts from templates.
///
/// Mirrors the question shapes real users type into assistants: reviews,
/// comparisons, "best X for Y", alternatives, pricing.
#[must_use]
pub fn template_prompts(
    brand: &str,
    topics: &[String],
    competitors: &[String],
    n: usize,
) -> Vec<String> {
    let competitor = competitors.first().map_or("alternatives", String::as_str);
    let category = topics
        .first()
        .map_or_else(|| "software".to_string(), |t| t.to_lowercase());
    let use_case = topics
        .get(1)
        .map_or_else(|| "businesses".to_string(), |t| t.to_lowercase());

    let templates = [
        format!("best {category} tools for {use_case} in 2025"),
        format!("is {brand} worth it for {use_case}"),
        format!("{brand} review 2025"),
        format!("alternatives to {brand}"),
        format!("should I use {brand} for {use_case}"),
        format!("{brand} vs {competitor}"),
        format!("top {category} platforms for small businesses 2025"),
        format!("how does {brand} compare to competitors"),
        format!("best {category} software recommendations 2025"),
        format!("{brand} pricing and features breakdown"),
        format!("what companies use {brand}"),
        format!("is {brand} the best {category} solution"),
        format!("{brand} pros and cons"),
        format!("which is better {brand} or {competitor}"),
        format!("best {category} for startups 2025"),
        format!("{brand} integrations and use cases"),
        format!("how to choose between {brand} and {competitor}"),
        format!("top rated {category} tools experts recommend 2025"),
        format!("{brand} customer reviews and ratings"),
        format!("enterprise {category} solutions compared 2025"),
    ];
    templates.into_iter().take(n).collect()
}
