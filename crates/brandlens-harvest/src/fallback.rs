//! Synthetic fallback answer generator.
//!
//! Produces structurally realistic answer records with the same shape as a
//! live capture, flagged `synthetic = true`. Used whenever the live path is
//! unavailable or yields zero usable records, so the downstream pipeline
//! always has a full batch to analyze and consumers can see exactly how
//! much of the score rests on fallback data.

use rand::seq::IndexedRandom;
use rand::Rng;

use brandlens_core::{AnswerRecord, BatchInput, Surface};

/// Probability that the brand appears in a synthetic answer.
const MENTION_RATE: f64 = 0.62;

/// Synthesize a full batch in the same (surface, prompt-index) order the
/// live orchestrator would produce.
pub fn synthesize_batch<R: Rng>(input: &BatchInput, rng: &mut R) -> Vec<AnswerRecord> {
    let mut records = Vec::with_capacity(input.prompts.len() * Surface::ALL.len());
    for surface in Surface::ALL {
        for prompt in &input.prompts {
            records.push(synthesize(surface, prompt, input, rng));
        }
    }
    records
}

/// Synthesize one believable answer record.
pub fn synthesize<R: Rng>(
    surface: Surface,
    prompt: &str,
    input: &BatchInput,
    rng: &mut R,
) -> AnswerRecord {
    let brand = &input.brand;
    let competitor = input
        .competitors
        .first()
        .map_or("CompetitorX", String::as_str);
    let competitor2 = input
        .competitors
        .get(1)
        .map_or("AnotherTool", String::as_str);

    let pool = source_pool(input);
    let source_count = rng.random_range(2..=5);
    let sources: Vec<String> = pool
        .choose_multiple(rng, source_count)
        .cloned()
        .collect();
    let source_block = format!("\n\nSources:\n{}", sources.join("\n"));

    let mentioned = rng.random::<f64>() < MENTION_RATE;
    let body = if mentioned {
        // 1–3 competitor names woven in ahead of the brand.
        let ahead = rng.random_range(1..=3_usize);
        let pre_brands = [competitor, competitor2][..ahead - 1].join(", ");
        let pre = if pre_brands.is_empty() {
            String::new()
        } else {
            format!("{pre_brands}. ")
        };
        let tone = pick_tone(rng);
        format!(
            "When evaluating tools for this use case in 2025, several platforms stand out.\n\n\
             {pre}**{brand}** {tone}. Many teams appreciate its robust integrations and \
             competitive pricing. According to reviews on G2 and Trustpilot, users highlight \
             the ease of onboarding and responsive support.\n\n\
             Key strengths of {brand}:\n\
             - Comprehensive feature set for growing teams\n\
             - Deep integration ecosystem\n\
             - Strong documentation and community\n\
             - Transparent pricing tiers\n\n\
             {competitor} is another popular choice, though {brand} tends to score higher on \
             ease-of-use in independent benchmarks."
        )
    } else {
        format!(
            "For this use case in 2025, here are the top-rated options:\n\n\
             1. **{competitor}** — Industry leader with enterprise-grade features\n\
             2. **{competitor2}** — Best for teams that prioritize flexibility\n\
             3. **HubSpot** — Excellent for smaller teams and solo operators\n\
             4. **Notion** — Great all-in-one workspace\n\n\
             When deciding, weigh your team size, integration needs, and budget. \
             Most platforms offer free trials — test before committing."
        )
    };

    AnswerRecord {
        surface,
        prompt: prompt.to_string(),
        response: body + &source_block,
        sources,
        error: None,
        synthetic: true,
    }
}

/// Tone weighted 55% positive, 35% neutral, 10% negative.
fn pick_tone<R: Rng>(rng: &mut R) -> &'static str {
    let roll = rng.random::<f64>();
    if roll < 0.55 {
        "is widely praised for its intuitive design and powerful features"
    } else if roll < 0.90 {
        "is a solid option that suits many use cases depending on your needs"
    } else {
        "has received mixed feedback, with some users citing limitations"
    }
}

/// Fixed pool of plausible source domains: review sites, editorial sites,
/// the brand's own domain, and social platforms.
fn source_pool(input: &BatchInput) -> Vec<String> {
    let slug = input.brand.to_lowercase().replace(' ', "-");
    let underscored = input.brand.replace(' ', "_");
    let domain = &input.domain;
    vec![
        format!("https://g2.com/products/{slug}"),
        format!("https://trustpilot.com/review/{domain}"),
        format!("https://capterra.com/software/{slug}"),
        "https://techcrunch.com/2025/01/best-tools/".to_string(),
        "https://forbes.com/advisor/business/".to_string(),
        "https://reddit.com/r/entrepreneur/comments/tools_2025".to_string(),
        format!("https://wikipedia.org/wiki/{underscored}"),
        "https://wired.com/story/best-ai-tools-2025/".to_string(),
        format!("https://{domain}"),
        format!("https://www.{domain}/blog/features"),
        "https://producthunt.com/products/".to_string(),
        "https://venturebeat.com/category/ai/".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn input() -> BatchInput {
        BatchInput::new(
            "Acme",
            "acme.io",
            vec!["best crm 2025".into(), "acme review".into()],
            vec!["Zeta".into(), "Yeta".into()],
        )
        .unwrap()
    }

    #[test]
    fn synthetic_records_are_flagged_and_shaped() {
        let mut rng = StdRng::seed_from_u64(1);
        let record = synthesize(Surface::Gemini, "best crm 2025", &input(), &mut rng);

        assert!(record.synthetic);
        assert!(record.error.is_none());
        assert_eq!(record.surface, Surface::Gemini);
        assert!((2..=5).contains(&record.sources.len()));
        assert!(record.response.contains("Sources:"));
    }

    #[test]
    fn batch_covers_every_surface_prompt_pair_in_order() {
        let mut rng = StdRng::seed_from_u64(2);
        let input = input();
        let records = synthesize_batch(&input, &mut rng);

        assert_eq!(records.len(), 6);
        assert_eq!(records[0].surface, Surface::ChatGpt);
        assert_eq!(records[0].prompt, "best crm 2025");
        assert_eq!(records[1].prompt, "acme review");
        assert_eq!(records[2].surface, Surface::Gemini);
        assert_eq!(records[5].surface, Surface::Claude);
    }

    #[test]
    fn mention_rate_is_roughly_62_percent() {
        let mut rng = StdRng::seed_from_u64(3);
        let input = input();
        let total = 400;
        let mentioned = (0..total)
            .filter(|_| {
                synthesize(Surface::ChatGpt, "p", &input, &mut rng)
                    .response
                    .contains("Acme")
            })
            .count();

        #[allow(clippy::cast_precision_loss)]
        let rate = mentioned as f64 / f64::from(total);
        assert!(
            (0.52..=0.72).contains(&rate),
            "mention rate {rate} outside expected band"
        );
    }

    #[test]
    fn unmentioned_answers_rank_competitors_instead() {
        let mut rng = StdRng::seed_from_u64(4);
        let input = input();
        let record = std::iter::repeat_with(|| synthesize(Surface::Claude, "p", &input, &mut rng))
            .take(50)
            .find(|r| !r.response.contains("Acme"))
            .expect("some synthetic answers omit the brand");

        assert!(record.response.contains("Zeta"));
        assert!(record.response.contains("top-rated options"));
    }
}
