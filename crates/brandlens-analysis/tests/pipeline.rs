//! End-to-end parse-and-aggregate pipeline checks.

use brandlens_analysis::{aggregate, parse_batch};
use brandlens_core::{AnswerError, AnswerRecord, BatchInput, Sentiment, Surface};

fn input(competitors: &[&str]) -> BatchInput {
    BatchInput::new(
        "Acme",
        "acme.io",
        vec!["best crm tools 2025".to_owned()],
        competitors.iter().map(|c| (*c).to_owned()).collect(),
    )
    .unwrap()
}

fn live(surface: Surface, text: &str) -> AnswerRecord {
    AnswerRecord {
        surface,
        prompt: "best crm tools 2025".to_owned(),
        response: text.to_owned(),
        sources: vec![],
        error: None,
        synthetic: false,
    }
}

#[test]
fn citation_example_extracts_ordered_domains() {
    let input = input(&[]);
    let facts = parse_batch(
        &input,
        vec![live(
            Surface::ChatGpt,
            "Acme is great. See https://g2.com/acme and https://acme.io/reviews.",
        )],
    );

    let fact = &facts[0];
    assert!(fact.mentioned);
    let domains: Vec<&str> = fact
        .cited_domains
        .iter()
        .map(|c| c.domain.as_str())
        .collect();
    assert_eq!(domains, vec!["g2.com", "acme.io"]);
    assert_eq!(fact.cited_domains[0].category, "Review/UGC");
    assert!(fact.own_domain_cited);
    assert_eq!(fact.sentiment, Sentiment::Positive);
}

#[test]
fn two_rivals_before_the_brand_yield_rank_three() {
    let input = input(&["Zeta", "Yeta"]);
    let facts = parse_batch(
        &input,
        vec![live(
            Surface::Gemini,
            "Zeta and Yeta are popular. Acme is also solid.",
        )],
    );
    assert_eq!(facts[0].first_rank, 3);
}

#[test]
fn rank_implies_mention_across_varied_records() {
    let input = input(&["Zeta"]);
    let records = vec![
        live(Surface::ChatGpt, "Zeta then Acme."),
        live(Surface::ChatGpt, "Nothing relevant here."),
        live(Surface::Gemini, "Acme leads."),
        AnswerRecord::failed(
            Surface::Claude,
            "best crm tools 2025",
            AnswerError::Timeout,
            "[timed out]",
        ),
    ];
    for fact in parse_batch(&input, records) {
        if fact.first_rank > 0 {
            assert!(fact.mentioned);
        }
        if !fact.mentioned {
            assert_eq!(fact.first_rank, 0);
        }
    }
}

#[test]
fn all_login_walls_score_exactly_twenty_five() {
    let input = input(&["Zeta"]);
    let mut records = Vec::new();
    for surface in Surface::ALL {
        for _ in 0..4 {
            records.push(AnswerRecord::failed(
                surface,
                "best crm tools 2025",
                AnswerError::LoginRequired,
                &format!("[Login required — {surface} redirected to a login page]"),
            ));
        }
    }

    let metrics = aggregate(parse_batch(&input, records));
    assert_eq!(metrics.scores.visibility_pct, 0.0);
    assert_eq!(metrics.scores.mean_rank, 5.0);
    assert_eq!(metrics.scores.sentiment_score, 0.5);
    assert_eq!(metrics.scores.own_citation_pct, 0.0);
    // 0.20·(100 − 25) + 0.20·50
    assert_eq!(metrics.scores.composite, 25.0);
    assert_eq!(metrics.counts.login_required, 12);
    assert_eq!(metrics.counts.live, 0);
}

#[test]
fn composite_stays_in_bounds_at_the_extremes() {
    let input = input(&[]);

    let best = parse_batch(
        &input,
        vec![live(
            Surface::ChatGpt,
            "Acme is excellent, the best and most reliable. See https://acme.io.",
        )],
    );
    let metrics = aggregate(best);
    assert!(metrics.scores.composite <= 100.0);
    assert!(metrics.scores.composite >= 0.0);

    let worst: Vec<AnswerRecord> = (0..6)
        .map(|_| {
            AnswerRecord::failed(
                Surface::Claude,
                "best crm tools 2025",
                AnswerError::DriverError,
                "[Browser session failed to start]",
            )
        })
        .collect();
    let metrics = aggregate(parse_batch(&input, worst));
    assert!(metrics.scores.composite >= 0.0);
    assert!(metrics.scores.visibility_pct >= 0.0 && metrics.scores.visibility_pct <= 100.0);
}

#[test]
fn aggregation_is_bit_identical_across_runs() {
    let input = input(&["Zeta", "Yeta"]);
    let records = vec![
        live(
            Surface::ChatGpt,
            "Zeta is popular but Acme is excellent. https://g2.com/acme",
        ),
        live(Surface::Gemini, "Yeta and Zeta dominate this space."),
        AnswerRecord::failed(
            Surface::Claude,
            "best crm tools 2025",
            AnswerError::LoginRequired,
            "[Login required]",
        ),
    ];

    let facts = parse_batch(&input, records);
    let first = serde_json::to_string(&aggregate(facts.clone())).unwrap();
    let second = serde_json::to_string(&aggregate(facts)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn results_preserve_surface_then_prompt_order() {
    let input = input(&[]);
    let mut records = Vec::new();
    for surface in Surface::ALL {
        for i in 0..2 {
            let mut rec = live(surface, "Acme");
            rec.prompt = format!("prompt {i}");
            records.push(rec);
        }
    }
    let metrics = aggregate(parse_batch(&input, records));
    let order: Vec<(Surface, String)> = metrics
        .results
        .iter()
        .map(|f| (f.record.surface, f.record.prompt.clone()))
        .collect();
    assert_eq!(order[0], (Surface::ChatGpt, "prompt 0".to_owned()));
    assert_eq!(order[3], (Surface::Gemini, "prompt 1".to_owned()));
    assert_eq!(order[5], (Surface::Claude, "prompt 1".to_owned()));
}
