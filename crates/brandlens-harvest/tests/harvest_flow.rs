//! Integration tests for the interaction driver and orchestrator against a
//! wiremock WebDriver endpoint. No real browser is involved; every test
//! asserts on the records the layer produces under a scripted remote.

use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brandlens_core::{AnswerError, BatchInput, Surface};
use brandlens_harvest::{interact, run_batch, HarvestTiming, RunSink};
use brandlens_webdriver::{WebDriverClient, IDENTITY_POOL};

fn fast_timing() -> HarvestTiming {
    HarvestTiming {
        settle_wait: Duration::ZERO,
        input_wait: Duration::from_millis(200),
        send_wait: Duration::from_millis(100),
        post_submit_wait: Duration::ZERO,
        response_wait: Duration::from_millis(200),
        fallback_wait: Duration::ZERO,
        quiet_period: Duration::from_millis(200),
        hard_timeout: Duration::from_secs(2),
        poll_interval: Duration::from_millis(50),
        pacing_secs: (0.0, 0.0),
        ..HarvestTiming::default()
    }
}

fn batch_input(prompts: &[&str]) -> BatchInput {
    BatchInput::new(
        "Acme",
        "acme.io",
        prompts.iter().map(|p| (*p).to_string()).collect(),
        vec!["Zeta".to_string()],
    )
    .expect("valid input")
}

/// Sink recording every progress fraction and log line.
#[derive(Default)]
struct CollectSink {
    fractions: Mutex<Vec<f64>>,
    lines: Mutex<Vec<String>>,
}

impl RunSink for CollectSink {
    fn progress(&self, fraction: f64) {
        self.fractions.lock().unwrap().push(fraction);
    }
    fn log(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

fn element_value(id: &str) -> serde_json::Value {
    json!({ "value": { "element-6066-11e4-a52e-4f735466cecf": id } })
}

/// Session bootstrap plus window plumbing shared by the driver tests.
async fn mount_session_and_windows(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "value": { "sessionId": "sess1", "capabilities": {} }
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/session/sess1/timeouts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "value": null })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/session/sess1/window"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "value": "base" })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/session/sess1/window/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "value": { "handle": "tab-1", "type": "tab" }
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/session/sess1/window"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "value": null })))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/session/sess1/window"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "value": ["base"] })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/session/sess1/url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "value": null })))
        .mount(server)
        .await;
}

async fn open_session(server: &MockServer) -> brandlens_webdriver::Session {
    WebDriverClient::new(&server.uri())
        .unwrap()
        .new_session(&IDENTITY_POOL[0], Duration::from_secs(30))
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Driver: selector fallback and happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn driver_succeeds_via_the_last_selector_candidate() {
    let server = MockServer::start().await;
    mount_session_and_windows(&server).await;

    Mock::given(method("GET"))
        .and(path("/session/sess1/url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "value": "https://chatgpt.com/"
        })))
        .mount(&server)
        .await;

    // Only the generic last input candidate ("textarea") matches; every
    // other find-element call falls through to the 404 catch-all below.
    Mock::given(method("POST"))
        .and(path("/session/sess1/element"))
        .and(body_partial_json(json!({ "value": "textarea" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&element_value("el-input")))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/session/sess1/element"))
        .and(body_partial_json(
            json!({ "value": "[data-message-author-role=\"assistant\"]" }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&element_value("el-resp")))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/session/sess1/element"))
        .respond_with(ResponseTemplate::new(404).set_body_json(&json!({
            "value": { "error": "no such element", "message": "no match" }
        })))
        .with_priority(9)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/session/sess1/element/el-input/displayed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "value": true })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/session/sess1/element/el-input/click"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "value": null })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/session/sess1/element/el-input/value"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "value": null })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/session/sess1/element/el-resp/text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "value": "Acme is a great choice for most teams."
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/session/sess1/elements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "value": [{ "element-6066-11e4-a52e-4f735466cecf": "a-1" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/session/sess1/element/a-1/attribute/href"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "value": "https://g2.com/products/acme"
        })))
        .mount(&server)
        .await;

    let session = open_session(&server).await;
    let record = interact(&session, Surface::ChatGpt, "best crm 2025", &fast_timing()).await;

    assert_eq!(record.error, None, "record: {record:?}");
    assert_eq!(record.response, "Acme is a great choice for most teams.");
    assert_eq!(record.sources, vec!["https://g2.com/products/acme"]);
    assert!(!record.synthetic);
}

#[tokio::test]
async fn driver_reports_input_not_found_when_no_candidate_matches() {
    let server = MockServer::start().await;
    mount_session_and_windows(&server).await;

    Mock::given(method("GET"))
        .and(path("/session/sess1/url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "value": "https://claude.ai/new"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/session/sess1/element"))
        .respond_with(ResponseTemplate::new(404).set_body_json(&json!({
            "value": { "error": "no such element", "message": "no match" }
        })))
        .mount(&server)
        .await;

    let session = open_session(&server).await;
    let record = interact(&session, Surface::Claude, "acme review", &fast_timing()).await;

    assert_eq!(record.error, Some(AnswerError::InputNotFound));
    assert!(record.response.contains("Could not find Claude input field"));
    assert!(record.sources.is_empty());
}

#[tokio::test]
async fn driver_detects_a_login_wall_without_touching_the_page() {
    let server = MockServer::start().await;
    mount_session_and_windows(&server).await;

    Mock::given(method("GET"))
        .and(path("/session/sess1/url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "value": "https://accounts.google.com/v3/signin/identifier"
        })))
        .mount(&server)
        .await;

    // No element mocks mounted: a login-wall return must not look anything up.
    let session = open_session(&server).await;
    let record = interact(&session, Surface::Gemini, "best crm 2025", &fast_timing()).await;

    assert_eq!(record.error, Some(AnswerError::LoginRequired));
    assert!(record.response.contains("Login required"));
    assert!(record.response.contains("Gemini"));
}

// ---------------------------------------------------------------------------
// Orchestrator: degradation paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unavailable_backend_yields_an_empty_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = WebDriverClient::new(&server.uri()).unwrap();
    let sink = CollectSink::default();
    let mut rng = StdRng::seed_from_u64(11);
    let records = run_batch(
        &client,
        &batch_input(&["p1"]),
        &fast_timing(),
        &sink,
        &mut rng,
    )
    .await;

    assert!(records.is_empty());
    let lines = sink.lines.lock().unwrap();
    assert!(lines.iter().any(|l| l.contains("unavailable")));
}

#[tokio::test]
async fn session_open_failure_fills_every_prompt_with_driver_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "value": { "ready": true }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(500).set_body_json(&json!({
            "value": { "error": "session not created", "message": "chrome failed to start" }
        })))
        .mount(&server)
        .await;

    let client = WebDriverClient::new(&server.uri()).unwrap();
    let sink = CollectSink::default();
    let mut rng = StdRng::seed_from_u64(12);
    let input = batch_input(&["p1", "p2"]);
    let records = run_batch(&client, &input, &fast_timing(), &sink, &mut rng).await;

    // Batch shape stays total: 2 prompts × 3 surfaces.
    assert_eq!(records.len(), 6);
    assert!(records
        .iter()
        .all(|r| r.error == Some(AnswerError::DriverError)));

    // Strict (surface, prompt-index) ordering.
    let expected: Vec<(Surface, &str)> = vec![
        (Surface::ChatGpt, "p1"),
        (Surface::ChatGpt, "p2"),
        (Surface::Gemini, "p1"),
        (Surface::Gemini, "p2"),
        (Surface::Claude, "p1"),
        (Surface::Claude, "p2"),
    ];
    let actual: Vec<(Surface, &str)> = records
        .iter()
        .map(|r| (r.surface, r.prompt.as_str()))
        .collect();
    assert_eq!(actual, expected);

    // Progress is monotone and finishes at 1.0.
    let fractions = sink.fractions.lock().unwrap();
    assert_eq!(fractions.len(), 6);
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
    assert!((fractions.last().unwrap() - 1.0).abs() < f64::EPSILON);
}
