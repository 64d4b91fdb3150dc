//! Batch orchestration across the target surfaces.
//!
//! Surfaces are driven strictly sequentially — each session holds a full
//! browser process — and prompts within a session are sequential too, with
//! randomized pacing between them. A session-level failure fills that
//! surface's remaining prompts with error records instead of aborting.

use rand::Rng;

use brandlens_core::{AnswerError, AnswerRecord, BatchInput, Surface};
use brandlens_webdriver::{BrowserIdentity, WebDriverClient};

use crate::driver::interact;
use crate::timing::HarvestTiming;

/// Observability sink for one run: fractional progress plus human-readable
/// status lines. Advisory only — no semantic return values.
pub trait RunSink: Send + Sync {
    fn progress(&self, fraction: f64);
    fn log(&self, line: &str);
}

/// Sink that discards everything.
pub struct NullSink;

impl RunSink for NullSink {
    fn progress(&self, _fraction: f64) {}
    fn log(&self, _line: &str) {}
}

/// Run the full prompt batch against every surface.
///
/// Returns records in strict (surface, prompt-index) order; downstream
/// consumers rely on that order being stable. Returns an empty list when
/// the automation backend is unavailable — callers interpret that as
/// "degrade to the synthetic fallback generator".
pub async fn run_batch<R: Rng>(
    client: &WebDriverClient,
    input: &BatchInput,
    timing: &HarvestTiming,
    sink: &dyn RunSink,
    rng: &mut R,
) -> Vec<AnswerRecord> {
    match client.status().await {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!("automation backend reachable but not ready");
            sink.log("automation backend not ready — falling back to synthetic data");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "automation backend unavailable");
            sink.log("automation backend unavailable — falling back to synthetic data");
            return Vec::new();
        }
    }

    let prompt_count = input.prompts.len();
    let total = prompt_count * Surface::ALL.len();
    let mut done = 0usize;
    let mut results = Vec::with_capacity(total);

    for surface in Surface::ALL {
        sink.log(&format!("starting {surface} browser session"));
        let identity = BrowserIdentity::random(rng);

        let session = match client.new_session(identity, timing.nav_timeout).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(%surface, error = %e, "browser session failed to open");
                sink.log(&format!("{surface} session failed: {e}"));
                // Keep the batch shape total: one error record per prompt.
                for prompt in &input.prompts {
                    results.push(AnswerRecord::failed(
                        surface,
                        prompt,
                        AnswerError::DriverError,
                        &format!("[Browser session failed to start: {e}]"),
                    ));
                    done += 1;
                    sink.progress(fraction(done, total));
                }
                continue;
            }
        };

        for (index, prompt) in input.prompts.iter().enumerate() {
            sink.log(&format!(
                "[{surface}] {}/{prompt_count}: {}",
                index + 1,
                head(prompt, 65)
            ));

            let record = interact(&session, surface, prompt, timing).await;
            match record.error {
                Some(AnswerError::LoginRequired) => {
                    sink.log(&format!("[{surface}] login wall — recorded as login_required"));
                }
                Some(error) => {
                    sink.log(&format!("[{surface}] error: {}", error.as_str()));
                }
                None => {
                    sink.log(&format!(
                        "[{surface}] got {} chars: \"{}\"",
                        record.response.len(),
                        head(&record.response, 60)
                    ));
                }
            }
            results.push(record);
            done += 1;
            sink.progress(fraction(done, total));

            // Politeness pacing between prompts on the same session.
            if index + 1 < prompt_count {
                let (min, max) = timing.pacing_secs;
                let delay = if max > min { rng.random_range(min..=max) } else { min };
                if delay > 0.0 {
                    tracing::debug!(%surface, delay_secs = delay, "pacing delay");
                    tokio::time::sleep(std::time::Duration::from_secs_f64(delay)).await;
                }
            }
        }

        // Release the browser before touching the next surface, on every path.
        if let Err(e) = session.delete().await {
            tracing::warn!(%surface, error = %e, "failed to close session");
        }
        sink.log(&format!("{surface} session closed"));
    }

    results
}

#[allow(clippy::cast_precision_loss)]
fn fraction(done: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        done as f64 / total as f64
    }
}

fn head(text: &str, limit: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= limit {
        flat
    } else {
        flat.chars().take(limit).collect::<String>() + "…"
    }
}
