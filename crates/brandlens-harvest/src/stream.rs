//! Streaming completion detection.
//!
//! Target surfaces stream their answers token by token, so "the answer is
//! done" has to be inferred: the text is considered final once its length
//! stops growing for a quiet period, bounded by a hard timeout.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Repeatedly sample a live text region until it stabilizes.
///
/// Samples via `sample` every `poll_interval`. When the sampled length is
/// unchanged for at least `quiet_period`, the text is final and returned
/// immediately. If `hard_timeout` elapses first, whatever text was last
/// observed is returned — this function never fails.
///
/// Transient sample errors are ignored and polling continues: DOM mutation
/// during a streaming re-render must not abort collection of a
/// partial-but-usable answer.
pub async fn await_stable<F, Fut, E>(
    mut sample: F,
    quiet_period: Duration,
    hard_timeout: Duration,
    poll_interval: Duration,
) -> String
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, E>>,
{
    let deadline = Instant::now() + hard_timeout;
    let mut last_text = String::new();
    let mut last_len: Option<usize> = None;
    let mut stable_since: Option<Instant> = None;

    while Instant::now() < deadline {
        match sample().await {
            Ok(text) => {
                let now = Instant::now();
                if Some(text.len()) == last_len {
                    match stable_since {
                        Some(since) if now.duration_since(since) >= quiet_period => {
                            return text;
                        }
                        Some(_) => {}
                        None => stable_since = Some(now),
                    }
                } else {
                    last_len = Some(text.len());
                    stable_since = None;
                }
                last_text = text;
            }
            Err(_) => {
                // Region mid-re-render; keep polling.
            }
        }
        tokio::time::sleep(poll_interval).await;
    }

    // Hard timeout: one final read, falling back to the last good sample.
    match sample().await {
        Ok(text) => text,
        Err(_) => last_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const QUIET: Duration = Duration::from_secs(3);
    const HARD: Duration = Duration::from_secs(50);
    const POLL: Duration = Duration::from_millis(700);

    /// Simulates a stream that grows for `grow_steps` samples, then stops.
    fn stepped_stream(grow_steps: usize) -> impl FnMut() -> std::future::Ready<Result<String, Infallible>> {
        let calls = Arc::new(AtomicUsize::new(0));
        move || {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            let len = call.min(grow_steps) + 1;
            std::future::ready(Ok("x".repeat(len)))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn returns_early_once_stream_stops_growing() {
        let started = Instant::now();
        let text = await_stable(stepped_stream(4), QUIET, HARD, POLL).await;

        assert_eq!(text, "xxxxx");
        let elapsed = started.elapsed();
        assert!(
            elapsed < Duration::from_secs(10),
            "expected early return, took {elapsed:?}"
        );
        assert!(elapsed >= QUIET, "cannot finish before the quiet period");
    }

    #[tokio::test(start_paused = true)]
    async fn returns_at_hard_timeout_when_stream_never_stabilizes() {
        let started = Instant::now();
        // usize::MAX growth steps: length changes on every sample.
        let text = await_stable(stepped_stream(usize::MAX), QUIET, HARD, POLL).await;

        assert!(!text.is_empty());
        let elapsed = started.elapsed();
        assert!(
            elapsed >= HARD,
            "expected to run to the hard timeout, took {elapsed:?}"
        );
        assert!(elapsed < HARD + Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_sample_errors_do_not_abort_polling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sample = {
            let calls = Arc::clone(&calls);
            move || {
                let call = calls.fetch_add(1, Ordering::SeqCst);
                // Every third sample fails; text stabilizes after call 3.
                if call % 3 == 2 {
                    std::future::ready(Err("stale element"))
                } else {
                    let len = call.min(3) + 1;
                    std::future::ready(Ok("y".repeat(len)))
                }
            }
        };

        let text = await_stable(sample, QUIET, HARD, POLL).await;
        assert_eq!(text, "yyyy");
    }

    #[tokio::test(start_paused = true)]
    async fn all_errors_yield_empty_text_at_hard_timeout() {
        let sample = || std::future::ready(Err::<String, _>("gone"));
        let text = await_stable(sample, QUIET, HARD, POLL).await;
        assert_eq!(text, "");
    }
}
