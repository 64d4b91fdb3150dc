use std::time::Duration;

use brandlens_core::AppConfig;

/// Timing policy for one harvest run.
///
/// The defaults are fixed compatibility constants, not tuning knobs: the
/// quiet period, hard timeout, and pacing window are documented policy.
#[derive(Debug, Clone)]
pub struct HarvestTiming {
    /// Remote page-load timeout per navigation.
    pub nav_timeout: Duration,
    /// Settle wait after navigation before inspecting the page.
    pub settle_wait: Duration,
    /// Per-candidate wait for an input element to become visible.
    pub input_wait: Duration,
    /// Per-candidate wait for a send control.
    pub send_wait: Duration,
    /// Wait after submitting before looking for the answer region.
    pub post_submit_wait: Duration,
    /// Per-candidate wait for the answer region to appear.
    pub response_wait: Duration,
    /// Generous wait before reading the whole main area when no answer
    /// region candidate matched.
    pub fallback_wait: Duration,
    /// Streamed text is final once its length is unchanged this long.
    pub quiet_period: Duration,
    /// Upper bound on waiting for a streamed answer.
    pub hard_timeout: Duration,
    /// Sampling interval for the streaming detector.
    pub poll_interval: Duration,
    /// Uniform pacing delay between prompts on one session, in seconds.
    pub pacing_secs: (f64, f64),
}

impl Default for HarvestTiming {
    fn default() -> Self {
        Self {
            nav_timeout: Duration::from_secs(30),
            settle_wait: Duration::from_millis(2500),
            input_wait: Duration::from_secs(10),
            send_wait: Duration::from_secs(3),
            post_submit_wait: Duration::from_secs(2),
            response_wait: Duration::from_secs(20),
            fallback_wait: Duration::from_secs(18),
            quiet_period: Duration::from_secs(3),
            hard_timeout: Duration::from_secs(50),
            poll_interval: Duration::from_millis(700),
            pacing_secs: (6.0, 12.0),
        }
    }
}

impl HarvestTiming {
    /// Derive a timing policy from application configuration, keeping the
    /// non-configurable waits at their defaults.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            nav_timeout: Duration::from_secs(config.nav_timeout_secs),
            quiet_period: Duration::from_millis(config.quiet_ms),
            hard_timeout: Duration::from_secs(config.hard_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_ms),
            pacing_secs: (config.pacing_min_secs, config.pacing_max_secs),
            ..Self::default()
        }
    }
}
