//! Randomized realistic browser identities.
//!
//! Drawn per session to reduce trivial bot-signature detection. This is a
//! politeness/fingerprint-reduction measure, not a security control.

use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct BrowserIdentity {
    pub user_agent: &'static str,
    pub locale: &'static str,
    /// Advisory only; not currently forwarded to the browser.
    pub timezone: &'static str,
    pub viewport: (u32, u32),
}

pub const IDENTITY_POOL: &[BrowserIdentity] = &[
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
        locale: "en-US",
        timezone: "America/New_York",
        viewport: (1280, 800),
    },
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
        locale: "en-US",
        timezone: "America/Los_Angeles",
        viewport: (1440, 900),
    },
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
        locale: "en-US",
        timezone: "America/Chicago",
        viewport: (1280, 800),
    },
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:123.0) \
                     Gecko/20100101 Firefox/123.0",
        locale: "en-GB",
        timezone: "Europe/London",
        viewport: (1366, 768),
    },
];

impl BrowserIdentity {
    /// Pick a random identity from the fixed pool.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> &'static BrowserIdentity {
        &IDENTITY_POOL[rng.random_range(0..IDENTITY_POOL.len())]
    }
}
