//! Per-surface selector candidate tables.
//!
//! Each surface's markup is an unversioned external contract that changes
//! without notice. Instead of committing to any one selector, every lookup
//! tries an ordered list of candidates — most specific and stable first,
//! generic fallback last — and the first match wins.

use brandlens_core::Surface;

pub struct SurfaceSelectors {
    /// Candidates for the element that accepts prompt text.
    pub input: &'static [&'static str],
    /// Candidates for an explicit send control; empty means Enter submits.
    pub send: &'static [&'static str],
    /// Candidates for the live answer region.
    pub response: &'static [&'static str],
}

const CHATGPT: SurfaceSelectors = SurfaceSelectors {
    input: &[
        "#prompt-textarea",
        "textarea[data-id=\"root\"]",
        "textarea[placeholder]",
        "div[contenteditable=\"true\"]",
        "textarea",
    ],
    send: &[],
    response: &[
        "[data-message-author-role=\"assistant\"]",
        ".agent-turn",
        ".markdown.prose",
        "[class*=\"prose\"]",
    ],
};

const GEMINI: SurfaceSelectors = SurfaceSelectors {
    input: &[
        "rich-textarea .ql-editor",
        "rich-textarea div[contenteditable=\"true\"]",
        "textarea[aria-label]",
        "div[contenteditable=\"true\"]",
        ".textarea-container textarea",
        "textarea",
    ],
    send: &[],
    response: &[
        "model-response .response-content",
        "message-content .markdown",
        "[class*=\"model-response\"]",
        "response-container",
        ".conversation-container .response",
        "div[data-response-id]",
    ],
};

const CLAUDE: SurfaceSelectors = SurfaceSelectors {
    input: &[
        "div[contenteditable=\"true\"].ProseMirror",
        ".ProseMirror",
        "div[contenteditable=\"true\"][data-placeholder]",
        "div[contenteditable=\"true\"]",
        "textarea[placeholder]",
        "textarea",
    ],
    send: &[
        "button[aria-label=\"Send message\"]",
        "button[type=\"submit\"]",
        "[data-testid=\"send-button\"]",
    ],
    response: &[
        "[data-testid=\"bot-message\"]",
        ".font-claude-message",
        "[class*=\"assistant\"]",
        ".prose",
    ],
};

#[must_use]
pub fn selectors_for(surface: Surface) -> &'static SurfaceSelectors {
    match surface {
        Surface::ChatGpt => &CHATGPT,
        Surface::Gemini => &GEMINI,
        Surface::Claude => &CLAUDE,
    }
}

/// URL substrings that indicate a redirect into an authentication flow.
const LOGIN_MARKERS: &[&str] = &["login", "signin", "sign-in", "auth", "accounts.google"];

#[must_use]
pub fn is_login_wall(url: &str) -> bool {
    let lower = url.to_lowercase();
    LOGIN_MARKERS.iter().any(|marker| lower.contains(marker))
}
