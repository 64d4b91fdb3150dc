use thiserror::Error;

pub type Result<T> = std::result::Result<T, WebDriverError>;

#[derive(Debug, Error)]
pub enum WebDriverError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from WebDriver endpoint: {message}")]
    Api { status: u16, message: String },

    #[error("WebDriver error \"{error}\": {message}")]
    Protocol { error: String, message: String },

    #[error("no element matched selector \"{selector}\" within {waited_ms}ms")]
    WaitTimeout { selector: String, waited_ms: u64 },

    #[error("malformed WebDriver response: missing {context}")]
    Malformed { context: String },
}

impl WebDriverError {
    /// True for the protocol-level "no such element" failure a single
    /// find-element call returns. Callers treat this as "try the next
    /// selector candidate", not as a session failure.
    #[must_use]
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, WebDriverError::Protocol { error, .. } if error == "no such element")
    }

    /// True when the remote end reported a timeout (navigation or script).
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            WebDriverError::Protocol { error, .. } => {
                error == "timeout" || error == "script timeout"
            }
            WebDriverError::WaitTimeout { .. } => true,
            WebDriverError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}
