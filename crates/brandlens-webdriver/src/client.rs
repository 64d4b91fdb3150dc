//! WebDriver session, window, and element operations.

use std::time::Duration;

use reqwest::Method;
use serde_json::{json, Value};

use crate::error::{Result, WebDriverError};
use crate::identity::BrowserIdentity;

/// W3C element identifier key in find-element responses.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// WebDriver key code for Enter.
pub const ENTER_KEY: &str = "\u{e007}";

/// Poll interval for client-side element waits.
const WAIT_POLL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct WebDriverClient {
    http: reqwest::Client,
    base_url: String,
}

impl WebDriverClient {
    /// Build a client for a WebDriver endpoint.
    ///
    /// No whole-request timeout is set on the HTTP client: a navigation
    /// call legitimately blocks until the remote page-load timeout fires.
    /// Connect failures are bounded separately.
    ///
    /// # Errors
    ///
    /// Returns [`WebDriverError::Http`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Probe endpoint readiness (`GET /status`).
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint is unreachable or answers with a
    /// non-WebDriver payload. `Ok(false)` means reachable but not ready.
    pub async fn status(&self) -> Result<bool> {
        let value = self.execute(Method::GET, "/status", None).await?;
        Ok(value
            .get("ready")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    /// Open an isolated browser session configured with the given identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created or the response
    /// carries no session id.
    pub async fn new_session(
        &self,
        identity: &BrowserIdentity,
        page_load_timeout: Duration,
    ) -> Result<Session> {
        let (width, height) = identity.viewport;
        let body = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {
                        "args": [
                            "--headless=new",
                            "--no-sandbox",
                            "--disable-dev-shm-usage",
                            "--disable-gpu",
                            "--disable-blink-features=AutomationControlled",
                            format!("--window-size={width},{height}"),
                            format!("--lang={}", identity.locale),
                            format!("--user-agent={}", identity.user_agent),
                        ]
                    }
                }
            }
        });

        let value = self.execute(Method::POST, "/session", Some(body)).await?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| WebDriverError::Malformed {
                context: "sessionId in new-session response".to_string(),
            })?
            .to_string();

        tracing::debug!(session_id, user_agent = identity.user_agent, "session opened");

        let session = Session {
            client: self.clone_inner(),
            id: session_id,
        };
        session.set_page_load_timeout(page_load_timeout).await?;
        Ok(session)
    }

    fn clone_inner(&self) -> WebDriverClient {
        WebDriverClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
        }
    }

    /// Issue one WebDriver command and unwrap the `value` envelope.
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.request(method, &url);
        // WebDriver POST endpoints require a JSON body, even an empty one.
        request = match body {
            Some(b) => request.json(&b),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let payload: Value = match response.json().await {
            Ok(v) => v,
            Err(_) if !status.is_success() => {
                return Err(WebDriverError::Api {
                    status: status.as_u16(),
                    message: "non-JSON error body".to_string(),
                });
            }
            Err(e) => return Err(WebDriverError::Http(e)),
        };

        let value = payload.get("value").cloned().unwrap_or(Value::Null);
        if !status.is_success() {
            // Error payloads look like {"value": {"error": ..., "message": ...}}.
            if let (Some(error), message) = (
                value.get("error").and_then(Value::as_str),
                value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default(),
            ) {
                return Err(WebDriverError::Protocol {
                    error: error.to_string(),
                    message: message.to_string(),
                });
            }
            return Err(WebDriverError::Api {
                status: status.as_u16(),
                message: value.to_string(),
            });
        }
        Ok(value)
    }
}

/// One isolated browser session (its own cookies, identity, and windows).
#[derive(Debug)]
pub struct Session {
    client: WebDriverClient,
    id: String,
}

impl Session {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    async fn command(&self, method: Method, suffix: &str, body: Option<Value>) -> Result<Value> {
        let path = format!("/session/{}{suffix}", self.id);
        self.client.execute(method, &path, body).await
    }

    /// Set the remote page-load timeout.
    ///
    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn set_page_load_timeout(&self, timeout: Duration) -> Result<()> {
        #[allow(clippy::cast_possible_truncation)]
        let ms = timeout.as_millis() as u64;
        self.command(Method::POST, "/timeouts", Some(json!({ "pageLoad": ms })))
            .await?;
        Ok(())
    }

    /// Navigate the current window. Blocks until load or the remote
    /// page-load timeout.
    ///
    /// # Errors
    ///
    /// Propagates navigation failures, including remote timeouts.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.command(Method::POST, "/url", Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn current_url(&self) -> Result<String> {
        let value = self.command(Method::GET, "/url", None).await?;
        value
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| WebDriverError::Malformed {
                context: "string in current-url response".to_string(),
            })
    }

    /// Find the first element matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns a `no such element` protocol error when nothing matches;
    /// callers use [`WebDriverError::is_no_such_element`] to fall through
    /// to the next selector candidate.
    pub async fn find_element(&self, selector: &str) -> Result<Element<'_>> {
        let value = self
            .command(
                Method::POST,
                "/element",
                Some(json!({ "using": "css selector", "value": selector })),
            )
            .await?;
        let element_id = value
            .get(ELEMENT_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| WebDriverError::Malformed {
                context: "element id in find-element response".to_string(),
            })?
            .to_string();
        Ok(Element {
            session: self,
            id: element_id,
        })
    }

    /// Find all elements matching a CSS selector (possibly empty).
    ///
    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<Element<'_>>> {
        let value = self
            .command(
                Method::POST,
                "/elements",
                Some(json!({ "using": "css selector", "value": selector })),
            )
            .await?;
        let ids = value.as_array().cloned().unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|entry| entry.get(ELEMENT_KEY).and_then(Value::as_str))
            .map(|id| Element {
                session: self,
                id: id.to_string(),
            })
            .collect())
    }

    /// Poll until `selector` matches a visible element, up to `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`WebDriverError::WaitTimeout`] when the deadline passes
    /// without a visible match. Transient lookup errors keep polling.
    pub async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> Result<Element<'_>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Ok(element) = self.find_element(selector).await {
                if element.is_displayed().await.unwrap_or(false) {
                    return Ok(element);
                }
            }
            if tokio::time::Instant::now() >= deadline {
                #[allow(clippy::cast_possible_truncation)]
                return Err(WebDriverError::WaitTimeout {
                    selector: selector.to_string(),
                    waited_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(WAIT_POLL).await;
        }
    }

    /// Poll until `selector` matches any element (visible or not).
    ///
    /// # Errors
    ///
    /// Returns [`WebDriverError::WaitTimeout`] when the deadline passes.
    pub async fn wait_for_present(&self, selector: &str, timeout: Duration) -> Result<Element<'_>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match self.find_element(selector).await {
                Ok(element) => return Ok(element),
                Err(e) if e.is_no_such_element() => {}
                Err(e) => {
                    tracing::trace!(selector, error = %e, "transient find error during wait");
                }
            }
            if tokio::time::Instant::now() >= deadline {
                #[allow(clippy::cast_possible_truncation)]
                return Err(WebDriverError::WaitTimeout {
                    selector: selector.to_string(),
                    waited_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(WAIT_POLL).await;
        }
    }

    /// Visible text of the first element matching `selector`. Elements go
    /// stale during streaming re-renders, so this re-finds on every call.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures.
    pub async fn text_of(&self, selector: &str) -> Result<String> {
        let element = self.find_element(selector).await?;
        element.text().await
    }

    /// Open a fresh tab and return its handle. The caller still has to
    /// switch to it.
    ///
    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn new_window(&self) -> Result<String> {
        let value = self
            .command(Method::POST, "/window/new", Some(json!({ "type": "tab" })))
            .await?;
        value
            .get("handle")
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| WebDriverError::Malformed {
                context: "handle in new-window response".to_string(),
            })
    }

    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn window_handle(&self) -> Result<String> {
        let value = self.command(Method::GET, "/window", None).await?;
        value
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| WebDriverError::Malformed {
                context: "string in window-handle response".to_string(),
            })
    }

    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn switch_to_window(&self, handle: &str) -> Result<()> {
        self.command(Method::POST, "/window", Some(json!({ "handle": handle })))
            .await?;
        Ok(())
    }

    /// Close the current window. The session stays alive.
    ///
    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn close_window(&self) -> Result<()> {
        self.command(Method::DELETE, "/window", None).await?;
        Ok(())
    }

    /// End the session and release the browser process.
    ///
    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn delete(&self) -> Result<()> {
        self.command(Method::DELETE, "", None).await?;
        tracing::debug!(session_id = %self.id, "session closed");
        Ok(())
    }
}

/// A handle to one located element within a session.
#[derive(Debug)]
pub struct Element<'a> {
    session: &'a Session,
    id: String,
}

impl Element<'_> {
    async fn command(&self, method: Method, suffix: &str, body: Option<Value>) -> Result<Value> {
        let path = format!("/element/{}{suffix}", self.id);
        self.session.command(method, &path, body).await
    }

    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn click(&self) -> Result<()> {
        self.command(Method::POST, "/click", Some(json!({}))).await?;
        Ok(())
    }

    /// Type text (or key codes such as [`ENTER_KEY`]) into the element.
    ///
    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn send_keys(&self, text: &str) -> Result<()> {
        self.command(Method::POST, "/value", Some(json!({ "text": text })))
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn text(&self) -> Result<String> {
        let value = self.command(Method::GET, "/text", None).await?;
        Ok(value.as_str().unwrap_or_default().trim().to_string())
    }

    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        let value = self
            .command(Method::GET, &format!("/attribute/{name}"), None)
            .await?;
        Ok(value.as_str().map(ToString::to_string))
    }

    /// # Errors
    ///
    /// Propagates protocol failures.
    pub async fn is_displayed(&self) -> Result<bool> {
        let value = self.command(Method::GET, "/displayed", None).await?;
        Ok(value.as_bool().unwrap_or(false))
    }
}
