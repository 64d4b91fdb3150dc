//! Per-surface interaction driver.
//!
//! One call drives one prompt through one surface: navigate, detect login
//! walls, locate the input through selector candidates, submit, wait for
//! the streamed answer to stabilize, and harvest outbound links. Failures
//! never escape — they become the record's error field.

use brandlens_core::{AnswerError, AnswerRecord, Surface};
use brandlens_webdriver::{Element, Session, ENTER_KEY};

use crate::selectors::{is_login_wall, selectors_for};
use crate::stream::await_stable;
use crate::timing::HarvestTiming;

/// Maximum outbound links harvested per answer.
const MAX_SOURCES: usize = 15;

/// Drive one prompt through one surface.
///
/// Consumes one page (tab) in the caller's session and always closes it on
/// exit, success or failure. Never returns an error: every failure mode is
/// captured in the returned record.
pub async fn interact(
    session: &Session,
    surface: Surface,
    prompt: &str,
    timing: &HarvestTiming,
) -> AnswerRecord {
    let base_window = session.window_handle().await.ok();

    let page = match session.new_window().await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(%surface, error = %e, "could not open a page");
            return AnswerRecord::failed(
                surface,
                prompt,
                AnswerError::DriverError,
                &format!("[Browser error: {e}]"),
            );
        }
    };
    if let Err(e) = session.switch_to_window(&page).await {
        tracing::warn!(%surface, error = %e, "could not switch to new page");
        return AnswerRecord::failed(
            surface,
            prompt,
            AnswerError::DriverError,
            &format!("[Browser error: {e}]"),
        );
    }

    let record = attempt(session, surface, prompt, timing).await;

    // Cleanup runs on every path; a close failure only costs a warning.
    if let Err(e) = session.close_window().await {
        tracing::warn!(%surface, error = %e, "failed to close page");
    }
    if let Some(base) = base_window {
        if let Err(e) = session.switch_to_window(&base).await {
            tracing::warn!(%surface, error = %e, "failed to switch back to base window");
        }
    }

    record
}

async fn attempt(
    session: &Session,
    surface: Surface,
    prompt: &str,
    timing: &HarvestTiming,
) -> AnswerRecord {
    let selectors = selectors_for(surface);

    // Step 1: navigate and check for an auth redirect.
    if let Err(e) = session.navigate(surface.entry_url()).await {
        let error = if e.is_timeout() {
            AnswerError::Timeout
        } else {
            AnswerError::DriverError
        };
        tracing::warn!(%surface, error = %e, "navigation failed");
        return AnswerRecord::failed(surface, prompt, error, &format!("[Browser error: {e}]"));
    }
    tokio::time::sleep(timing.settle_wait).await;

    match session.current_url().await {
        Ok(url) if is_login_wall(&url) => {
            tracing::info!(%surface, url, "login wall hit");
            return AnswerRecord::failed(
                surface,
                prompt,
                AnswerError::LoginRequired,
                &format!("[Login required — {surface} redirected to a login page]"),
            );
        }
        Ok(_) => {}
        Err(e) => {
            tracing::debug!(%surface, error = %e, "could not read current URL");
        }
    }

    // Step 2: locate the input through the candidate list and fill it.
    let input = fill_input(session, selectors.input, prompt, timing).await;
    let Some(input) = input else {
        tracing::warn!(%surface, "no input candidate matched");
        return AnswerRecord::failed(
            surface,
            prompt,
            AnswerError::InputNotFound,
            &format!("[Could not find {surface} input field]"),
        );
    };

    // Step 3: submit via a send control when the surface has one,
    // otherwise the Enter key.
    let mut sent = false;
    for candidate in selectors.send {
        if let Ok(button) = session.wait_for_present(candidate, timing.send_wait).await {
            if button.click().await.is_ok() {
                tracing::debug!(%surface, candidate, "submitted via send control");
                sent = true;
                break;
            }
        }
    }
    if !sent {
        if let Err(e) = input.send_keys(ENTER_KEY).await {
            tracing::warn!(%surface, error = %e, "submit failed");
            return AnswerRecord::failed(
                surface,
                prompt,
                AnswerError::DriverError,
                &format!("[Browser error: {e}]"),
            );
        }
    }
    tokio::time::sleep(timing.post_submit_wait).await;

    // Step 4: locate the live answer region.
    let mut region: Option<&str> = None;
    for candidate in selectors.response {
        if session
            .wait_for_present(candidate, timing.response_wait)
            .await
            .is_ok()
        {
            tracing::debug!(%surface, candidate, "answer region located");
            region = Some(candidate);
            break;
        }
    }

    // Step 5: wait out the stream, or fall back to the whole main area.
    let response = match region {
        Some(selector) => {
            await_stable(
                || session.text_of(selector),
                timing.quiet_period,
                timing.hard_timeout,
                timing.poll_interval,
            )
            .await
        }
        None => {
            tracing::debug!(%surface, "no answer region candidate matched; reading main area");
            tokio::time::sleep(timing.fallback_wait).await;
            match session.text_of("main").await {
                Ok(text) if !text.is_empty() => text,
                _ => session.text_of("body").await.unwrap_or_default(),
            }
        }
    };

    // Step 6: harvest outbound links that do not point back at the surface.
    let sources = harvest_links(session, surface).await;

    AnswerRecord {
        surface,
        prompt: prompt.to_string(),
        response,
        sources,
        error: None,
        synthetic: false,
    }
}

async fn fill_input<'a>(
    session: &'a Session,
    candidates: &[&'static str],
    prompt: &str,
    timing: &HarvestTiming,
) -> Option<Element<'a>> {
    for candidate in candidates {
        let Ok(element) = session.wait_for_visible(candidate, timing.input_wait).await else {
            continue;
        };
        if element.click().await.is_err() {
            continue;
        }
        if element.send_keys(prompt).await.is_ok() {
            tracing::debug!(candidate, "input filled");
            return Some(element);
        }
    }
    None
}

async fn harvest_links(session: &Session, surface: Surface) -> Vec<String> {
    let Ok(anchors) = session.find_elements("a[href^='http']").await else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for anchor in anchors {
        let Ok(Some(href)) = anchor.attribute("href").await else {
            continue;
        };
        if surface.home_domains().iter().any(|d| href.contains(d)) {
            continue;
        }
        if !links.contains(&href) {
            links.push(href);
        }
        if links.len() >= MAX_SOURCES {
            break;
        }
    }
    links
}
