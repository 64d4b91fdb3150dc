//! Thin W3C WebDriver HTTP client.
//!
//! Speaks the wire protocol directly over `reqwest` against a chromedriver
//! (or remote grid) endpoint. Only the subset of the protocol the
//! interaction drivers need is implemented: sessions, windows, CSS element
//! lookup, keyboard input, clicks, and text sampling.

pub mod client;
pub mod error;
pub mod identity;

pub use client::{Element, Session, WebDriverClient, ENTER_KEY};
pub use error::{Result, WebDriverError};
pub use identity::{BrowserIdentity, IDENTITY_POOL};
