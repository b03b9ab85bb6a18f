//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs. Every accessor returns
//! `None`/`false` instead of failing when the API is unavailable.

use web_sys::{Document, Location, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the current document.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Get the current page location.
#[inline]
pub fn location() -> Option<Location> {
    Some(window()?.location())
}

/// Current page protocol including the trailing colon (e.g. "https:").
pub fn protocol() -> Option<String> {
    location()?.protocol().ok()
}

/// Current page hostname, without port.
pub fn hostname() -> Option<String> {
    location()?.hostname().ok()
}

/// Check whether any element matches `selector`.
pub fn has_element(selector: &str) -> bool {
    document()
        .and_then(|doc| doc.query_selector(selector).ok().flatten())
        .is_some()
}

/// Check whether a global constructor (e.g. `SecurityPolicyViolationEvent`) exists.
pub fn has_global(name: &str) -> bool {
    window().is_some_and(|w| js_sys::Reflect::has(&w, &name.into()).unwrap_or(false))
}

/// Milliseconds since the Unix epoch from the browser clock.
#[inline]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
