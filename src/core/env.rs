//! Host page environment.
//!
//! The validator reads a handful of ambient facts from the page it runs in:
//! where the page was served from, the current time and whether a CSP meta
//! tag is declared. [`PageEnvironment`] is the seam for those reads.
//! [`BrowserEnvironment`] reads them from `window`/`document`;
//! [`StaticEnvironment`] holds fixed values for native hosts and tests.

use crate::utils::format_timestamp_iso;

/// Scheme and host of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Protocol including the trailing colon (e.g. "https:")
    pub protocol: String,
    pub hostname: String,
}

impl PageLocation {
    pub fn new(protocol: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            hostname: hostname.into(),
        }
    }

    /// Derive a location from a full page URL. Returns `None` if unparsable.
    pub fn from_url(page_url: &str) -> Option<Self> {
        let url = url::Url::parse(page_url).ok()?;
        Some(Self::new(
            format!("{}:", url.scheme()),
            url.host_str().unwrap_or_default(),
        ))
    }
}

/// Ambient reads the validator depends on.
pub trait PageEnvironment: Send + Sync {
    /// Current page location, if the host has one.
    fn location(&self) -> Option<PageLocation>;

    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;

    /// Whether the page declares a Content-Security-Policy meta tag.
    fn has_csp_meta(&self) -> bool;

    /// Current time as an ISO-8601 UTC string.
    fn timestamp(&self) -> String {
        format_timestamp_iso(self.now_ms())
    }
}

/// Fixed environment for native hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    location: Option<PageLocation>,
    now_ms: Option<u64>,
    csp_meta: bool,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page location from a URL. Unparsable URLs clear the location.
    pub fn with_page_url(mut self, page_url: &str) -> Self {
        self.location = PageLocation::from_url(page_url);
        self
    }

    pub fn with_location(mut self, location: PageLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Pin the clock. Without this the system clock is used.
    pub fn with_now_ms(mut self, now_ms: u64) -> Self {
        self.now_ms = Some(now_ms);
        self
    }

    pub fn with_csp_meta(mut self, present: bool) -> Self {
        self.csp_meta = present;
        self
    }
}

impl PageEnvironment for StaticEnvironment {
    fn location(&self) -> Option<PageLocation> {
        self.location.clone()
    }

    fn now_ms(&self) -> u64 {
        self.now_ms.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        })
    }

    fn has_csp_meta(&self) -> bool {
        self.csp_meta
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserEnvironment;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{PageEnvironment, PageLocation};
    use crate::config::CSP_META_SELECTOR;
    use crate::utils::dom;

    /// Reads the live page through `web-sys`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserEnvironment;

    impl PageEnvironment for BrowserEnvironment {
        fn location(&self) -> Option<PageLocation> {
            Some(PageLocation::new(dom::protocol()?, dom::hostname()?))
        }

        fn now_ms(&self) -> u64 {
            dom::now_ms().max(0.0) as u64
        }

        fn has_csp_meta(&self) -> bool {
            dom::has_element(CSP_META_SELECTOR)
        }
    }
}
