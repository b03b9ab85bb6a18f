//! Library configuration.
//!
//! Centralizes the constants used by the validator: log capacity, evidence
//! limits, URL scheme allow-list, report texts and the default signatures.

use crate::models::Severity;

// =============================================================================
// Violation Log
// =============================================================================

/// Maximum number of violations kept in memory. Oldest entries are evicted first.
pub const MAX_VIOLATIONS: usize = 50;

/// Violation kind recorded for `securitypolicyviolation` events.
pub const CSP_VIOLATION_KIND: &str = "csp";

// =============================================================================
// Content Validation
// =============================================================================

/// Maximum number of matched substrings reported per issue.
pub const MAX_MATCHES_PER_ISSUE: usize = 3;

/// A signature definition: `(name, pattern, severity)`.
pub type SignatureDef = (&'static str, &'static str, Severity);

/// Built-in suspicious-content signatures, in reporting order.
///
/// Written to match how browsers evaluate the same expressions as
/// non-Unicode `/gi` regexes:
/// - keywords fold case over ASCII only (`(?i-u:...)`), so `ſ` is not `s`
/// - "any character" excludes every line terminator: `\n`, `\r`, U+2028, U+2029
/// - whitespace is the ECMAScript set, which has U+FEFF and lacks U+0085
/// - word characters are ASCII (`[[:word:]]`)
pub const DEFAULT_SIGNATURES: &[SignatureDef] = &[
    (
        "script-tag",
        r"(?i-u:<script)[^>]*>[^\n\r\u{2028}\u{2029}]*?(?i-u:</script>)",
        Severity::Medium,
    ),
    ("javascript-uri", r"(?i-u:javascript:)", Severity::Medium),
    (
        "event-handler",
        r"(?i-u:on)[[:word:]]+[\t\n\x0B\x0C\r \u{A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}]*=",
        Severity::Medium,
    ),
    ("data-html-uri", r"(?i-u:data:text/html)", Severity::Medium),
    ("vbscript-uri", r"(?i-u:vbscript:)", Severity::Medium),
];

// =============================================================================
// URL and Context Checks
// =============================================================================

/// URL schemes accepted by `is_valid_url` (as produced by the URL parser).
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Page protocol considered secure transport.
pub const SECURE_PROTOCOL: &str = "https:";

/// Hostname treated as a secure context regardless of protocol.
pub const LOOPBACK_HOST: &str = "localhost";

/// Selector for a Content-Security-Policy declaration in page metadata.
pub const CSP_META_SELECTOR: &str = r#"meta[http-equiv="Content-Security-Policy"]"#;

// =============================================================================
// Tokens
// =============================================================================

/// Number of random bytes in a generated token (hex output is twice as long).
pub const TOKEN_BYTES: usize = 16;

// =============================================================================
// Report Texts
// =============================================================================

/// Recommendation texts used in security reports.
pub mod recommendations {
    pub const USE_HTTPS: &str = "Consider using HTTPS for better security";
    pub const REVIEW_VIOLATIONS: &str = "Review and address security policy violations";
    pub const ADD_CSP: &str = "Consider implementing Content Security Policy";
}

/// Log target for records emitted by this crate.
pub const LOG_TARGET: &str = "pageguard";
