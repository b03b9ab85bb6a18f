//! # pageguard
//!
//! Content screening and escaping for untrusted page input, URL and token
//! helpers, and a capped log of Content-Security-Policy violations.
//!
//! - **[`core`]** — [`ContentValidator`], signatures and the host environment seam
//! - **[`models`]** — validation results, violations and reports
//! - **[`config`]** — limits, allow-lists and the built-in signatures
//! - **[`utils`]** — ring buffer, URL validation, timestamp formatting
//! - **`bindings`** — `wasm-bindgen` exports for the browser (wasm32 only)
//!
//! ```
//! use pageguard::{ContentValidator, StaticEnvironment};
//!
//! let env = StaticEnvironment::new().with_page_url("https://example.com/");
//! let validator = ContentValidator::new(env).unwrap();
//!
//! assert_eq!(validator.sanitize_input("<b>"), "&lt;b&gt;");
//! assert!(!validator.validate_content("<script>alert(1)</script>").is_valid);
//! assert!(validator.is_secure_context());
//! ```

#[cfg(target_arch = "wasm32")]
pub mod bindings;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::{
    ContentValidator, PageEnvironment, PageLocation, Result, SecurityError, SignatureSet,
    StaticEnvironment,
};
pub use crate::models::{
    FieldIssue, FormValidation, Recommendation, SecurityReport, Severity, ValidationIssue,
    ValidationResult, Violation,
};
