//! Data models shared by the validator and its bindings.
//!
//! Contains domain types for:
//! - [`ValidationResult`], [`ValidationIssue`], [`Severity`] - Content validation outcomes
//! - [`FormValidation`], [`FieldIssue`] - Per-field form validation outcomes
//! - [`Violation`] - Externally reported policy violations
//! - [`SecurityReport`], [`Recommendation`] - Point-in-time security snapshots

mod report;
mod validation;
mod violation;

pub use report::{Recommendation, SecurityReport};
pub use validation::{FieldIssue, FormValidation, Severity, ValidationIssue, ValidationResult};
pub use violation::Violation;
