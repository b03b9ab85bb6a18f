//! The content validator.

use std::borrow::Borrow;

use parking_lot::Mutex;
use serde_json::Value;

use super::env::PageEnvironment;
use super::error::Result;
use super::sanitize;
use super::signatures::SignatureSet;
use crate::config::{LOG_TARGET, LOOPBACK_HOST, MAX_VIOLATIONS, SECURE_PROTOCOL, TOKEN_BYTES};
use crate::models::{
    FieldIssue, FormValidation, Recommendation, SecurityReport, ValidationResult, Violation,
};
use crate::utils::{validate_url, RingBuffer, UrlValidation};

/// Escapes and screens untrusted content, and keeps a capped log of policy
/// violations reported by the host page.
///
/// The hosting application constructs and owns one instance. The violation
/// log is guarded by a mutex, so the validator can be shared behind an
/// `Arc` or captured by event callbacks.
pub struct ContentValidator<E: PageEnvironment> {
    env: E,
    signatures: SignatureSet,
    violations: Mutex<RingBuffer<Violation>>,
}

impl<E: PageEnvironment> ContentValidator<E> {
    /// Create a validator with the built-in signatures.
    pub fn new(env: E) -> Result<Self> {
        Ok(Self::with_signatures(env, SignatureSet::builtin()?))
    }

    /// Create a validator with a custom signature set.
    pub fn with_signatures(env: E, signatures: SignatureSet) -> Self {
        log::debug!(target: LOG_TARGET, "validator ready with {} signatures", signatures.len());
        Self {
            env,
            signatures,
            violations: Mutex::new(RingBuffer::new(MAX_VIOLATIONS)),
        }
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    pub fn signatures(&self) -> &SignatureSet {
        &self.signatures
    }

    // =========================================================================
    // Escaping and screening
    // =========================================================================

    /// See [`sanitize::sanitize_input`].
    pub fn sanitize_input(&self, input: &str) -> String {
        sanitize::sanitize_input(input)
    }

    /// Escape string values; other values pass through unchanged.
    pub fn sanitize_value(&self, value: Value) -> Value {
        sanitize::sanitize_value(value)
    }

    /// Screen `content` against every signature, in order.
    pub fn validate_content(&self, content: &str) -> ValidationResult {
        ValidationResult::from_issues(self.signatures.scan(content))
    }

    /// Screen a value. Non-string values are trivially valid.
    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        match value {
            Value::String(text) => self.validate_content(text),
            _ => ValidationResult::valid(),
        }
    }

    /// Screen every text field of a form, in entry order.
    ///
    /// Non-string values are skipped and never reported.
    pub fn validate_form_data<I, K, V>(&self, entries: I) -> FormValidation
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Borrow<Value>,
    {
        let field_issues = entries
            .into_iter()
            .filter_map(|(field, value)| {
                let value: &Value = value.borrow();
                let Value::String(text) = value else {
                    return None;
                };
                let result = self.validate_content(text);
                (!result.is_valid).then(|| FieldIssue {
                    field: field.into(),
                    issues: result.issues,
                })
            })
            .collect();
        FormValidation::from_field_issues(field_issues)
    }

    /// True iff `candidate` parses as a URL with an allowed scheme.
    pub fn is_valid_url(&self, candidate: &str) -> bool {
        self.validate_url(candidate).is_valid()
    }

    /// Like [`is_valid_url`](Self::is_valid_url), with the rejection reason.
    pub fn validate_url(&self, candidate: &str) -> UrlValidation {
        validate_url(candidate)
    }

    // =========================================================================
    // Tokens and context
    // =========================================================================

    /// 16 random bytes from the platform CSPRNG as 32 lowercase hex digits.
    pub fn generate_token(&self) -> Result<String> {
        let mut bytes = [0u8; TOKEN_BYTES];
        getrandom::getrandom(&mut bytes)?;
        Ok(hex::encode(bytes))
    }

    /// True if served over HTTPS or from `localhost`.
    pub fn is_secure_context(&self) -> bool {
        self.env
            .location()
            .is_some_and(|loc| loc.protocol == SECURE_PROTOCOL || loc.hostname == LOOPBACK_HOST)
    }

    // =========================================================================
    // Violation log
    // =========================================================================

    /// Append a violation, stamping the current time if it has none or it is empty.
    ///
    /// Once the log holds [`MAX_VIOLATIONS`] entries the oldest is dropped.
    pub fn log_violation(&self, mut violation: Violation) {
        if violation.needs_timestamp() {
            violation.timestamp = Some(self.env.timestamp());
        }
        log::warn!(
            target: LOG_TARGET,
            "security violation logged: type={} directive={} blocked={}",
            violation.kind,
            violation.violated_directive.as_deref().unwrap_or("-"),
            violation.blocked_uri.as_deref().unwrap_or("-"),
        );

        if let Some(evicted) = self.violations.lock().push(violation) {
            log::debug!(target: LOG_TARGET, "violation log full, dropped entry of type {}", evicted.kind);
        }
    }

    /// Snapshot of the violation log, oldest first.
    pub fn violations(&self) -> Vec<Violation> {
        self.violations.lock().to_vec()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.lock().len()
    }

    pub fn clear_violations(&self) {
        self.violations.lock().clear();
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Build a point-in-time report. Does not modify the log.
    pub fn security_report(&self) -> SecurityReport {
        let violations = self.violations();
        let is_secure_context = self.is_secure_context();
        let recommendations = self.recommendations(is_secure_context, !violations.is_empty());

        SecurityReport {
            timestamp: self.env.timestamp(),
            is_secure_context,
            violations,
            recommendations,
        }
    }

    fn recommendations(&self, secure: bool, has_violations: bool) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();
        if !secure {
            recommendations.push(Recommendation::UseHttps);
        }
        if has_violations {
            recommendations.push(Recommendation::ReviewViolations);
        }
        if !self.env.has_csp_meta() {
            recommendations.push(Recommendation::AddContentSecurityPolicy);
        }
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::core::env::{PageLocation, StaticEnvironment};
    use crate::models::Severity;

    const NOW: u64 = 1_704_067_200_000;

    fn validator_at(page_url: &str) -> ContentValidator<StaticEnvironment> {
        let env = StaticEnvironment::new().with_page_url(page_url).with_now_ms(NOW);
        ContentValidator::new(env).unwrap()
    }

    fn validator() -> ContentValidator<StaticEnvironment> {
        validator_at("https://example.com/")
    }

    #[test]
    fn test_empty_content_is_valid() {
        let result = validator().validate_content("");
        assert!(result.is_valid);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_script_tag_flagged_as_first_pattern() {
        let result = validator().validate_content("<script>alert(1)</script>");
        assert!(!result.is_valid);
        assert_eq!(result.issues.len(), 1);
        let issue = &result.issues[0];
        assert_eq!(issue.pattern_index, 0);
        assert_eq!(issue.label, "Suspicious pattern 1");
        assert_eq!(issue.matches, vec!["<script>alert(1)</script>"]);
        assert_eq!(issue.severity, Severity::Medium);
    }

    #[test]
    fn test_plain_text_is_valid() {
        assert!(validator().validate_content("click me").is_valid);
    }

    #[test]
    fn test_non_string_value_is_valid() {
        let v = validator();
        assert_eq!(v.validate_value(&json!(42)), ValidationResult::valid());
        assert_eq!(v.validate_value(&json!(["<script>x</script>"])), ValidationResult::valid());
        assert!(!v.validate_value(&json!("javascript:void(0)")).is_valid);
    }

    #[test]
    fn test_url_checks() {
        let v = validator();
        assert!(v.is_valid_url("https://example.com"));
        assert!(!v.is_valid_url("javascript:alert(1)"));
        assert!(!v.is_valid_url("not a url"));
    }

    #[test]
    fn test_token_format_and_uniqueness() {
        let v = validator();
        let tokens: HashSet<String> = (0..16).map(|_| v.generate_token().unwrap()).collect();
        assert_eq!(tokens.len(), 16);
        for token in &tokens {
            assert_eq!(token.len(), 32);
            assert!(token.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }

    #[test]
    fn test_secure_context() {
        assert!(validator_at("https://example.com").is_secure_context());
        assert!(validator_at("http://localhost:8080/").is_secure_context());
        assert!(!validator_at("http://example.com").is_secure_context());
        assert!(!validator_at("http://127.0.0.1/").is_secure_context());

        let no_location = ContentValidator::new(StaticEnvironment::new()).unwrap();
        assert!(!no_location.is_secure_context());

        let env = StaticEnvironment::new().with_location(PageLocation::new("HTTPS:", "example.com"));
        assert!(!ContentValidator::new(env).unwrap().is_secure_context());
    }

    #[test]
    fn test_form_data_reports_failing_text_fields() {
        let v = validator();
        let entries = vec![
            ("name", json!("<img onerror=x>")),
            ("age", json!(42)),
            ("bio", json!("hello")),
            ("link", json!("javascript:alert(1)")),
        ];
        let result = v.validate_form_data(entries);

        assert!(!result.is_valid);
        let fields: Vec<_> = result.field_issues.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "link"]);
        assert_eq!(result.field_issues[0].issues[0].pattern, "event-handler");
    }

    #[test]
    fn test_form_data_skips_non_text_values() {
        let value = json!(42);
        let result = validator().validate_form_data([("name", &value)]);
        assert!(result.is_valid);
        assert!(result.field_issues.is_empty());
    }

    #[test]
    fn test_log_keeps_most_recent_fifty() {
        let v = validator();
        for i in 1..=55 {
            v.log_violation(Violation::new("csp").with_blocked_uri(format!("https://x/{}", i)));
        }

        let log = v.violations();
        assert_eq!(log.len(), 50);
        assert_eq!(log[0].blocked_uri.as_deref(), Some("https://x/6"));
        assert_eq!(log[49].blocked_uri.as_deref(), Some("https://x/55"));
    }

    #[test]
    fn test_log_stamps_missing_timestamp_only() {
        let v = validator();
        v.log_violation(Violation::new("csp"));
        v.log_violation(Violation::new("csp").with_timestamp("2020-05-05T05:05:05.005Z"));
        v.log_violation(Violation::new("csp").with_timestamp(""));

        let log = v.violations();
        assert_eq!(log[0].timestamp.as_deref(), Some("2024-01-01T00:00:00.000Z"));
        assert_eq!(log[1].timestamp.as_deref(), Some("2020-05-05T05:05:05.005Z"));
        assert_eq!(log[2].timestamp.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_untyped_violation_keeps_details_in_report() {
        let v = validator();
        let violation: Violation =
            serde_json::from_str(r#"{"violatedDirective":"x","lineNumber":7}"#).unwrap();
        v.log_violation(violation);

        let report = serde_json::to_value(v.security_report()).unwrap();
        let logged = &report["violations"][0];
        assert_eq!(logged["violatedDirective"], "x");
        assert_eq!(logged["lineNumber"], 7);
        assert_eq!(logged["timestamp"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_clear_violations() {
        let v = validator();
        v.log_violation(Violation::new("csp"));
        v.clear_violations();
        assert_eq!(v.violation_count(), 0);
    }

    #[test]
    fn test_report_without_recommendations() {
        let env = StaticEnvironment::new()
            .with_page_url("https://example.com")
            .with_now_ms(NOW)
            .with_csp_meta(true);
        let report = ContentValidator::new(env).unwrap().security_report();

        assert_eq!(report.timestamp, "2024-01-01T00:00:00.000Z");
        assert!(report.is_secure_context);
        assert!(report.violations.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_report_with_all_recommendations() {
        let v = validator_at("http://example.com");
        v.log_violation(Violation::new("csp").with_directive("script-src"));
        let report = v.security_report();

        assert!(!report.is_secure_context);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(
            report.recommendations,
            vec![
                Recommendation::UseHttps,
                Recommendation::ReviewViolations,
                Recommendation::AddContentSecurityPolicy,
            ]
        );
        // reading the report leaves the log intact
        assert_eq!(v.violation_count(), 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let v = Arc::new(validator());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let v = Arc::clone(&v);
                std::thread::spawn(move || {
                    for i in 0..20 {
                        v.log_violation(Violation::new(format!("t{}-{}", t, i)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(v.violation_count(), MAX_VIOLATIONS);
    }
}
