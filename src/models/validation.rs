//! Content and form validation result types.

use serde::{Deserialize, Serialize};

/// Severity level attached to a signature and the issues it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// One matched signature, with up to three matched substrings as evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Zero-based position of the signature in its set
    pub pattern_index: usize,
    /// Signature name (e.g. `script-tag`)
    pub pattern: String,
    /// Human-readable label, numbered from 1
    pub label: String,
    /// Matched substrings in match order
    pub matches: Vec<String>,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn new(
        pattern_index: usize,
        pattern: impl Into<String>,
        matches: Vec<String>,
        severity: Severity,
    ) -> Self {
        Self {
            pattern_index,
            pattern: pattern.into(),
            label: format!("Suspicious pattern {}", pattern_index + 1),
            matches,
            severity,
        }
    }
}

/// Outcome of validating a single piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// A result with no issues.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
        }
    }

    /// Build a result from collected issues. Valid iff `issues` is empty.
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }
}

/// Issues found in one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldIssue {
    pub field: String,
    pub issues: Vec<ValidationIssue>,
}

/// Outcome of validating every text field of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValidation {
    pub is_valid: bool,
    pub field_issues: Vec<FieldIssue>,
}

impl FormValidation {
    pub fn from_field_issues(field_issues: Vec<FieldIssue>) -> Self {
        Self {
            is_valid: field_issues.is_empty(),
            field_issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_label_is_one_based() {
        let issue = ValidationIssue::new(0, "script-tag", vec![], Severity::Medium);
        assert_eq!(issue.label, "Suspicious pattern 1");
        assert_eq!(issue.pattern_index, 0);
    }

    #[test]
    fn test_result_validity_follows_issues() {
        assert!(ValidationResult::from_issues(vec![]).is_valid);
        let issue = ValidationIssue::new(2, "event-handler", vec!["onclick=".into()], Severity::Medium);
        assert!(!ValidationResult::from_issues(vec![issue]).is_valid);
    }

    #[test]
    fn test_issue_serializes_camel_case() {
        let issue = ValidationIssue::new(1, "javascript-uri", vec!["javascript:".into()], Severity::Medium);
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"patternIndex\":1"));
        assert!(json.contains("\"label\":\"Suspicious pattern 2\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }

    #[test]
    fn test_form_validation_serializes_field_issues() {
        let json = serde_json::to_string(&FormValidation::from_field_issues(vec![])).unwrap();
        assert_eq!(json, r#"{"isValid":true,"fieldIssues":[]}"#);
    }
}
