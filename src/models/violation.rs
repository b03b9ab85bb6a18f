//! Policy violation records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An externally reported policy breach, such as a CSP violation.
///
/// Field names follow the shape browsers use for violation reports so that
/// objects coming from JavaScript deserialize directly. Deserialization
/// never fails: a missing `type` becomes empty, fields beyond the modeled
/// ones are kept in `extra`, and non-object input yields an empty record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct Violation {
    /// Violation kind (e.g. `csp`)
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violated_directive: Option<String>,
    #[serde(rename = "blockedURI", skip_serializing_if = "Option::is_none")]
    pub blocked_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// ISO-8601 time the violation was observed. Stamped on logging if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Detail fields not modeled above (e.g. `lineNumber`, `originalPolicy`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Violation {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            violated_directive: None,
            blocked_uri: None,
            source_file: None,
            timestamp: None,
            extra: Map::new(),
        }
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.violated_directive = Some(directive.into());
        self
    }

    pub fn with_blocked_uri(mut self, uri: impl Into<String>) -> Self {
        self.blocked_uri = Some(uri.into());
        self
    }

    pub fn with_source_file(mut self, file: impl Into<String>) -> Self {
        self.source_file = Some(file.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// True if no usable timestamp is set (absent or empty).
    pub fn needs_timestamp(&self) -> bool {
        self.timestamp.as_deref().is_none_or(str::is_empty)
    }
}

impl From<Value> for Violation {
    fn from(value: Value) -> Self {
        let mut violation = Self::new("");
        let Value::Object(fields) = value else {
            return violation;
        };

        for (key, value) in fields {
            let slot = match key.as_str() {
                "type" => None,
                "violatedDirective" => Some(&mut violation.violated_directive),
                "blockedURI" => Some(&mut violation.blocked_uri),
                "sourceFile" => Some(&mut violation.source_file),
                "timestamp" => Some(&mut violation.timestamp),
                _ => {
                    violation.extra.insert(key, value);
                    continue;
                }
            };
            // Modeled fields are strings; other scalars keep their JSON text.
            let text = match value {
                Value::Null => continue,
                Value::String(text) => text,
                other => other.to_string(),
            };
            match slot {
                Some(slot) => *slot = Some(text),
                None => violation.kind = text,
            }
        }
        violation
    }
}
