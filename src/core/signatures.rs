//! Suspicious-content signatures.
//!
//! A [`SignatureSet`] is an ordered, immutable list of compiled regular
//! expressions. Order defines the numbering used in validation reports.
//! Sets are built from [`DEFAULT_SIGNATURES`], from explicit definitions, or
//! from a versioned JSON document:
//!
//! ```json
//! {
//!   "version": 2,
//!   "signatures": [
//!     { "name": "script-tag", "pattern": "(?i)<script[^>]*>.*?</script>" },
//!     { "name": "iframe", "pattern": "(?i)<iframe", "severity": "high" }
//!   ]
//! }
//! ```

use regex::Regex;
use serde::Deserialize;

use super::error::{Result, SecurityError};
use crate::config::{DEFAULT_SIGNATURES, MAX_MATCHES_PER_ISSUE};
use crate::models::{Severity, ValidationIssue};

/// An uncompiled signature definition, as found in config documents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignatureSpec {
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub severity: Severity,
}

#[derive(Debug, Deserialize)]
struct SignatureDocument {
    #[serde(default)]
    version: u32,
    signatures: Vec<SignatureSpec>,
}

/// A compiled signature.
#[derive(Debug, Clone)]
pub struct Signature {
    name: String,
    regex: Regex,
    severity: Severity,
}

impl Signature {
    pub fn new(name: impl Into<String>, pattern: &str, severity: Severity) -> Result<Self> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|err| SecurityError::InvalidSignature {
            name: name.clone(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            name,
            regex,
            severity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// First `limit` non-overlapping matches in `content`.
    pub fn find_matches(&self, content: &str, limit: usize) -> Vec<String> {
        self.regex
            .find_iter(content)
            .take(limit)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Ordered, immutable collection of signatures.
#[derive(Debug, Clone)]
pub struct SignatureSet {
    version: u32,
    signatures: Vec<Signature>,
}

impl SignatureSet {
    /// The built-in set.
    ///
    /// Fails only if a built-in pattern does not compile, which the tests
    /// in this module rule out.
    pub fn builtin() -> Result<Self> {
        let signatures = DEFAULT_SIGNATURES
            .iter()
            .map(|(name, pattern, severity)| Signature::new(*name, pattern, *severity))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            version: 1,
            signatures,
        })
    }

    /// Compile `specs` in order.
    pub fn from_specs(version: u32, specs: &[SignatureSpec]) -> Result<Self> {
        let signatures = specs
            .iter()
            .map(|spec| Signature::new(spec.name.clone(), &spec.pattern, spec.severity))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            version,
            signatures,
        })
    }

    /// Parse and compile a JSON signature document.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: SignatureDocument = serde_json::from_str(json)?;
        Self::from_specs(doc.version, &doc.signatures)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Signature> {
        self.signatures.iter()
    }

    /// Run every signature over `content`, in order, producing one issue per
    /// signature that matched at least once.
    pub fn scan(&self, content: &str) -> Vec<ValidationIssue> {
        self.signatures
            .iter()
            .enumerate()
            .filter_map(|(index, signature)| {
                let matches = signature.find_matches(content, MAX_MATCHES_PER_ISSUE);
                (!matches.is_empty()).then(|| {
                    ValidationIssue::new(index, signature.name(), matches, signature.severity())
                })
            })
            .collect()
    }
}
