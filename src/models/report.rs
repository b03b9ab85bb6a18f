//! Security report snapshot.

use serde::{Serialize, Serializer};

use super::Violation;
use crate::config::recommendations;

/// A derived suggestion included in a [`SecurityReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// The page is not a secure context
    UseHttps,
    /// The violation log is non-empty
    ReviewViolations,
    /// No CSP meta tag is declared
    AddContentSecurityPolicy,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Self::UseHttps => recommendations::USE_HTTPS,
            Self::ReviewViolations => recommendations::REVIEW_VIOLATIONS,
            Self::AddContentSecurityPolicy => recommendations::ADD_CSP,
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Point-in-time view of the page's security posture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub timestamp: String,
    pub is_secure_context: bool,
    /// Copy of the violation log, oldest first
    pub violations: Vec<Violation>,
    pub recommendations: Vec<Recommendation>,
}
