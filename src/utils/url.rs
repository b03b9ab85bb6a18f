//! URL validation utilities.
//!
//! Provides scheme allow-listing for links and redirects taken from page content.

use url::Url;

use crate::config::ALLOWED_URL_SCHEMES;

/// Result of URL validation
#[derive(Debug, Clone, PartialEq)]
pub enum UrlValidation {
    /// URL parsed and uses an allowed scheme
    Valid(Url),
    /// URL is unparsable or unsafe
    Invalid(UrlValidationError),
}

impl UrlValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Reasons a URL is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlValidationError {
    /// The parser rejected the input
    Unparsable(url::ParseError),
    /// Scheme is not in the allow-list
    SchemeNotAllowed(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unparsable(err) => write!(f, "URL could not be parsed: {}", err),
            Self::SchemeNotAllowed(scheme) => write!(f, "Scheme '{}' is not allowed", scheme),
        }
    }
}

/// Validate a URL against the scheme allow-list.
///
/// The scheme comparison uses the parser's normalized (lowercase) scheme.
pub fn validate_url(candidate: &str) -> UrlValidation {
    let url = match Url::parse(candidate) {
        Ok(url) => url,
        Err(err) => return UrlValidation::Invalid(UrlValidationError::Unparsable(err)),
    };

    if !ALLOWED_URL_SCHEMES.contains(&url.scheme()) {
        let scheme = url.scheme().to_string();
        return UrlValidation::Invalid(UrlValidationError::SchemeNotAllowed(scheme));
    }

    UrlValidation::Valid(url)
}
