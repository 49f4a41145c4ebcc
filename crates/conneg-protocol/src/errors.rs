//! Negotiation error types.

use std::fmt;

use thiserror::Error;

/// Result type alias using NegotiationError.
pub type NegotiationResult<T> = Result<T, NegotiationError>;

/// Where a preference list was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceSource {
    /// `_profile` / `_view` query-string argument.
    ProfileQuery,
    /// `_mediatype` / `_format` query-string argument.
    MediaTypeQuery,
    /// `_lang` query-string argument.
    LanguageQuery,
    /// `Accept-Profile` request header.
    AcceptProfile,
    /// `Accept` request header.
    Accept,
    /// `Accept-Language` request header.
    AcceptLanguage,
}

impl PreferenceSource {
    /// Whether this source is a query-string argument rather than a header.
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            PreferenceSource::ProfileQuery
                | PreferenceSource::MediaTypeQuery
                | PreferenceSource::LanguageQuery
        )
    }
}

impl fmt::Display for PreferenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PreferenceSource::ProfileQuery => "_profile query argument",
            PreferenceSource::MediaTypeQuery => "_mediatype query argument",
            PreferenceSource::LanguageQuery => "_lang query argument",
            PreferenceSource::AcceptProfile => "Accept-Profile header",
            PreferenceSource::Accept => "Accept header",
            PreferenceSource::AcceptLanguage => "Accept-Language header",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while building a catalog or negotiating a request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NegotiationError {
    /// A caller-supplied profile used a token the engine reserves.
    #[error("You must not manually add a profile with token '{0}' as this is auto-created")]
    ReservedProfileToken(String),

    /// The designated default profile cannot be used.
    #[error("The default profile '{token}' is invalid: {reason}")]
    DefaultProfileInvalid { token: String, reason: String },

    /// A preference list could not be parsed.
    #[error("You have requested a representation using an incorrectly formatted {origin}: {reason}")]
    MalformedPreferenceHeader {
        origin: PreferenceSource,
        reason: String,
    },

    /// A profile definition is inconsistent.
    #[error("Profile '{token}' is invalid: {reason}")]
    InvalidProfile { token: String, reason: String },

    /// Writing a representation failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl NegotiationError {
    pub(crate) fn malformed(origin: PreferenceSource, reason: impl Into<String>) -> Self {
        NegotiationError::MalformedPreferenceHeader {
            origin,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_profile(token: impl Into<String>, reason: impl Into<String>) -> Self {
        NegotiationError::InvalidProfile {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            NegotiationError::ReservedProfileToken(_)
            | NegotiationError::DefaultProfileInvalid { .. }
            | NegotiationError::MalformedPreferenceHeader { .. }
            | NegotiationError::InvalidProfile { .. } => 400,
            NegotiationError::Serialization(_) => 500,
        }
    }

    /// Short machine-readable code, used as a metrics label.
    pub fn code(&self) -> &'static str {
        match self {
            NegotiationError::ReservedProfileToken(_) => "reserved_profile_token",
            NegotiationError::DefaultProfileInvalid { .. } => "default_profile_invalid",
            NegotiationError::MalformedPreferenceHeader { .. } => "malformed_preference",
            NegotiationError::InvalidProfile { .. } => "invalid_profile",
            NegotiationError::Serialization(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for NegotiationError {
    fn from(err: serde_json::Error) -> Self {
        NegotiationError::Serialization(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            NegotiationError::ReservedProfileToken("alt".to_string()).status_code(),
            400
        );
        assert_eq!(
            NegotiationError::malformed(PreferenceSource::Accept, "bad q").status_code(),
            400
        );
        assert_eq!(
            NegotiationError::Serialization("boom".to_string()).status_code(),
            500
        );
    }

    #[test]
    fn test_malformed_names_source() {
        let err = NegotiationError::malformed(PreferenceSource::AcceptProfile, "missing <>");
        let display = err.to_string();
        assert!(display.contains("Accept-Profile header"));
        assert!(display.contains("missing <>"));
    }

    #[test]
    fn test_reserved_token_display() {
        let err = NegotiationError::ReservedProfileToken("alternates".to_string());
        assert!(err.to_string().contains("'alternates'"));
    }

    #[test]
    fn test_source_is_query() {
        assert!(PreferenceSource::ProfileQuery.is_query());
        assert!(PreferenceSource::LanguageQuery.is_query());
        assert!(!PreferenceSource::Accept.is_query());
        assert!(!PreferenceSource::AcceptProfile.is_query());
    }
}
