//! Profiles and the per-resource profile catalog.
//!
//! A [`Profile`] is one alternative view of a resource. A [`ProfileCatalog`]
//! holds every profile a resource offers, always including the synthetic
//! `alternates` profile that lists all the others.

use serde::{Deserialize, Serialize};

use crate::errors::{NegotiationError, NegotiationResult};
use crate::{media_types, vocab};

/// Token of the synthetic alternates profile.
pub const ALTERNATES_TOKEN: &str = "alternates";

/// Short alias for [`ALTERNATES_TOKEN`], accepted in query strings.
pub const ALTERNATES_ALIAS: &str = "alt";

/// Language every profile offers.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Whether a token names the synthetic alternates profile.
pub fn is_alternates_token(token: &str) -> bool {
    token == ALTERNATES_TOKEN || token == ALTERNATES_ALIAS
}

/// Whether a media type is an internal-only pseudo type such as `_internal`.
pub fn is_internal_media_type(media_type: &str) -> bool {
    media_type.starts_with('_')
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// One alternative representation of a resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Short identifier used in query strings and Link tokens.
    pub token: String,

    /// Canonical profile URI, matched against `Accept-Profile`.
    pub uri: String,

    /// Human-readable label.
    pub label: String,

    /// Human-readable description.
    #[serde(default)]
    pub comment: String,

    /// Supported media types, in preference order.
    pub media_types: Vec<String>,

    /// Media type used when the request expresses no usable preference.
    pub default_media_type: String,

    /// Supported language tags.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Language used when the request expresses no usable preference.
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Profile {
    /// Create a profile offering the given media types in English.
    pub fn new(
        token: impl Into<String>,
        uri: impl Into<String>,
        label: impl Into<String>,
        comment: impl Into<String>,
        media_types: impl IntoIterator<Item = impl Into<String>>,
        default_media_type: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            uri: uri.into(),
            label: label.into(),
            comment: comment.into(),
            media_types: media_types.into_iter().map(Into::into).collect(),
            default_media_type: default_media_type.into(),
            languages: vec![default_language()],
            default_language: default_language(),
        }
    }

    /// Set the supported languages and the default language.
    pub fn with_languages(
        mut self,
        languages: impl IntoIterator<Item = impl Into<String>>,
        default_language: impl Into<String>,
    ) -> Self {
        self.languages = languages.into_iter().map(Into::into).collect();
        self.default_language = default_language.into();
        self
    }

    /// The synthetic profile listing every other representation.
    pub fn alternates() -> Self {
        let mut media = vec![
            media_types::HTML.to_string(),
            media_types::JSON.to_string(),
        ];
        media.extend(media_types::RDF_MEDIA_TYPES.iter().map(|m| m.to_string()));

        Self::new(
            ALTERNATES_TOKEN,
            vocab::ALTERNATES_PROFILE_URI,
            "Alternate Representations",
            "The representation of the resource that lists all other representations (profiles and Media Types)",
            media,
            media_types::HTML,
        )
    }

    /// Whether this is the synthetic alternates profile.
    pub fn is_alternates(&self) -> bool {
        is_alternates_token(&self.token)
    }

    /// Whether the profile offers a media type.
    pub fn supports_media_type(&self, media_type: &str) -> bool {
        self.media_types.iter().any(|m| m == media_type)
    }

    /// Find the offered media type matching a requested one, ignoring ASCII
    /// case. Internal pseudo types never match.
    pub fn find_media_type(&self, media_type: &str) -> Option<&str> {
        self.public_media_types()
            .find(|m| m.eq_ignore_ascii_case(media_type))
    }

    /// Find the offered language matching a tag, ignoring ASCII case.
    pub fn find_language(&self, language: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|l| l.eq_ignore_ascii_case(language))
            .map(String::as_str)
    }

    /// Media types that may appear in Link headers and alternates listings.
    pub fn public_media_types(&self) -> impl Iterator<Item = &str> {
        self.media_types
            .iter()
            .map(String::as_str)
            .filter(|m| !is_internal_media_type(m))
    }

    /// Fill in implied values (`en` is always offered).
    fn normalized(mut self) -> Self {
        if self.default_language.is_empty() {
            self.default_language = default_language();
        }
        if self.find_language(DEFAULT_LANGUAGE).is_none() {
            self.languages.push(default_language());
        }
        if self.find_language(&self.default_language).is_none() {
            self.languages.push(self.default_language.clone());
        }
        self
    }

    fn validate(&self) -> NegotiationResult<()> {
        if self.token.trim().is_empty() {
            return Err(NegotiationError::invalid_profile(
                &self.token,
                "token must not be empty",
            ));
        }
        if self.uri.trim().is_empty() {
            return Err(NegotiationError::invalid_profile(
                &self.token,
                "uri must not be empty",
            ));
        }
        if self.media_types.is_empty() {
            return Err(NegotiationError::invalid_profile(
                &self.token,
                "at least one media type is required",
            ));
        }
        if let Some(dup) = first_duplicate(&self.media_types) {
            return Err(NegotiationError::invalid_profile(
                &self.token,
                format!("media type {} is listed more than once", dup),
            ));
        }
        if let Some(dup) = first_duplicate(&self.languages) {
            return Err(NegotiationError::invalid_profile(
                &self.token,
                format!("language {} is listed more than once", dup),
            ));
        }
        if !self.supports_media_type(&self.default_media_type) {
            return Err(NegotiationError::invalid_profile(
                &self.token,
                format!(
                    "default media type {} is not one of its media types ({})",
                    self.default_media_type,
                    self.media_types.join(", ")
                ),
            ));
        }
        Ok(())
    }
}

/// First value repeated in a list, ignoring ASCII case.
fn first_duplicate(values: &[String]) -> Option<&str> {
    values.iter().enumerate().find_map(|(i, v)| {
        values[..i]
            .iter()
            .any(|earlier| earlier.eq_ignore_ascii_case(v))
            .then_some(v.as_str())
    })
}

/// The set of profiles offered by one resource.
///
/// Built once per request and immutable afterwards. Profiles keep the order
/// they were supplied in; the alternates profile is always last.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
    default_token: String,
}

impl ProfileCatalog {
    /// Build a catalog from caller-supplied profiles and a default token.
    ///
    /// Fails if a caller profile uses a reserved token, if tokens or URIs
    /// collide, or if the default token is reserved or unknown.
    pub fn new(
        profiles: impl IntoIterator<Item = Profile>,
        default_token: impl Into<String>,
    ) -> NegotiationResult<Self> {
        let default_token = default_token.into();
        let mut catalog: Vec<Profile> = Vec::new();

        for profile in profiles {
            if is_alternates_token(&profile.token) {
                return Err(NegotiationError::ReservedProfileToken(profile.token));
            }
            let profile = profile.normalized();
            profile.validate()?;

            if catalog.iter().any(|p| p.token == profile.token) {
                return Err(NegotiationError::invalid_profile(
                    &profile.token,
                    "token is used by more than one profile",
                ));
            }
            if let Some(other) = catalog.iter().find(|p| p.uri == profile.uri) {
                return Err(NegotiationError::invalid_profile(
                    &profile.token,
                    format!("uri {} is already used by profile '{}'", profile.uri, other.token),
                ));
            }
            catalog.push(profile);
        }

        if is_alternates_token(&default_token) {
            return Err(NegotiationError::DefaultProfileInvalid {
                token: default_token,
                reason: "the alternates profile cannot be the default profile".to_string(),
            });
        }
        if !catalog.iter().any(|p| p.token == default_token) {
            let available: Vec<&str> = catalog.iter().map(|p| p.token.as_str()).collect();
            return Err(NegotiationError::DefaultProfileInvalid {
                reason: format!(
                    "it is not in the list of supplied profiles ({})",
                    available.join(", ")
                ),
                token: default_token,
            });
        }

        let alternates = Profile::alternates();
        if let Some(clash) = catalog.iter().find(|p| p.uri == alternates.uri) {
            return Err(NegotiationError::invalid_profile(
                &clash.token,
                "uri is reserved for the alternates profile",
            ));
        }
        catalog.push(alternates);

        Ok(Self {
            profiles: catalog,
            default_token,
        })
    }

    /// Token of the default profile.
    pub fn default_token(&self) -> &str {
        &self.default_token
    }

    /// The default profile.
    pub fn default_profile(&self) -> &Profile {
        self.get(&self.default_token)
            .unwrap_or_else(|| self.alternates())
    }

    /// The synthetic alternates profile.
    pub fn alternates(&self) -> &Profile {
        // Always present: pushed last by the constructor.
        &self.profiles[self.profiles.len() - 1]
    }

    /// Look up a profile by token. `alt` resolves to the alternates profile.
    pub fn get(&self, token: &str) -> Option<&Profile> {
        if is_alternates_token(token) {
            return Some(self.alternates());
        }
        self.profiles.iter().find(|p| p.token == token)
    }

    /// Look up a profile by its URI.
    pub fn find_by_uri(&self, uri: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.uri == uri)
    }

    /// Whether a token names a profile in this catalog.
    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// All profiles, caller profiles first and alternates last.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// All tokens in catalog order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.token.as_str())
    }

    /// Number of profiles including alternates.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// A catalog always holds at least the default and alternates profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turtle_profile(token: &str, uri: &str) -> Profile {
        Profile::new(
            token,
            uri,
            token.to_uppercase(),
            "",
            ["text/turtle", "application/rdf+xml"],
            "text/turtle",
        )
    }

    #[test]
    fn test_alternates_injected_last() {
        let catalog =
            ProfileCatalog::new(vec![turtle_profile("dct", "http://purl.org/dc/terms/")], "dct")
                .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.alternates().token, ALTERNATES_TOKEN);
        assert_eq!(catalog.profiles().last().unwrap().token, ALTERNATES_TOKEN);
        assert!(catalog.contains("alt"));
        assert!(catalog.contains("alternates"));
    }

    #[test]
    fn test_reserved_tokens_rejected() {
        for token in ["alternates", "alt"] {
            let err = ProfileCatalog::new(vec![turtle_profile(token, "http://x.com")], "x")
                .unwrap_err();
            assert_eq!(err, NegotiationError::ReservedProfileToken(token.to_string()));
        }
    }

    #[test]
    fn test_default_cannot_be_alternates() {
        let err = ProfileCatalog::new(vec![turtle_profile("a", "http://a.com")], "alternates")
            .unwrap_err();
        assert!(matches!(err, NegotiationError::DefaultProfileInvalid { .. }));
    }

    #[test]
    fn test_default_must_exist() {
        let err =
            ProfileCatalog::new(vec![turtle_profile("a", "http://a.com")], "b").unwrap_err();
        match err {
            NegotiationError::DefaultProfileInvalid { token, reason } => {
                assert_eq!(token, "b");
                assert!(reason.contains("(a)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_token_and_uri_rejected() {
        let dup_token = ProfileCatalog::new(
            vec![
                turtle_profile("a", "http://a.com"),
                turtle_profile("a", "http://b.com"),
            ],
            "a",
        );
        assert!(matches!(dup_token, Err(NegotiationError::InvalidProfile { .. })));

        let dup_uri = ProfileCatalog::new(
            vec![
                turtle_profile("a", "http://a.com"),
                turtle_profile("b", "http://a.com"),
            ],
            "a",
        );
        assert!(matches!(dup_uri, Err(NegotiationError::InvalidProfile { .. })));
    }

    #[test]
    fn test_duplicate_media_type_and_language_rejected() {
        let dup_media = Profile::new(
            "a",
            "http://a.com",
            "A",
            "",
            ["text/turtle", "Text/Turtle"],
            "text/turtle",
        );
        let err = ProfileCatalog::new(vec![dup_media], "a").unwrap_err();
        assert!(matches!(err, NegotiationError::InvalidProfile { .. }));
        assert!(err.to_string().contains("more than once"));

        let dup_lang = turtle_profile("a", "http://a.com").with_languages(["en", "fr", "FR"], "en");
        assert!(matches!(
            ProfileCatalog::new(vec![dup_lang], "a"),
            Err(NegotiationError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn test_default_media_type_must_be_offered() {
        let profile = Profile::new("a", "http://a.com", "A", "", ["text/turtle"], "text/html");
        let err = ProfileCatalog::new(vec![profile], "a").unwrap_err();
        assert!(err.to_string().contains("text/html"));
    }

    #[test]
    fn test_english_always_offered() {
        let profile = turtle_profile("a", "http://a.com").with_languages(["pl"], "pl");
        let catalog = ProfileCatalog::new(vec![profile], "a").unwrap();
        let a = catalog.get("a").unwrap();
        assert_eq!(a.languages, vec!["pl".to_string(), "en".to_string()]);
        assert_eq!(a.default_language, "pl");
        assert_eq!(a.find_language("EN"), Some("en"));
    }

    #[test]
    fn test_find_by_uri() {
        let catalog = ProfileCatalog::new(
            vec![
                turtle_profile("a", "http://a.com"),
                turtle_profile("b", "http://b.com"),
            ],
            "a",
        )
        .unwrap();
        assert_eq!(catalog.find_by_uri("http://b.com").unwrap().token, "b");
        assert_eq!(
            catalog.find_by_uri(vocab::ALTERNATES_PROFILE_URI).unwrap().token,
            ALTERNATES_TOKEN
        );
        assert!(catalog.find_by_uri("http://c.com").is_none());
    }

    #[test]
    fn test_public_media_types_skip_internal() {
        let profile = Profile::new(
            "a",
            "http://a.com",
            "A",
            "",
            ["text/html", "_internal"],
            "text/html",
        );
        let public: Vec<&str> = profile.public_media_types().collect();
        assert_eq!(public, vec!["text/html"]);
    }

    #[test]
    fn test_profile_from_yaml_defaults() {
        let yaml = r#"
token: dct
uri: http://purl.org/dc/terms/
label: Dublin Core
media_types: [text/html, text/turtle]
default_media_type: text/html
"#;
        let profile: Profile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(profile.default_language, "en");
        assert!(profile.languages.is_empty());

        let catalog = ProfileCatalog::new(vec![profile], "dct").unwrap();
        assert_eq!(catalog.get("dct").unwrap().languages, vec!["en".to_string()]);
    }
}
