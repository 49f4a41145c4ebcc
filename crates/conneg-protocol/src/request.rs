//! Raw negotiation inputs extracted from an HTTP request.

/// Query-string key selecting a profile.
pub const QSA_PROFILE: &str = "_profile";
/// Older alias of [`QSA_PROFILE`].
pub const QSA_VIEW: &str = "_view";
/// Query-string key selecting a media type.
pub const QSA_MEDIA_TYPE: &str = "_mediatype";
/// Older alias of [`QSA_MEDIA_TYPE`].
pub const QSA_FORMAT: &str = "_format";
/// Query-string key selecting a language.
pub const QSA_LANG: &str = "_lang";

/// The six preference-carrying inputs of one request, unparsed.
///
/// Framework glue fills this from the query string and headers; the engine
/// never sees a framework request type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegotiationRequest {
    /// `_profile` (or `_view`) query value.
    pub profile: Option<String>,
    /// `_mediatype` (or `_format`) query value, form-decoded.
    pub media_type: Option<String>,
    /// `_lang` query value.
    pub language: Option<String>,
    /// `Accept-Profile` header.
    pub accept_profile: Option<String>,
    /// `Accept` header.
    pub accept: Option<String>,
    /// `Accept-Language` header.
    pub accept_language: Option<String>,
}

impl NegotiationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the query-string selectors from decoded key/value pairs.
    ///
    /// When both a key and its alias are present the primary key
    /// (`_profile`, `_mediatype`) wins; otherwise the first occurrence wins.
    pub fn from_query_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = Self::default();
        let mut view = None;
        let mut format = None;

        for (key, value) in pairs {
            let value = value.as_ref();
            let slot = match key.as_ref() {
                QSA_PROFILE => &mut request.profile,
                QSA_VIEW => &mut view,
                QSA_MEDIA_TYPE => &mut request.media_type,
                QSA_FORMAT => &mut format,
                QSA_LANG => &mut request.language,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }

        request.profile = request.profile.or(view);
        request.media_type = request.media_type.or(format);
        request
    }

    pub fn with_profile(mut self, value: impl Into<String>) -> Self {
        self.profile = Some(value.into());
        self
    }

    pub fn with_media_type(mut self, value: impl Into<String>) -> Self {
        self.media_type = Some(value.into());
        self
    }

    pub fn with_language(mut self, value: impl Into<String>) -> Self {
        self.language = Some(value.into());
        self
    }

    pub fn with_accept_profile(mut self, value: impl Into<String>) -> Self {
        self.accept_profile = Some(value.into());
        self
    }

    pub fn with_accept(mut self, value: impl Into<String>) -> Self {
        self.accept = Some(value.into());
        self
    }

    pub fn with_accept_language(mut self, value: impl Into<String>) -> Self {
        self.accept_language = Some(value.into());
        self
    }

    /// A request that forces every default through the internal channel,
    /// used when one resource embeds another's representation.
    pub fn internal() -> Self {
        Self::new()
            .with_profile(crate::preferences::INTERNAL)
            .with_media_type(crate::preferences::INTERNAL)
            .with_language(crate::preferences::INTERNAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_pairs_primary_keys() {
        let req = NegotiationRequest::from_query_pairs([
            ("_profile", "dct"),
            ("_mediatype", "text/turtle"),
            ("_lang", "pl"),
            ("page", "2"),
        ]);
        assert_eq!(req.profile.as_deref(), Some("dct"));
        assert_eq!(req.media_type.as_deref(), Some("text/turtle"));
        assert_eq!(req.language.as_deref(), Some("pl"));
        assert!(req.accept.is_none());
    }

    #[test]
    fn test_from_query_pairs_aliases() {
        let req = NegotiationRequest::from_query_pairs([("_view", "alternates"), ("_format", "text/html")]);
        assert_eq!(req.profile.as_deref(), Some("alternates"));
        assert_eq!(req.media_type.as_deref(), Some("text/html"));
    }

    #[test]
    fn test_primary_key_beats_alias() {
        let req = NegotiationRequest::from_query_pairs([
            ("_view", "old"),
            ("_profile", "new"),
            ("_format", "text/xml"),
            ("_mediatype", "text/html"),
        ]);
        assert_eq!(req.profile.as_deref(), Some("new"));
        assert_eq!(req.media_type.as_deref(), Some("text/html"));
    }

    #[test]
    fn test_internal_request() {
        let req = NegotiationRequest::internal();
        assert_eq!(req.profile.as_deref(), Some("_internal"));
        assert_eq!(req.media_type.as_deref(), Some("_internal"));
        assert_eq!(req.language.as_deref(), Some("_internal"));
    }
}
