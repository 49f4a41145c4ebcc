//! The decision procedure picking one profile, media type and language.
//!
//! Precedence for each dimension: query-string selector, then the matching
//! HTTP header, then the default. A requested value the resource does not
//! offer is skipped silently; only malformed input is an error.

use tracing::debug;

use crate::errors::NegotiationResult;
use crate::preferences::{
    self, PreferenceList, ProfileCandidate, QuerySelection,
};
use crate::profile::{Profile, ProfileCatalog};
use crate::request::NegotiationRequest;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A query-string argument.
    Query,
    /// An HTTP request header.
    Header,
    /// The profile's or catalog's default.
    Default,
    /// The default, forced through the `_internal` sentinel.
    Internal,
}

/// The resolved profile, media type and language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Token of the resolved profile (`alternates` for the synthetic one).
    pub profile: String,
    /// Resolved media type, as spelled by the profile.
    pub media_type: String,
    /// Resolved language tag, as spelled by the profile.
    pub language: String,
    /// How the profile was chosen.
    pub profile_selection: Selection,
    /// How the media type was chosen.
    pub media_type_selection: Selection,
    /// How the language was chosen.
    pub language_selection: Selection,
}

impl Resolution {
    /// Whether any dimension was forced through the `_internal` sentinel.
    pub fn is_internal(&self) -> bool {
        [
            self.profile_selection,
            self.media_type_selection,
            self.language_selection,
        ]
        .contains(&Selection::Internal)
    }
}

/// Parsed preferences of one request. Parsing happens before any decision so
/// a malformed source fails the whole negotiation.
#[derive(Debug, Default)]
struct Preferences {
    profile_query: Option<QuerySelection<Vec<ProfileCandidate>>>,
    media_type_query: Option<QuerySelection<PreferenceList>>,
    language_query: Option<QuerySelection<PreferenceList>>,
    accept_profile: Option<Vec<String>>,
    accept: Option<PreferenceList>,
    accept_language: Option<PreferenceList>,
}

impl Preferences {
    fn parse(request: &NegotiationRequest) -> NegotiationResult<Self> {
        Ok(Self {
            profile_query: preferences::parse_profile_query(request.profile.as_deref())?,
            media_type_query: preferences::parse_media_type_query(request.media_type.as_deref())?,
            language_query: preferences::parse_language_query(request.language.as_deref())?,
            accept_profile: preferences::parse_accept_profile(request.accept_profile.as_deref())?,
            accept: preferences::parse_accept(request.accept.as_deref())?,
            accept_language: preferences::parse_accept_language(
                request.accept_language.as_deref(),
            )?,
        })
    }
}

/// Resolves requests against one catalog.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a ProfileCatalog,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a ProfileCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve one request.
    pub fn resolve(&self, request: &NegotiationRequest) -> NegotiationResult<Resolution> {
        let prefs = Preferences::parse(request)?;

        let (profile, profile_selection) = self.resolve_profile(&prefs);
        debug!(
            profile = %profile.token,
            selection = ?profile_selection,
            "profile resolved"
        );

        let (media_type, media_type_selection) = resolve_media_type(profile, &prefs);
        debug!(
            media_type = %media_type,
            selection = ?media_type_selection,
            "media type resolved"
        );

        let (language, language_selection) = resolve_language(profile, &prefs);
        debug!(
            language = %language,
            selection = ?language_selection,
            "language resolved"
        );

        Ok(Resolution {
            profile: profile.token.clone(),
            media_type,
            language,
            profile_selection,
            media_type_selection,
            language_selection,
        })
    }

    fn resolve_profile(&self, prefs: &Preferences) -> (&'a Profile, Selection) {
        let catalog = self.catalog;

        match &prefs.profile_query {
            Some(QuerySelection::Internal) => {
                return (catalog.default_profile(), Selection::Internal);
            }
            Some(QuerySelection::Candidates(candidates)) => {
                let found = candidates.iter().find_map(|candidate| match candidate {
                    ProfileCandidate::Uri(uri) => catalog.find_by_uri(uri),
                    ProfileCandidate::Token(token) => catalog.get(token),
                });
                if let Some(profile) = found {
                    return (profile, Selection::Query);
                }
                debug!("no requested _profile is offered, trying Accept-Profile");
            }
            None => {}
        }

        if let Some(uris) = &prefs.accept_profile {
            if let Some(profile) = uris.iter().find_map(|uri| catalog.find_by_uri(uri)) {
                return (profile, Selection::Header);
            }
        }

        (catalog.default_profile(), Selection::Default)
    }
}

fn resolve_media_type(profile: &Profile, prefs: &Preferences) -> (String, Selection) {
    match &prefs.media_type_query {
        Some(QuerySelection::Internal) => {
            return (profile.default_media_type.clone(), Selection::Internal);
        }
        Some(QuerySelection::Candidates(list)) => {
            if let Some(found) = list.values().find_map(|m| profile.find_media_type(m)) {
                return (found.to_string(), Selection::Query);
            }
            debug!(
                profile = %profile.token,
                "requested _mediatype is not offered, falling back"
            );
        }
        None => {}
    }

    if let Some(list) = &prefs.accept {
        if let Some(found) = list.values().find_map(|m| profile.find_media_type(m)) {
            return (found.to_string(), Selection::Header);
        }
    }

    (profile.default_media_type.clone(), Selection::Default)
}

fn resolve_language(profile: &Profile, prefs: &Preferences) -> (String, Selection) {
    match &prefs.language_query {
        Some(QuerySelection::Internal) => {
            return (profile.default_language.clone(), Selection::Internal);
        }
        Some(QuerySelection::Candidates(list)) => {
            if let Some(found) = list.values().find_map(|l| profile.find_language(l)) {
                return (found.to_string(), Selection::Query);
            }
        }
        None => {}
    }

    if let Some(list) = &prefs.accept_language {
        if let Some(found) = list.values().find_map(|l| profile.find_language(l)) {
            return (found.to_string(), Selection::Header);
        }
    }

    (profile.default_language.clone(), Selection::Default)
}
