//! Preference parsing for query-string arguments and HTTP headers.
//!
//! Every source is a comma-separated list whose elements may carry a
//! `q=<weight>` parameter (RFC 7231 section 5.3.1). Parsing yields a
//! [`PreferenceList`]: identifiers ordered by weight, highest first, with ties
//! kept in request order.

use std::cmp::Ordering;

use crate::errors::{NegotiationError, NegotiationResult, PreferenceSource};

/// Sentinel query-string value asking for the default, for internal use.
pub const INTERNAL: &str = "_internal";

/// A single weighted preference.
#[derive(Debug, Clone, PartialEq)]
pub struct Preference {
    /// Profile URI, profile token, media type or language tag.
    pub value: String,
    /// Relative weight in `(0, 1]`.
    pub weight: f32,
}

/// Identifiers from one source, ordered by descending weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceList {
    entries: Vec<Preference>,
}

impl PreferenceList {
    /// Build from unsorted entries. Sorting is stable so equal weights keep
    /// their original order.
    pub fn from_entries(mut entries: Vec<Preference>) -> Self {
        entries.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
        Self { entries }
    }

    /// Entries with their weights.
    pub fn entries(&self) -> &[Preference] {
        &self.entries
    }

    /// Identifiers in preference order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A query-string selector: either explicit candidates or the `_internal`
/// sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum QuerySelection<T> {
    /// Use the default, and flag the result as internal.
    Internal,
    /// Candidates in preference order.
    Candidates(T),
}

/// A profile candidate from the `_profile` query argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCandidate {
    /// `<uri>` form, matched against profile URIs.
    Uri(String),
    /// Bare form, matched against profile tokens.
    Token(String),
}

/// Split one list element into its value and the weight from `q=`.
///
/// Returns `Ok(None)` for an empty element.
fn parse_element(
    element: &str,
    source: PreferenceSource,
) -> NegotiationResult<Option<Preference>> {
    let element = element.trim();
    if element.is_empty() {
        return Ok(None);
    }

    // Bracketed URIs may themselves contain ';', so split after the closing '>'.
    let split_at = if element.starts_with('<') {
        element
            .find('>')
            .and_then(|end| element[end..].find(';').map(|i| end + i))
    } else {
        element.find(';')
    };
    let (value, params) = match split_at {
        Some(i) => (element[..i].trim(), &element[i + 1..]),
        None => (element, ""),
    };

    if value.is_empty() {
        return Err(NegotiationError::malformed(
            source,
            format!("'{}' has no value before its parameters", element),
        ));
    }

    let mut weight = 1.0_f32;
    for param in params.split(';') {
        let param = param.trim();
        let Some((name, raw)) = param.split_once('=') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case("q") {
            // Other parameters (charset, Chrome's v=b3, ...) do not affect ordering.
            continue;
        }
        let raw = raw.trim();
        weight = raw.parse::<f32>().map_err(|_| {
            NegotiationError::malformed(source, format!("weight '{}' is not a number", raw))
        })?;
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(NegotiationError::malformed(
                source,
                format!("weight '{}' is outside 0..1", raw),
            ));
        }
    }

    Ok(Some(Preference {
        value: value.to_string(),
        weight,
    }))
}

/// Parse a comma-separated, `q`-weighted list.
///
/// Elements weighted `q=0` are not acceptable and are dropped. A list with no
/// non-empty element is malformed.
pub fn parse_weighted_list(
    raw: &str,
    source: PreferenceSource,
) -> NegotiationResult<PreferenceList> {
    let mut entries = Vec::new();
    let mut seen_any = false;

    for element in raw.split(',') {
        if let Some(pref) = parse_element(element, source)? {
            seen_any = true;
            if pref.weight > 0.0 {
                entries.push(pref);
            }
        }
    }

    if !seen_any {
        return Err(NegotiationError::malformed(source, "no values given"));
    }

    Ok(PreferenceList::from_entries(entries))
}

fn strip_brackets(value: &str) -> Option<&str> {
    value
        .strip_prefix('<')
        .and_then(|v| v.strip_suffix('>'))
        .map(str::trim)
}

/// Treat absent and blank values alike.
fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse the `_profile` / `_view` query argument.
///
/// `<uri>` elements are profile URIs; bare elements are tokens passed
/// through unchanged.
pub fn parse_profile_query(
    raw: Option<&str>,
) -> NegotiationResult<Option<QuerySelection<Vec<ProfileCandidate>>>> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    if raw == INTERNAL {
        return Ok(Some(QuerySelection::Internal));
    }

    let list = parse_weighted_list(raw, PreferenceSource::ProfileQuery)?;
    let mut candidates = Vec::with_capacity(list.len());
    for value in list.values() {
        if value.starts_with('<') {
            let uri = strip_brackets(value).ok_or_else(|| {
                NegotiationError::malformed(
                    PreferenceSource::ProfileQuery,
                    format!("'{}' is missing its closing '>'", value),
                )
            })?;
            candidates.push(ProfileCandidate::Uri(uri.to_string()));
        } else {
            candidates.push(ProfileCandidate::Token(value.to_string()));
        }
    }

    Ok(Some(QuerySelection::Candidates(candidates)))
}

/// Parse the `_mediatype` / `_format` query argument.
///
/// Form decoding turns the `+` of `application/rdf+xml` into a space, so
/// spaces are turned back into `+`.
pub fn parse_media_type_query(
    raw: Option<&str>,
) -> NegotiationResult<Option<QuerySelection<PreferenceList>>> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    let normalized = raw.replace(' ', "+");
    let list = parse_weighted_list(&normalized, PreferenceSource::MediaTypeQuery)?;
    if list.values().next() == Some(INTERNAL) {
        return Ok(Some(QuerySelection::Internal));
    }
    Ok(Some(QuerySelection::Candidates(list)))
}

/// Parse the `_lang` query argument.
pub fn parse_language_query(
    raw: Option<&str>,
) -> NegotiationResult<Option<QuerySelection<PreferenceList>>> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    let list = parse_weighted_list(raw, PreferenceSource::LanguageQuery)?;
    if list.values().next() == Some(INTERNAL) {
        return Ok(Some(QuerySelection::Internal));
    }
    Ok(Some(QuerySelection::Candidates(list)))
}

/// Parse an `Accept-Profile` header into profile URIs.
///
/// Every element must be a bracketed URI. A blank header is treated as absent.
pub fn parse_accept_profile(raw: Option<&str>) -> NegotiationResult<Option<Vec<String>>> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    let list = parse_weighted_list(raw, PreferenceSource::AcceptProfile)?;
    let uris = list
        .values()
        .map(|value| {
            strip_brackets(value).map(str::to_string).ok_or_else(|| {
                NegotiationError::malformed(
                    PreferenceSource::AcceptProfile,
                    format!("profile '{}' must be enclosed in <>", value),
                )
            })
        })
        .collect::<NegotiationResult<Vec<_>>>()?;
    Ok(Some(uris))
}

/// Parse an `Accept` header into media types. A blank header is treated as absent.
pub fn parse_accept(raw: Option<&str>) -> NegotiationResult<Option<PreferenceList>> {
    non_blank(raw).map(|raw| parse_weighted_list(raw, PreferenceSource::Accept))
        .transpose()
}

/// Parse an `Accept-Language` header into language tags. A blank header is
/// treated as absent.
pub fn parse_accept_language(raw: Option<&str>) -> NegotiationResult<Option<PreferenceList>> {
    non_blank(raw).map(|raw| parse_weighted_list(raw, PreferenceSource::AcceptLanguage))
        .transpose()
}
