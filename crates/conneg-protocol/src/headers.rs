//! Negotiation response headers.
//!
//! `Link` enumerates every profile and every (profile, media type)
//! representation of the resource; exactly one representation is tagged
//! `rel="self"`, the one being returned.

use crate::profile::{Profile, ProfileCatalog};
use crate::request::{QSA_MEDIA_TYPE, QSA_PROFILE};
use crate::resolver::Resolution;
use crate::vocab;

/// `Content-Profile` header name.
pub const CONTENT_PROFILE: &str = "Content-Profile";

/// Response headers produced by a negotiation, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeaders {
    /// `Content-Profile` value: `<profile-uri>`.
    pub content_profile: String,
    /// `Content-Type` value: the resolved media type as requested.
    pub content_type: String,
    /// `Content-Language` value.
    pub content_language: String,
    /// `Link` value.
    pub link: String,
}

impl ResponseHeaders {
    /// Build the headers for a resolution.
    pub fn build(catalog: &ProfileCatalog, instance_uri: &str, resolution: &Resolution) -> Self {
        let profile_uri = catalog
            .get(&resolution.profile)
            .map(|p| p.uri.as_str())
            .unwrap_or_default();

        let mut links = vec![format!("<{}>; rel=\"profile\"", profile_uri)];
        links.extend(profile_type_links(catalog));
        links.extend(representation_links(catalog, instance_uri, resolution));

        Self {
            content_profile: format!("<{}>", profile_uri),
            content_type: resolution.media_type.clone(),
            content_language: resolution.language.clone(),
            link: links.join(", "),
        }
    }

    /// All headers as name/value pairs, including the permissive CORS header.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Link", self.link.as_str()),
            (CONTENT_PROFILE, self.content_profile.as_str()),
            ("Content-Type", self.content_type.as_str()),
            ("Content-Language", self.content_language.as_str()),
            ("Access-Control-Allow-Origin", "*"),
        ]
    }
}

/// One `rel="type"` descriptor per profile, carrying its token.
fn profile_type_links(catalog: &ProfileCatalog) -> impl Iterator<Item = String> + '_ {
    catalog.profiles().iter().map(|p| {
        format!(
            "<{}>; rel=\"type\"; token=\"{}\"; anchor=<{}>",
            vocab::PROF_PROFILE,
            p.token,
            p.uri
        )
    })
}

/// One entry per (profile, public media type).
fn representation_links<'a>(
    catalog: &'a ProfileCatalog,
    instance_uri: &'a str,
    resolution: &'a Resolution,
) -> impl Iterator<Item = String> + 'a {
    catalog.profiles().iter().flat_map(move |p| {
        p.public_media_types().map(move |media_type| {
            let rel = if is_self(p, media_type, resolution) {
                "self"
            } else {
                "alternate"
            };
            format!(
                "<{}>; rel=\"{}\"; type=\"{}\"; profile=\"{}\"",
                representation_uri(instance_uri, &p.token, media_type),
                rel,
                media_type,
                p.uri
            )
        })
    })
}

fn is_self(profile: &Profile, media_type: &str, resolution: &Resolution) -> bool {
    profile.token == resolution.profile && media_type == resolution.media_type
}

/// URI selecting one representation through the query string.
pub fn representation_uri(instance_uri: &str, token: &str, media_type: &str) -> String {
    let sep = if instance_uri.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}&{}={}",
        instance_uri, sep, QSA_PROFILE, token, QSA_MEDIA_TYPE, media_type
    )
}
