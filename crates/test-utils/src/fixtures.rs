//! Common test fixtures for negotiation tests.
//!
//! Three caller profiles cover the usual scenarios: an RDF-heavy profile with
//! a non-HTML default, a single-format profile, and an HTML-first profile.

use conneg_protocol::{media_types, Profile, ProfileCatalog};

/// URIs of the fixture profiles.
pub mod uris {
    pub const AGOR: &str = "http://agor.com";
    pub const FAKE: &str = "http://fake.com";
    pub const OTHER: &str = "http://other.com";
    pub const DCT: &str = "http://purl.org/dc/terms/";
}

/// Instance URI used by catalog-level tests.
pub const INSTANCE_URI: &str = "http://example.com/resource/1";

/// HTML plus every RDF media type, defaulting to Turtle.
pub fn agor_profile() -> Profile {
    let mut media = vec![media_types::HTML.to_string()];
    media.extend(media_types::RDF_MEDIA_TYPES.iter().map(|m| m.to_string()));
    Profile::new(
        "agor",
        uris::AGOR,
        "AGOR",
        "Australian Government Organisations Register",
        media,
        media_types::TURTLE,
    )
}

/// A single XML representation.
pub fn fake_profile() -> Profile {
    Profile::new(
        "fake",
        uris::FAKE,
        "Fake",
        "A fake profile",
        [media_types::XML],
        media_types::XML,
    )
}

/// HTML first, then XML; English and French.
pub fn other_profile() -> Profile {
    Profile::new(
        "other",
        uris::OTHER,
        "Other",
        "Another profile",
        [media_types::HTML, media_types::XML],
        media_types::HTML,
    )
    .with_languages(["en", "fr"], "en")
}

/// Turtle and RDF/XML only, defaulting to Turtle.
pub fn rdf_only_profile() -> Profile {
    Profile::new(
        "dct",
        uris::DCT,
        "Dublin Core",
        "Dublin Core metadata terms",
        [media_types::TURTLE, media_types::RDF_XML],
        media_types::TURTLE,
    )
}

/// agor, fake and other, defaulting to agor.
pub fn standard_catalog() -> ProfileCatalog {
    catalog_with_default("agor")
}

/// agor, fake and other with a chosen default token.
pub fn catalog_with_default(token: &str) -> ProfileCatalog {
    ProfileCatalog::new(vec![agor_profile(), fake_profile(), other_profile()], token)
        .expect("fixture catalog is valid")
}

/// A catalog holding only the RDF-only profile.
pub fn rdf_only_catalog() -> ProfileCatalog {
    ProfileCatalog::new(vec![rdf_only_profile()], "dct").expect("fixture catalog is valid")
}

/// A resource configuration file as the service reads it.
pub const SAMPLE_RESOURCE_YAML: &str = r#"id: sample
label: Sample Resource
comment: A resource used by tests
default_profile: dct
profiles:
  - token: dct
    uri: http://purl.org/dc/terms/
    label: Dublin Core
    comment: Dublin Core metadata terms
    media_types: [text/turtle, application/rdf+xml]
    default_media_type: text/turtle
  - token: page
    uri: http://example.com/def/page
    label: Web page
    media_types: [text/html, application/json]
    default_media_type: text/html
    languages: [en, fr]
properties:
  http://purl.org/dc/terms/creator: Test Suite
"#;
