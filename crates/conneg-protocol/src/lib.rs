//! Content Negotiation by Profile
//!
//! This crate resolves, for one HTTP request, which profile, media type and
//! language a resource should be returned in, and builds the headers and the
//! alternates representation that advertise every other choice.
//!
//! Clients select through query-string arguments (`_profile`/`_view`,
//! `_mediatype`/`_format`, `_lang`) or through the `Accept-Profile`, `Accept`
//! and `Accept-Language` headers. Query-string arguments win over headers,
//! headers win over defaults. Values a resource does not offer are skipped;
//! malformed values are errors.
//!
//! # Example
//!
//! ```rust
//! use conneg_protocol::{Negotiation, NegotiationRequest, Profile, ProfileCatalog};
//!
//! let catalog = ProfileCatalog::new(
//!     vec![Profile::new(
//!         "dct",
//!         "http://purl.org/dc/terms/",
//!         "Dublin Core",
//!         "Basic metadata",
//!         ["text/html", "text/turtle"],
//!         "text/html",
//!     )],
//!     "dct",
//! )
//! .unwrap();
//!
//! let request = NegotiationRequest::new().with_accept("text/turtle");
//! let negotiation = Negotiation::new(catalog, "http://example.com/thing", &request).unwrap();
//! assert_eq!(negotiation.media_type(), "text/turtle");
//! assert_eq!(negotiation.headers().content_profile, "<http://purl.org/dc/terms/>");
//! ```

pub mod alternates;
pub mod errors;
pub mod headers;
pub mod negotiation;
pub mod preferences;
pub mod profile;
pub mod rdf;
pub mod request;
pub mod resolver;
pub mod subject;

// Re-export commonly used types
pub use alternates::{AlternatesJson, AlternatesRenderer};
pub use errors::{NegotiationError, NegotiationResult, PreferenceSource};
pub use headers::ResponseHeaders;
pub use negotiation::Negotiation;
pub use preferences::{Preference, PreferenceList};
pub use profile::{Profile, ProfileCatalog, ALTERNATES_ALIAS, ALTERNATES_TOKEN};
pub use rdf::{Graph, RdfFormat, Term, Triple};
pub use request::NegotiationRequest;
pub use resolver::{Resolution, Resolver, Selection};
pub use subject::NegotiationSubject;

/// Media types the engine knows about.
pub mod media_types {
    /// HTML media type
    pub const HTML: &str = "text/html";
    /// JSON media type
    pub const JSON: &str = "application/json";
    /// XML media type
    pub const XML: &str = "text/xml";
    /// Turtle media type
    pub const TURTLE: &str = "text/turtle";
    /// RDF/XML media type
    pub const RDF_XML: &str = "application/rdf+xml";
    /// JSON-LD media type
    pub const JSON_LD: &str = "application/ld+json";
    /// N3 media type
    pub const N3: &str = "text/n3";
    /// N-Triples media type
    pub const N_TRIPLES: &str = "application/n-triples";

    /// RDF media types offered by the alternates profile, in order.
    pub const RDF_MEDIA_TYPES: &[&str] = &[TURTLE, RDF_XML, JSON_LD, N3, N_TRIPLES];
}

/// IRIs of the vocabularies used in headers and RDF output.
pub mod vocab {
    /// URI of the synthetic alternates profile.
    pub const ALTERNATES_PROFILE_URI: &str = "http://www.w3.org/ns/dx/conneg/altr";

    pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const RDFS_MEMBER: &str = "http://www.w3.org/2000/01/rdf-schema#member";

    pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const XSD_TOKEN: &str = "http://www.w3.org/2001/XMLSchema#token";
    pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    pub const DCT_NS: &str = "http://purl.org/dc/terms/";
    pub const DCT_FORMAT: &str = "http://purl.org/dc/terms/format";
    pub const DCT_CONFORMS_TO: &str = "http://purl.org/dc/terms/conformsTo";

    pub const PROF_NS: &str = "http://www.w3.org/ns/dx/prof/";
    /// Target of the `rel="type"` profile descriptors in `Link`.
    pub const PROF_PROFILE: &str = "http://www.w3.org/ns/dx/prof/Profile";
    pub const PROF_TOKEN: &str = "http://www.w3.org/ns/dx/prof/token";

    pub const ALT_NS: &str = "http://promsns.org/def/alt#";
    pub const ALT_VIEW: &str = "http://promsns.org/def/alt#View";
    pub const ALT_HAS_VIEW: &str = "http://promsns.org/def/alt#hasView";
    pub const ALT_HAS_DEFAULT_VIEW: &str = "http://promsns.org/def/alt#hasDefaultView";
    pub const ALT_HAS_DEFAULT_FORMAT: &str = "http://promsns.org/def/alt#hasDefaultFormat";
}
