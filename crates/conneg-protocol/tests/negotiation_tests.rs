//! End-to-end negotiation scenarios against the fixture catalogs.

use conneg_protocol::{
    vocab, Negotiation, NegotiationError, NegotiationRequest, PreferenceSource, ProfileCatalog,
    Selection,
};
use test_utils::{
    assert_link_entry, browser_request, fixtures::uris, link_entries, query_request,
    rdf_only_catalog, standard_catalog, INSTANCE_URI,
};

fn negotiate(catalog: ProfileCatalog, request: &NegotiationRequest) -> Negotiation {
    Negotiation::new(catalog, INSTANCE_URI, request).unwrap()
}

// ============================================================================
// Profile selection
// ============================================================================

#[test]
fn test_accept_profile_selects_fake() {
    let request = NegotiationRequest::new()
        .with_accept_profile("<http://nothing.com>; q=0.9, <http://fake.com>; q=0.5, <http://other.com>; q=0.1");
    let n = negotiate(standard_catalog(), &request);

    assert_eq!(n.profile_token(), "fake");
    assert_eq!(n.headers().content_profile, "<http://fake.com>");
    assert_eq!(n.media_type(), "text/xml");
    assert_eq!(n.resolution().profile_selection, Selection::Header);
}

#[test]
fn test_query_profile_beats_accept_profile() {
    let request = query_request("_profile=other").with_accept_profile("<http://fake.com>");
    let n = negotiate(standard_catalog(), &request);
    assert_eq!(n.profile_token(), "other");
    assert_eq!(n.resolution().profile_selection, Selection::Query);
}

#[test]
fn test_query_profile_by_uri() {
    let request = query_request("_view=<http://other.com>");
    let n = negotiate(standard_catalog(), &request);
    assert_eq!(n.profile_token(), "other");
}

#[test]
fn test_unknown_query_profile_falls_through_to_header() {
    let request = query_request("_profile=nope").with_accept_profile("<http://fake.com>");
    let n = negotiate(standard_catalog(), &request);
    assert_eq!(n.profile_token(), "fake");
    assert_eq!(n.resolution().profile_selection, Selection::Header);
}

#[test]
fn test_no_preference_uses_default() {
    let n = negotiate(standard_catalog(), &NegotiationRequest::new());
    assert_eq!(n.profile_token(), "agor");
    assert_eq!(n.media_type(), "text/turtle");
    assert_eq!(n.language(), "en");
    assert_eq!(n.resolution().profile_selection, Selection::Default);
}

#[test]
fn test_alternates_by_profile_uri() {
    let request = NegotiationRequest::new()
        .with_accept_profile(format!("<{}>", vocab::ALTERNATES_PROFILE_URI));
    let n = negotiate(standard_catalog(), &request);
    assert!(n.is_alternates());
    assert_eq!(n.media_type(), "text/html");
}

// ============================================================================
// Media type selection
// ============================================================================

#[test]
fn test_unsupported_format_falls_back_to_profile_default() {
    let n = negotiate(rdf_only_catalog(), &query_request("_format=application/json"));
    assert_eq!(n.profile_token(), "dct");
    assert_eq!(n.media_type(), "text/turtle");
    assert_eq!(n.resolution().media_type_selection, Selection::Default);
}

#[test]
fn test_form_decoded_media_type() {
    let n = negotiate(rdf_only_catalog(), &query_request("_mediatype=application/rdf xml"));
    assert_eq!(n.media_type(), "application/rdf+xml");
}

#[test]
fn test_accept_weight_ordering() {
    let request = query_request("_profile=other").with_accept("text/xml;q=0.5, text/html;q=0.9");
    let n = negotiate(standard_catalog(), &request);
    assert_eq!(n.media_type(), "text/html");

    let request = query_request("_profile=other").with_accept("text/xml, text/html;q=0.9");
    let n = negotiate(standard_catalog(), &request);
    assert_eq!(n.media_type(), "text/xml");
}

#[test]
fn test_browser_gets_html_when_offered() {
    let n = negotiate(standard_catalog(), &browser_request());
    assert_eq!(n.profile_token(), "agor");
    assert_eq!(n.media_type(), "text/html");
}

#[test]
fn test_browser_wildcard_does_not_override_default() {
    let n = negotiate(standard_catalog(), &query_request("_profile=fake").with_accept("text/html,*/*;q=0.8"));
    assert_eq!(n.media_type(), "text/xml");
}

// ============================================================================
// Language selection
// ============================================================================

#[test]
fn test_language_from_query_and_header() {
    let n = negotiate(standard_catalog(), &query_request("_profile=other&_lang=fr"));
    assert_eq!(n.language(), "fr");
    assert_eq!(n.headers().content_language, "fr");

    let request = query_request("_profile=other").with_accept_language("de, fr;q=0.8");
    let n = negotiate(standard_catalog(), &request);
    assert_eq!(n.language(), "fr");
}

#[test]
fn test_unsupported_language_falls_back() {
    let n = negotiate(standard_catalog(), &query_request("_profile=other&_lang=de"));
    assert_eq!(n.language(), "en");
}

// ============================================================================
// Internal requests
// ============================================================================

#[test]
fn test_internal_request_uses_defaults() {
    let n = negotiate(standard_catalog(), &NegotiationRequest::internal());
    assert!(n.is_internal());
    assert_eq!(n.profile_token(), "agor");
    assert_eq!(n.media_type(), "text/turtle");
}

// ============================================================================
// Link header
// ============================================================================

#[test]
fn test_link_covers_every_representation() {
    let catalog = standard_catalog();
    let expected: usize = catalog
        .profiles()
        .iter()
        .map(|p| p.public_media_types().count())
        .sum();
    let n = negotiate(catalog, &query_request("_profile=fake"));
    let link = &n.headers().link;

    let entries = link_entries(link);
    let reps = entries
        .iter()
        .filter(|e| e.contains("rel=\"self\"") || e.contains("rel=\"alternate\""))
        .count();
    assert_eq!(reps, expected);
    assert_eq!(link.matches("rel=\"self\"").count(), 1);
    assert_link_entry!(link, "http://fake.com", "profile");
    assert_link_entry!(
        link,
        format!("{}?_profile=fake&_mediatype=text/xml", INSTANCE_URI),
        "self"
    );
    assert_link_entry!(
        link,
        format!("{}?_profile=agor&_mediatype=text/turtle", INSTANCE_URI),
        "alternate"
    );
}

#[test]
fn test_link_type_descriptor_per_profile() {
    let n = negotiate(standard_catalog(), &NegotiationRequest::new());
    for token in ["agor", "fake", "other", "alternates"] {
        assert!(n
            .headers()
            .link
            .contains(&format!("rel=\"type\"; token=\"{}\"", token)));
    }
}

// ============================================================================
// Alternates
// ============================================================================

#[test]
fn test_alternates_html_lists_every_token() {
    let n = negotiate(standard_catalog(), &query_request("_profile=alternates"));
    assert_eq!(n.headers().content_type, "text/html");
    let body = n.render_alternates().unwrap().unwrap();
    for token in ["agor", "fake", "other", "alternates"] {
        assert!(body.contains(&format!("<code>{}</code>", token)), "missing {}", token);
    }
}

#[test]
fn test_alternates_turtle() {
    let n = negotiate(standard_catalog(), &query_request("_profile=alt&_format=text/turtle"));
    assert_eq!(n.profile_token(), "alternates");
    let body = n.render_alternates().unwrap().unwrap();
    assert!(body.contains("alt:hasDefaultView"));
    assert!(body.contains(&format!("dct:conformsTo <{}>", uris::FAKE)));
}

#[test]
fn test_alternates_json() {
    let n = negotiate(standard_catalog(), &query_request("_profile=alternates&_mediatype=application/json"));
    let body = n.render_alternates().unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["defaultProfile"], "agor");
    assert_eq!(value["uri"], INSTANCE_URI);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unbracketed_accept_profile_is_malformed() {
    let err = Negotiation::new(
        standard_catalog(),
        INSTANCE_URI,
        &NegotiationRequest::new().with_accept_profile("http://fake.com"),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        NegotiationError::MalformedPreferenceHeader {
            origin: PreferenceSource::AcceptProfile,
            ..
        }
    ));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_malformed_header_fails_even_with_query_override() {
    let request = query_request("_format=text/turtle").with_accept("text/html;q=abc");
    let err = Negotiation::new(standard_catalog(), INSTANCE_URI, &request).unwrap_err();
    assert!(matches!(
        err,
        NegotiationError::MalformedPreferenceHeader {
            origin: PreferenceSource::Accept,
            ..
        }
    ));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_negotiation_is_deterministic() {
    let request = browser_request().with_accept_profile("<http://other.com>;q=0.4, <http://fake.com>;q=0.4");
    let first = negotiate(standard_catalog(), &request);
    for _ in 0..10 {
        let again = negotiate(standard_catalog(), &request);
        assert_eq!(again.resolution(), first.resolution());
        assert_eq!(again.headers(), first.headers());
    }
    assert_eq!(first.profile_token(), "other");
}
