//! Glue between HTTP requests and the negotiation engine.
//!
//! Selection follows content negotiation by profile: `_profile`, `_mediatype`
//! and `_lang` query arguments first, then the `Accept-Profile`, `Accept` and
//! `Accept-Language` headers, then the resource's defaults. Malformed
//! preferences are rejected with 400; unavailable ones fall back silently.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use conneg_protocol::{Negotiation, NegotiationError, NegotiationRequest, Selection};
use metrics::counter;

/// `Accept-Profile` request header.
pub const ACCEPT_PROFILE: &str = "accept-profile";

/// Build a negotiation request from decoded query pairs and request headers.
pub fn negotiation_request(query: &[(String, String)], headers: &HeaderMap) -> NegotiationRequest {
    let mut request = NegotiationRequest::from_query_pairs(query.iter().map(|(k, v)| (k, v)));
    request.accept_profile = header_value(headers, ACCEPT_PROFILE);
    request.accept = header_value(headers, header::ACCEPT.as_str());
    request.accept_language = header_value(headers, header::ACCEPT_LANGUAGE.as_str());
    request
}

/// All values of a header joined into one list.
///
/// Values that are not visible ASCII are ignored.
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// 200 response carrying the negotiated headers.
pub fn negotiated_response(negotiation: &Negotiation, body: String) -> Response {
    record_negotiation(negotiation);

    let mut headers = HeaderMap::new();
    for (name, value) in negotiation.headers().pairs() {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = name, "Skipping header with invalid value"),
        }
    }

    (StatusCode::OK, headers, body).into_response()
}

/// 400 (or 500) plain-text response for a failed negotiation.
pub fn error_response(err: &NegotiationError) -> Response {
    counter!("conneg_negotiation_errors_total", "code" => err.code()).increment(1);

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!(error = %err, "Negotiation failed");
    } else {
        tracing::debug!(error = %err, "Rejected negotiation request");
    }

    plain_text(status, err.to_string())
}

/// 404 plain-text response for an unknown resource.
pub fn not_found_response(id: &str) -> Response {
    counter!("conneg_not_found_total").increment(1);
    plain_text(StatusCode::NOT_FOUND, format!("Resource '{}' not found", id))
}

fn plain_text(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

fn record_negotiation(negotiation: &Negotiation) {
    let resolution = negotiation.resolution();
    counter!(
        "conneg_negotiations_total",
        "profile" => negotiation.profile_token().to_string(),
        "selection" => selection_label(resolution.profile_selection)
    )
    .increment(1);
    counter!(
        "conneg_media_types_total",
        "media_type" => negotiation.media_type().to_string()
    )
    .increment(1);
    if negotiation.is_alternates() {
        counter!("conneg_alternates_total").increment(1);
    }
}

fn selection_label(selection: Selection) -> &'static str {
    match selection {
        Selection::Query => "query",
        Selection::Header => "header",
        Selection::Default => "default",
        Selection::Internal => "internal",
    }
}
