//! Resource handler.

use axum::{
    extract::{Extension, Path, Query},
    http::HeaderMap,
    response::Response,
};
use conneg_protocol::NegotiationSubject;
use std::sync::Arc;

use crate::content_negotiation::{
    error_response, negotiated_response, negotiation_request, not_found_response,
};
use crate::representation::render_resource;
use crate::state::AppState;
use crate::subjects::ResourceSubject;

/// GET /resources/:id - One configured resource
pub async fn resource_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let Some(resource) = state.config.find_resource(&id) else {
        return not_found_response(&id);
    };

    let subject = ResourceSubject::new(&state, resource);
    let request = negotiation_request(&query, &headers);

    let negotiation = match subject.negotiate(&request) {
        Ok(n) => n,
        Err(e) => return error_response(&e),
    };
    tracing::debug!(
        resource = %id,
        profile = %negotiation.profile_token(),
        media_type = %negotiation.media_type(),
        "Serving resource"
    );

    let body = match negotiation.render_alternates() {
        Ok(Some(body)) => Ok(body),
        Ok(None) => render_resource(resource, &subject.uri, &negotiation),
        Err(e) => Err(e),
    };

    match body {
        Ok(body) => negotiated_response(&negotiation, body),
        Err(e) => error_response(&e),
    }
}
