//! Landing register handler.

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    response::Response,
};
use conneg_protocol::NegotiationSubject;
use std::sync::Arc;

use crate::content_negotiation::{error_response, negotiated_response, negotiation_request};
use crate::representation::render_register;
use crate::state::AppState;
use crate::subjects::RegisterSubject;

/// GET / - The register of every configured resource
pub async fn landing_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let register = RegisterSubject::new(&state);
    let request = negotiation_request(&query, &headers);

    let negotiation = match register.negotiate(&request) {
        Ok(n) => n,
        Err(e) => return error_response(&e),
    };

    let body = match negotiation.render_alternates() {
        Ok(Some(body)) => Ok(body),
        Ok(None) => render_register(&register, &negotiation),
        Err(e) => Err(e),
    };

    match body {
        Ok(body) => negotiated_response(&negotiation, body),
        Err(e) => error_response(&e),
    }
}
