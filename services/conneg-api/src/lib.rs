//! Conneg API Service Library
//!
//! This crate provides the HTTP server exposing configured resources
//! through content negotiation by profile.

pub mod config;
pub mod content_negotiation;
pub mod handlers;
pub mod representation;
pub mod state;
pub mod subjects;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the service router with its middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Register and resources
        .route("/", get(handlers::landing::landing_handler))
        .route("/resources/:id", get(handlers::resources::resource_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
