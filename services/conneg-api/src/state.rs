//! Application state for the conneg API.

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::ServiceConfig;

/// Label of the landing register.
pub const DEFAULT_REGISTER_LABEL: &str = "Resource Register";

/// Shared application state. Read-only after startup.
pub struct AppState {
    /// Resources loaded at startup.
    pub config: ServiceConfig,

    /// Base URL for building instance URIs, without a trailing slash.
    pub base_url: String,

    /// Label of the landing register.
    pub register_label: String,

    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: ServiceConfig, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            config,
            base_url,
            register_label: DEFAULT_REGISTER_LABEL.to_string(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// URI of the landing register.
    pub fn register_uri(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// URI of a configured resource.
    pub fn resource_uri(&self, id: &str) -> String {
        format!("{}/resources/{}", self.base_url, id)
    }
}
