//! One request's negotiation: resolution plus response headers.

use tracing::debug;

use crate::alternates::AlternatesRenderer;
use crate::errors::NegotiationResult;
use crate::headers::ResponseHeaders;
use crate::profile::{is_alternates_token, Profile, ProfileCatalog};
use crate::request::NegotiationRequest;
use crate::resolver::{Resolution, Resolver};

/// The outcome of negotiating one request. Read-only once built.
#[derive(Debug, Clone)]
pub struct Negotiation {
    catalog: ProfileCatalog,
    instance_uri: String,
    resolution: Resolution,
    headers: ResponseHeaders,
}

impl Negotiation {
    /// Resolve a request against a catalog and build the response headers.
    pub fn new(
        catalog: ProfileCatalog,
        instance_uri: impl Into<String>,
        request: &NegotiationRequest,
    ) -> NegotiationResult<Self> {
        let instance_uri = instance_uri.into();
        let resolution = Resolver::new(&catalog).resolve(request)?;
        let headers = ResponseHeaders::build(&catalog, &instance_uri, &resolution);
        debug!(
            instance = %instance_uri,
            profile = %resolution.profile,
            media_type = %resolution.media_type,
            language = %resolution.language,
            "negotiation complete"
        );

        Ok(Self {
            catalog,
            instance_uri,
            resolution,
            headers,
        })
    }

    /// Resolved profile token.
    pub fn profile_token(&self) -> &str {
        &self.resolution.profile
    }

    /// Resolved profile.
    pub fn profile(&self) -> &Profile {
        self.catalog
            .get(&self.resolution.profile)
            .unwrap_or_else(|| self.catalog.default_profile())
    }

    pub fn media_type(&self) -> &str {
        &self.resolution.media_type
    }

    pub fn language(&self) -> &str {
        &self.resolution.language
    }

    /// Whether the caller forced defaults through `_internal`.
    pub fn is_internal(&self) -> bool {
        self.resolution.is_internal()
    }

    /// Whether the synthetic alternates profile was selected.
    pub fn is_alternates(&self) -> bool {
        is_alternates_token(&self.resolution.profile)
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    pub fn instance_uri(&self) -> &str {
        &self.instance_uri
    }

    /// The alternates body, when the alternates profile was selected.
    ///
    /// Returns `None` when the caller must render its own representation.
    pub fn render_alternates(&self) -> NegotiationResult<Option<String>> {
        if !self.is_alternates() {
            return Ok(None);
        }
        AlternatesRenderer::new(&self.catalog, &self.instance_uri)
            .render(self.media_type())
            .map(Some)
    }
}
