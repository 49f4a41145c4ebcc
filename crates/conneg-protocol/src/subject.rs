//! The contract between concrete resources and the negotiation engine.

use crate::errors::NegotiationResult;
use crate::negotiation::Negotiation;
use crate::profile::{Profile, ProfileCatalog};
use crate::request::NegotiationRequest;

/// A resource that can be negotiated by profile.
///
/// Implementors describe which profiles they offer; the engine does the rest.
/// The synthetic alternates profile is added by the engine and must not be
/// returned from [`profiles`](NegotiationSubject::profiles).
pub trait NegotiationSubject {
    /// URI identifying this resource instance.
    fn instance_uri(&self) -> String;

    /// Profiles this resource offers.
    fn profiles(&self) -> Vec<Profile>;

    /// Token of the profile used when the request expresses no preference.
    fn default_profile_token(&self) -> &str;

    /// Build the catalog for one request.
    fn catalog(&self) -> NegotiationResult<ProfileCatalog> {
        ProfileCatalog::new(self.profiles(), self.default_profile_token())
    }

    /// Negotiate one request against this resource.
    fn negotiate(&self, request: &NegotiationRequest) -> NegotiationResult<Negotiation> {
        Negotiation::new(self.catalog()?, self.instance_uri(), request)
    }
}
