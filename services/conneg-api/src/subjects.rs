//! Negotiable things the service exposes.

use conneg_protocol::{media_types, NegotiationSubject, Profile};

use crate::config::ResourceConfig;
use crate::state::AppState;

/// Token of the members profile offered by the register.
pub const MEM_TOKEN: &str = "mem";

/// URI of the members profile.
pub const MEM_PROFILE_URI: &str = "https://w3id.org/profile/mem";

/// The members profile: a register listed as its members.
pub fn mem_profile() -> Profile {
    let mut media = vec![media_types::HTML.to_string(), media_types::JSON.to_string()];
    media.extend(media_types::RDF_MEDIA_TYPES.iter().map(|m| m.to_string()));
    Profile::new(
        MEM_TOKEN,
        MEM_PROFILE_URI,
        "Members Profile",
        "A very basic listing of the members of a register",
        media,
        media_types::HTML,
    )
}

/// One configured resource.
pub struct ResourceSubject<'a> {
    pub resource: &'a ResourceConfig,
    pub uri: String,
}

impl<'a> ResourceSubject<'a> {
    pub fn new(state: &AppState, resource: &'a ResourceConfig) -> Self {
        Self {
            resource,
            uri: state.resource_uri(&resource.id),
        }
    }
}

impl NegotiationSubject for ResourceSubject<'_> {
    fn instance_uri(&self) -> String {
        self.uri.clone()
    }

    fn profiles(&self) -> Vec<Profile> {
        self.resource.profiles.clone()
    }

    fn default_profile_token(&self) -> &str {
        &self.resource.default_profile
    }
}

/// A member of the landing register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub uri: String,
    pub label: String,
}

/// The landing register listing every configured resource.
pub struct RegisterSubject {
    pub uri: String,
    pub label: String,
    pub members: Vec<Member>,
}

impl RegisterSubject {
    pub fn new(state: &AppState) -> Self {
        let members = state
            .config
            .resources
            .iter()
            .map(|r| Member {
                uri: state.resource_uri(&r.id),
                label: if r.label.is_empty() {
                    r.id.clone()
                } else {
                    r.label.clone()
                },
            })
            .collect();

        Self {
            uri: state.register_uri(),
            label: state.register_label.clone(),
            members,
        }
    }
}

impl NegotiationSubject for RegisterSubject {
    fn instance_uri(&self) -> String {
        self.uri.clone()
    }

    fn profiles(&self) -> Vec<Profile> {
        vec![mem_profile()]
    }

    fn default_profile_token(&self) -> &str {
        MEM_TOKEN
    }
}
