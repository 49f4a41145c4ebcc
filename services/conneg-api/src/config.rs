//! Resource configuration loading and types.

use anyhow::{bail, Context, Result};
use conneg_protocol::{Profile, ProfileCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Every resource the service exposes, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Resources ordered by file name.
    pub resources: Vec<ResourceConfig>,
}

impl ServiceConfig {
    /// Load configuration from a directory of YAML or JSON files, one
    /// resource per file.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref();

        // If directory doesn't exist, serve an empty register
        if !path.exists() {
            tracing::warn!(
                "Resource config directory {} does not exist, serving no resources",
                path.display()
            );
            return Ok(Self::default());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(path)
            .with_context(|| format!("Failed to read directory: {}", path.display()))?
        {
            let file_path = entry?.path();
            let is_config = matches!(
                file_path.extension().and_then(|e| e.to_str()),
                Some("yaml") | Some("yml") | Some("json")
            );
            if is_config {
                files.push(file_path);
            }
        }
        files.sort();

        let mut resources: Vec<ResourceConfig> = Vec::with_capacity(files.len());
        for file_path in files {
            let content = std::fs::read_to_string(&file_path)
                .with_context(|| format!("Failed to read: {:?}", file_path))?;

            let resource: ResourceConfig = if file_path.extension().is_some_and(|e| e == "json") {
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse: {:?}", file_path))?
            } else {
                serde_yaml::from_str(&content)
                    .with_context(|| format!("Failed to parse: {:?}", file_path))?
            };

            resource
                .validate()
                .with_context(|| format!("Invalid resource in {:?}", file_path))?;
            if resources.iter().any(|r| r.id == resource.id) {
                bail!("Resource id '{}' in {:?} is already defined", resource.id, file_path);
            }

            tracing::info!(
                resource = %resource.id,
                profiles = resource.profiles.len(),
                "Loaded resource from {:?}",
                file_path
            );
            resources.push(resource);
        }

        Ok(Self { resources })
    }

    /// Find a resource by id.
    pub fn find_resource(&self, id: &str) -> Option<&ResourceConfig> {
        self.resources.iter().find(|r| r.id == id)
    }
}

/// A negotiable resource and the profiles it offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Path segment under `/resources/`.
    pub id: String,

    /// Human-readable label.
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub comment: String,

    /// Token of the profile served when the client expresses no preference.
    pub default_profile: String,

    /// Profiles offered, in advertisement order.
    pub profiles: Vec<Profile>,

    /// Extra statements about the resource, keyed by predicate IRI.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl ResourceConfig {
    /// Build this resource's catalog.
    pub fn catalog(&self) -> conneg_protocol::NegotiationResult<ProfileCatalog> {
        ProfileCatalog::new(self.profiles.clone(), self.default_profile.as_str())
    }

    fn validate(&self) -> Result<()> {
        if self.id.is_empty() || self.id.contains('/') {
            bail!("Resource id '{}' must be a non-empty path segment", self.id);
        }
        if let Some(key) = self.properties.keys().find(|k| !k.contains("://")) {
            bail!("Property '{}' of resource '{}' is not an IRI", key, self.id);
        }
        self.catalog()
            .with_context(|| format!("Resource '{}' has an invalid profile catalog", self.id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
id: thing
label: A Thing
default_profile: basic
profiles:
  - token: basic
    uri: http://example.com/def/basic
    label: Basic
    media_types: [text/html, text/turtle]
    default_media_type: text/html
"#;

    #[test]
    fn test_parse_resource_yaml() {
        let resource: ResourceConfig = serde_yaml::from_str(YAML).unwrap();
        assert_eq!(resource.id, "thing");
        assert!(resource.comment.is_empty());
        assert!(resource.properties.is_empty());
        assert!(resource.validate().is_ok());
    }

    #[test]
    fn test_reject_default_not_offered() {
        let mut resource: ResourceConfig = serde_yaml::from_str(YAML).unwrap();
        resource.default_profile = "missing".to_string();
        assert!(resource.validate().is_err());
    }

    #[test]
    fn test_reject_non_iri_property() {
        let mut resource: ResourceConfig = serde_yaml::from_str(YAML).unwrap();
        resource.properties.insert("creator".to_string(), "me".to_string());
        assert!(resource.validate().is_err());
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let config = ServiceConfig::load_from_dir("/nonexistent/conneg/config").unwrap();
        assert!(config.resources.is_empty());
    }
}
