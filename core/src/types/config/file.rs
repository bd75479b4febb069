use super::plugin::{
    DEFAULT_DRAFT_ROUTE, DEFAULT_SLUG_FIELD, PreviewOptions, PreviewTypeConfig, parse_preview_url,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Preview configuration as persisted in `easy-preview.toml`.
///
/// Only static URL prefixes can be expressed here; document-derived prefixes
/// are attached programmatically through [`PreviewTypeConfig::with_url_prefix`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfigFile {
    pub preview_url: Option<String>,
    #[serde(default = "default_draft_route")]
    pub draft_route: String,
    #[serde(default = "default_slug_field")]
    pub slug_field: String,
    pub types: Vec<TypeEntry>,
}

impl Default for PreviewConfigFile {
    fn default() -> Self {
        Self {
            preview_url: None,
            draft_route: default_draft_route(),
            slug_field: default_slug_field(),
            types: Vec::new(),
        }
    }
}

/// One `[[types]]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug_field: Option<String>,
}

impl PreviewConfigFile {
    /// Returns the config file path within the given directory.
    pub fn path(dir: &Path) -> std::path::PathBuf {
        dir.join("easy-preview.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns human-readable warnings. Empty if nothing looks off.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        match self.preview_url.as_deref().filter(|url| !url.trim().is_empty()) {
            None => warnings.push(
                "preview_url is not set; the environment fallback must provide it".to_string(),
            ),
            Some(url) => {
                if let Err(err) = parse_preview_url(url) {
                    warnings.push(err.to_string());
                }
            }
        }

        if !self.draft_route.starts_with('/') {
            warnings.push(format!(
                "draft_route {:?} is relative and will resolve against the preview URL path",
                self.draft_route
            ));
        }

        if self.slug_field.is_empty() {
            warnings.push("slug_field is empty; no document will resolve a slug".to_string());
        }

        let mut seen = HashSet::new();
        for entry in &self.types {
            if entry.type_name.trim().is_empty() {
                warnings.push("a [[types]] entry has an empty type".to_string());
            } else if !seen.insert(entry.type_name.as_str()) {
                warnings.push(format!("type {:?} is configured more than once", entry.type_name));
            }
        }

        warnings
    }

    pub fn into_options(self) -> PreviewOptions {
        PreviewOptions {
            preview_url: self.preview_url,
            draft_route: Some(self.draft_route),
            slug_field: Some(self.slug_field),
            types: self
                .types
                .into_iter()
                .map(|entry| PreviewTypeConfig {
                    type_name: entry.type_name,
                    url_prefix: entry.url_prefix.map(Into::into),
                    slug_field: entry.slug_field,
                })
                .collect(),
        }
    }
}

fn default_draft_route() -> String {
    DEFAULT_DRAFT_ROUTE.to_string()
}

fn default_slug_field() -> String {
    DEFAULT_SLUG_FIELD.to_string()
}

/// Errors that can occur when loading or saving the config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
