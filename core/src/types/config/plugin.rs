use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Environment variable consulted when no preview URL is configured.
pub const PREVIEW_URL_ENV: &str = "SANITY_STUDIO_PREVIEW_URL";

pub const DEFAULT_DRAFT_ROUTE: &str = "/api/draft";
pub const DEFAULT_SLUG_FIELD: &str = "slug.current";

pub type PrefixFn = dyn Fn(&Value) -> String + Send + Sync;

/// URL path prefix for a document type.
#[derive(Clone)]
pub enum UrlPrefix {
    /// Used verbatim.
    Static(String),
    /// Computed from the document on every preview request.
    Derived(Arc<PrefixFn>),
}

impl UrlPrefix {
    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self::Derived(Arc::new(f))
    }
}

impl fmt::Debug for UrlPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlPrefix::Static(prefix) => f.debug_tuple("Static").field(prefix).finish(),
            UrlPrefix::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

impl From<&str> for UrlPrefix {
    fn from(prefix: &str) -> Self {
        Self::Static(prefix.to_string())
    }
}

impl From<String> for UrlPrefix {
    fn from(prefix: String) -> Self {
        Self::Static(prefix)
    }
}

/// Per-document-type preview settings.
#[derive(Debug, Clone)]
pub struct PreviewTypeConfig {
    pub type_name: String,
    pub url_prefix: Option<UrlPrefix>,
    /// Overrides the global slug field for this type.
    pub slug_field: Option<String>,
}

impl PreviewTypeConfig {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            url_prefix: None,
            slug_field: None,
        }
    }

    pub fn with_url_prefix(mut self, prefix: impl Into<UrlPrefix>) -> Self {
        self.url_prefix = Some(prefix.into());
        self
    }

    pub fn with_slug_field(mut self, slug_field: impl Into<String>) -> Self {
        self.slug_field = Some(slug_field.into());
        self
    }
}

/// Options supplied by the host. Unset fields fall back to defaults.
#[derive(Debug, Clone, Default)]
pub struct PreviewOptions {
    pub preview_url: Option<String>,
    pub draft_route: Option<String>,
    pub slug_field: Option<String>,
    pub types: Vec<PreviewTypeConfig>,
}

/// Read-only lookup of type settings, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct TypeConfigMap(HashMap<String, PreviewTypeConfig>);

impl TypeConfigMap {
    fn build(types: Vec<PreviewTypeConfig>) -> Result<Self, ConfigError> {
        let mut map = HashMap::with_capacity(types.len());
        for type_config in types {
            if type_config.type_name.trim().is_empty() {
                return Err(ConfigError::EmptyTypeName);
            }
            match map.entry(type_config.type_name.clone()) {
                Entry::Occupied(entry) => {
                    return Err(ConfigError::DuplicateType(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(type_config);
                }
            }
        }
        Ok(Self(map))
    }

    pub fn get(&self, type_name: &str) -> Option<&PreviewTypeConfig> {
        self.0.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.0.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Plugin-wide configuration, immutable once built.
///
/// Each instance owns its own type map; building a second config yields an
/// independent lookup.
#[derive(Debug, Clone)]
pub struct EasyPreviewConfig {
    preview_url: Option<Url>,
    draft_route: String,
    slug_field: String,
    types: TypeConfigMap,
}

impl EasyPreviewConfig {
    /// Builds the config, reading [`PREVIEW_URL_ENV`] once if no preview URL is given.
    pub fn new(options: PreviewOptions) -> Result<Self, ConfigError> {
        let env_preview_url = std::env::var(PREVIEW_URL_ENV).ok();
        Self::with_env_fallback(options, env_preview_url)
    }

    /// Builds the config with an explicit fallback for the preview URL.
    pub fn with_env_fallback(
        options: PreviewOptions,
        env_preview_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let preview_url = options
            .preview_url
            .filter(|url| !url.trim().is_empty())
            .or(env_preview_url.filter(|url| !url.trim().is_empty()))
            .map(|url| parse_preview_url(&url))
            .transpose()?;

        if preview_url.is_none() {
            tracing::warn!(
                env = PREVIEW_URL_ENV,
                "no preview URL configured; previews will fail until one is set"
            );
        }

        let config = Self {
            preview_url,
            draft_route: options
                .draft_route
                .unwrap_or_else(|| DEFAULT_DRAFT_ROUTE.to_string()),
            slug_field: options
                .slug_field
                .unwrap_or_else(|| DEFAULT_SLUG_FIELD.to_string()),
            types: TypeConfigMap::build(options.types)?,
        };

        tracing::debug!(
            preview_url = ?config.preview_url.as_ref().map(Url::as_str),
            draft_route = %config.draft_route,
            slug_field = %config.slug_field,
            type_count = config.types.len(),
            "preview configuration built"
        );

        Ok(config)
    }

    pub fn preview_url(&self) -> Option<&Url> {
        self.preview_url.as_ref()
    }

    pub fn draft_route(&self) -> &str {
        &self.draft_route
    }

    /// Global default slug field.
    pub fn slug_field(&self) -> &str {
        &self.slug_field
    }

    pub fn types(&self) -> &TypeConfigMap {
        &self.types
    }

    pub fn type_config(&self, type_name: &str) -> Option<&PreviewTypeConfig> {
        self.types.get(type_name)
    }

    /// Slug field for a type: its override, else the global default.
    pub fn slug_field_for<'a>(&'a self, type_config: &'a PreviewTypeConfig) -> &'a str {
        type_config.slug_field.as_deref().unwrap_or(&self.slug_field)
    }
}

pub(super) fn parse_preview_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidPreviewUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidPreviewUrl {
            url: raw.to_string(),
            reason: "not an absolute base URL".to_string(),
        });
    }

    Ok(url)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid preview URL {url:?}: {reason}")]
    InvalidPreviewUrl { url: String, reason: String },

    #[error("preview type name must not be empty")]
    EmptyTypeName,

    #[error("preview type configured more than once: {0}")]
    DuplicateType(String),
}
