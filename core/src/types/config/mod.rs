mod file;
mod plugin;
mod store;

pub use file::{ConfigFileError, PreviewConfigFile, TypeEntry};
pub use plugin::{
    ConfigError, DEFAULT_DRAFT_ROUTE, DEFAULT_SLUG_FIELD, EasyPreviewConfig, PREVIEW_URL_ENV,
    PrefixFn, PreviewOptions, PreviewTypeConfig, TypeConfigMap, UrlPrefix,
};
pub use store::StoreConfig;
