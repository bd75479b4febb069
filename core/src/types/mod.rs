pub(crate) mod config;
pub use config::{
    ConfigError, ConfigFileError, DEFAULT_DRAFT_ROUTE, DEFAULT_SLUG_FIELD, EasyPreviewConfig,
    PREVIEW_URL_ENV, PrefixFn, PreviewConfigFile, PreviewOptions, PreviewTypeConfig,
    StoreConfig, TypeConfigMap, TypeEntry, UrlPrefix,
};

pub(crate) mod document_id;
pub use document_id::{DRAFTS_PREFIX, DocumentId, DocumentIdError, MAX_ID_LENGTH};

pub(crate) mod record;
pub use record::{PreviewSecretRecord, SECRET_RECORD_TYPE, StoredSecret};

pub(crate) mod ttl_key;
pub use ttl_key::TtlKey;
