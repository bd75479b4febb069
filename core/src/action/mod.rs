//! The preview action: validates the request, issues a secret and builds the URL.
//!
//! Flow: `idle → config_validated → document_checked → slug_resolved →
//! secret_issued → url_built`. Every exit is a [`PreviewError`]; panics are
//! caught and reported as [`PreviewError::Unknown`].

use crate::link::{build_pathname, build_preview_url};
use crate::resolve::{resolve_prefix, resolve_slug};
use crate::secret::generate_secret;
use crate::store::SecretStore;
use crate::types::{DocumentId, EasyPreviewConfig, PreviewSecretRecord};
use error::PreviewError;
use serde_json::Value;
use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::SystemTime;
use url::Url;

mod notify;

pub use notify::{ActionDescriptor, Navigator, Notifier, Toast, ToastStatus};

pub mod error {
    use super::*;
    use crate::store::error::StoreError;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum PreviewError {
        #[error("no preview configuration for type {0:?}")]
        ConfigMissing(String),

        #[error("no preview URL is configured")]
        PreviewUrlMissing,

        #[error("document has neither a draft nor a published version")]
        DocumentMissing,

        #[error("document has no slug at {field:?}")]
        SlugMissing { field: String },

        #[error("could not persist preview secret: {0}")]
        PersistFailed(#[source] StoreError),

        #[error("preview failed after {stage}: {message}")]
        Unknown { stage: Stage, message: String },
    }

    impl PreviewError {
        /// Toast to show the user. `None` for errors that stay silent.
        pub fn toast(&self) -> Option<Toast> {
            let toast = match self {
                PreviewError::ConfigMissing(_) => return None,
                PreviewError::PreviewUrlMissing => Toast::error(
                    "Preview is not configured",
                    "Set a preview URL in the plugin options or the environment.",
                ),
                PreviewError::DocumentMissing => Toast::error(
                    "Nothing to preview",
                    "This document has no draft or published version yet.",
                ),
                PreviewError::SlugMissing { field } => Toast::error(
                    "Missing slug",
                    format!("Fill in the `{field}` field before opening a preview."),
                ),
                PreviewError::PersistFailed(err) => {
                    Toast::error("Could not create preview secret", err.to_string())
                }
                PreviewError::Unknown { message, .. } if message.is_empty() => {
                    Toast::error("Preview failed", "An unknown error occurred.")
                }
                PreviewError::Unknown { message, .. } => {
                    Toast::error("Preview failed", message.clone())
                }
            };
            Some(toast)
        }
    }
}

/// Last state the flow reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ConfigValidated,
    DocumentChecked,
    SlugResolved,
    SecretIssued,
    UrlBuilt,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::ConfigValidated => "config_validated",
            Stage::DocumentChecked => "document_checked",
            Stage::SlugResolved => "slug_resolved",
            Stage::SecretIssued => "secret_issued",
            Stage::UrlBuilt => "url_built",
        };
        f.write_str(name)
    }
}

/// A preview request for one document.
#[derive(Debug, Clone, Copy)]
pub struct PreviewRequest<'a> {
    /// Published id of the document.
    pub document_id: &'a str,
    pub document_type: &'a str,
    pub draft: Option<&'a Value>,
    pub published: Option<&'a Value>,
    /// Origin of the studio issuing the request, if known.
    pub studio_origin: Option<&'a str>,
}

impl<'a> PreviewRequest<'a> {
    pub fn new(document_id: &'a str, document_type: &'a str) -> Self {
        Self {
            document_id,
            document_type,
            draft: None,
            published: None,
            studio_origin: None,
        }
    }

    pub fn with_draft(mut self, draft: &'a Value) -> Self {
        self.draft = Some(draft);
        self
    }

    pub fn with_published(mut self, published: &'a Value) -> Self {
        self.published = Some(published);
        self
    }

    pub fn with_studio_origin(mut self, origin: &'a str) -> Self {
        self.studio_origin = Some(origin);
        self
    }

    /// The draft if present, else the published version.
    pub fn document(&self) -> Option<&'a Value> {
        self.draft.or(self.published)
    }
}

/// Result of a successful preview request.
#[derive(Debug)]
pub struct IssuedPreview {
    pub url: Url,
    pub pathname: String,
    pub record_id: DocumentId,
    /// Background cleanup, if it could be started. Dropping it detaches the sweep.
    pub cleanup: Option<JoinHandle<()>>,
}

pub struct PreviewAction {
    config: Arc<EasyPreviewConfig>,
    store: SecretStore,
}

impl PreviewAction {
    pub fn new(config: EasyPreviewConfig, store: SecretStore) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    pub fn config(&self) -> &EasyPreviewConfig {
        &self.config
    }

    /// The action is offered only for configured types with some document version.
    pub fn is_available(&self, request: &PreviewRequest<'_>) -> bool {
        self.config.types().contains(request.document_type) && request.document().is_some()
    }

    pub fn descriptor(&self, request: &PreviewRequest<'_>) -> Option<ActionDescriptor> {
        self.is_available(request).then_some(ActionDescriptor::PREVIEW)
    }

    /// Issues a secret and builds the preview URL.
    pub fn preview(
        &self,
        request: &PreviewRequest<'_>,
        now: SystemTime,
    ) -> Result<IssuedPreview, PreviewError> {
        let stage = Cell::new(Stage::Idle);

        match panic::catch_unwind(AssertUnwindSafe(|| self.issue(request, now, &stage))) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(stage = %stage.get(), message = %message, "preview panicked");
                Err(PreviewError::Unknown {
                    stage: stage.get(),
                    message,
                })
            }
        }
    }

    /// Top-level handler: previews, opens the URL and reports the outcome.
    ///
    /// Never fails. On success returns the opened preview; its cleanup
    /// handle is left to the host, which may join it before exiting.
    pub fn run(
        &self,
        request: &PreviewRequest<'_>,
        navigator: &dyn Navigator,
        notifier: &dyn Notifier,
        now: SystemTime,
    ) -> Option<IssuedPreview> {
        let result = self.preview(request, now).and_then(|issued| {
            navigator
                .open(&issued.url)
                .map_err(|err| PreviewError::Unknown {
                    stage: Stage::UrlBuilt,
                    message: err.to_string(),
                })?;
            Ok(issued)
        });

        match result {
            Ok(issued) => {
                tracing::info!(
                    document_id = request.document_id,
                    pathname = %issued.pathname,
                    "preview opened"
                );
                notifier.notify(Toast::success(
                    "Opening preview",
                    format!("Previewing {}", issued.pathname),
                ));
                Some(issued)
            }
            Err(err) => {
                log_failure(request, &err);
                if let Some(toast) = err.toast() {
                    notifier.notify(toast);
                }
                None
            }
        }
    }

    fn issue(
        &self,
        request: &PreviewRequest<'_>,
        now: SystemTime,
        stage: &Cell<Stage>,
    ) -> Result<IssuedPreview, PreviewError> {
        let type_config = self
            .config
            .type_config(request.document_type)
            .ok_or_else(|| PreviewError::ConfigMissing(request.document_type.to_string()))?;
        let base = self
            .config
            .preview_url()
            .ok_or(PreviewError::PreviewUrlMissing)?;
        advance(stage, Stage::ConfigValidated);

        let document = request.document().ok_or(PreviewError::DocumentMissing)?;
        advance(stage, Stage::DocumentChecked);

        let field = self.config.slug_field_for(type_config);
        let slug = resolve_slug(Some(document), field).ok_or_else(|| PreviewError::SlugMissing {
            field: field.to_string(),
        })?;
        advance(stage, Stage::SlugResolved);

        let record =
            PreviewSecretRecord::new(generate_secret(), request.document_id, request.studio_origin);
        self.store
            .persist_secret(&record, now)
            .map_err(PreviewError::PersistFailed)?;
        advance(stage, Stage::SecretIssued);

        let prefix = resolve_prefix(type_config, document);
        let pathname = build_pathname(&prefix, slug);
        let url = build_preview_url(base, self.config.draft_route(), &record.secret, &pathname)
            .map_err(|err| PreviewError::Unknown {
                stage: stage.get(),
                message: err.to_string(),
            })?;
        advance(stage, Stage::UrlBuilt);

        let cleanup = self.store.spawn_cleanup(now);

        Ok(IssuedPreview {
            url,
            pathname,
            record_id: record.id,
            cleanup,
        })
    }
}

fn advance(stage: &Cell<Stage>, next: Stage) {
    tracing::debug!(from = %stage.get(), to = %next, "preview stage");
    stage.set(next);
}

fn log_failure(request: &PreviewRequest<'_>, err: &PreviewError) {
    let document_type = request.document_type;
    match err {
        PreviewError::ConfigMissing(_) => {
            tracing::debug!(document_type, "type has no preview configuration");
        }
        PreviewError::PreviewUrlMissing
        | PreviewError::DocumentMissing
        | PreviewError::SlugMissing { .. } => {
            tracing::warn!(document_type, error = %err, "preview unavailable");
        }
        PreviewError::PersistFailed(_) | PreviewError::Unknown { .. } => {
            tracing::error!(document_type, error = %err, "preview failed");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::new()
    }
}
