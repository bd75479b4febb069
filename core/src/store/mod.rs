//! Secret persistence and expiry sweeping.

use crate::types::{DocumentId, PreviewSecretRecord, SECRET_RECORD_TYPE};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

pub(crate) mod db;

pub use db::RedbDataset;
pub use db::error::DatabaseError;

/// Records expire this long after their last update.
pub const SECRET_TTL: Duration = Duration::from_secs(60 * 60);

/// Operation label attached to secret writes.
pub const PERSIST_TAG: &str = "sanity.preview-url-secret";

/// Operation label attached to expiry sweeps.
pub const CLEANUP_TAG: &str = "sanity.preview-url-secret.cleanup";

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum StoreError {
        #[error("Database error: {0}")]
        Database(#[from] DatabaseError),

        #[error("Dataset unavailable: {0}")]
        Unavailable(String),
    }
}

use error::StoreError;

/// Selects records of `record_type` last updated at or before `updated_at_or_before`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryQuery {
    pub record_type: String,
    pub updated_at_or_before: SystemTime,
}

impl ExpiryQuery {
    pub fn matches(&self, record_type: &str, updated_at: SystemTime) -> bool {
        record_type == self.record_type && updated_at <= self.updated_at_or_before
    }
}

/// Transactional dataset client used by [`SecretStore`].
pub trait Dataset: Send + Sync {
    /// Atomically writes `record`, replacing any record with the same id.
    /// The dataset stamps the record's update time with `now`.
    fn create_or_replace(
        &self,
        record: &PreviewSecretRecord,
        tag: &str,
        now: SystemTime,
    ) -> Result<(), StoreError>;

    /// Deletes every record matching `query` and returns their ids.
    fn delete_where(&self, query: &ExpiryQuery, tag: &str) -> Result<Vec<DocumentId>, StoreError>;
}

/// Writes preview secrets and sweeps expired ones.
#[derive(Clone)]
pub struct SecretStore {
    dataset: Arc<dyn Dataset>,
}

impl SecretStore {
    pub fn new(dataset: Arc<dyn Dataset>) -> Self {
        Self { dataset }
    }

    /// Persists a single record. The preview must not proceed if this fails.
    pub fn persist_secret(
        &self,
        record: &PreviewSecretRecord,
        now: SystemTime,
    ) -> Result<(), StoreError> {
        self.dataset.create_or_replace(record, PERSIST_TAG, now)?;
        tracing::debug!(id = %record.id, source = %record.source, "preview secret persisted");
        Ok(())
    }

    /// Query matching records that are at least [`SECRET_TTL`] old at `now`.
    ///
    /// `None` when `now` is too close to the epoch for anything to have expired.
    pub fn expiry_query(now: SystemTime) -> Option<ExpiryQuery> {
        Some(ExpiryQuery {
            record_type: SECRET_RECORD_TYPE.to_string(),
            updated_at_or_before: now.checked_sub(SECRET_TTL)?,
        })
    }

    /// Deletes every expired secret record, returning the deleted ids.
    pub fn cleanup_expired(&self, now: SystemTime) -> Result<Vec<DocumentId>, StoreError> {
        let Some(query) = Self::expiry_query(now) else {
            return Ok(vec![]);
        };
        self.dataset.delete_where(&query, CLEANUP_TAG)
    }

    /// Runs [`Self::cleanup_expired`] on a detached thread.
    ///
    /// Failures are logged and never reach the caller. The handle may be
    /// dropped; joining it is only useful for observing completion.
    pub fn spawn_cleanup(&self, now: SystemTime) -> Option<JoinHandle<()>> {
        let store = self.clone();
        let spawned = thread::Builder::new()
            .name("preview-secret-cleanup".to_string())
            .spawn(move || match store.cleanup_expired(now) {
                Ok(deleted) => {
                    tracing::debug!(deleted = deleted.len(), "expired preview secrets removed");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "preview secret cleanup failed");
                }
            });

        match spawned {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!(error = %err, "could not start preview secret cleanup");
                None
            }
        }
    }
}
