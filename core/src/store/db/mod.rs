//! Embedded dataset backed by redb.
//!
//! Two tables:
//! - Records: DocumentId → VersionedRecord
//! - Update index: TtlKey { updated_at, id } for expiry sweeps

use crate::store::db::error::DatabaseError;
use crate::store::db::ttl_table::TtlTable;
use crate::store::error::StoreError;
use crate::store::{Dataset, ExpiryQuery};
use crate::types::record::VersionedRecord;
use crate::types::record::latest_record::Record;
use crate::types::{DocumentId, PreviewSecretRecord, StoreConfig, StoredSecret, TtlKey};
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use std::time::SystemTime;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum DatabaseError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
    }
}

mod ttl_table;

const RECORDS_TABLE: TableDefinition<DocumentId, VersionedRecord> =
    TableDefinition::new("records");

const UPDATED_INDEX: TtlTable = TtlTable::new("ttl_updated");

pub struct RedbDataset {
    db: redb::Database,
}

impl RedbDataset {
    /// Creates or opens the dataset at the configured location.
    pub fn open(config: &StoreConfig) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&config.base_path)?;

        let db = redb::Database::create(config.db_path())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RECORDS_TABLE)?;
            UPDATED_INDEX.init(&write_txn)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

/// Read operations.
impl RedbDataset {
    pub fn get(&self, id: &DocumentId) -> Result<Option<StoredSecret>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;

        Ok(table.get(id)?.map(|guard| guard.value().into_stored(id.clone())))
    }

    /// Returns all record ids, least recently updated first.
    pub fn ids(&self) -> Result<Vec<DocumentId>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        UPDATED_INDEX.all_ids(&read_txn)
    }
}

/// Write operations.
impl RedbDataset {
    /// Inserts or replaces a record. Replacing keeps `created_at`.
    pub fn upsert(&self, record: &PreviewSecretRecord, now: SystemTime) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;

        {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;

            let existing = table
                .get(&record.id)?
                .map(|guard| guard.value().into_stored(record.id.clone()));

            let created_at = match existing {
                Some(previous) => {
                    Self::remove_index(&write_txn, &record.id, previous.updated_at)?;
                    previous.created_at
                }
                None => now,
            };

            Self::insert_index(&write_txn, &record.id, now)?;
            table.insert(
                &record.id,
                &VersionedRecord::V1(Record::from_record(record, created_at, now)),
            )?;
        }

        write_txn.commit()?;
        Ok(())
    }

    /// Deletes records matching `query` in a single transaction.
    ///
    /// Candidates come from the update index; each is rechecked against its
    /// stored type and timestamp so a record refreshed since the index read is kept.
    pub fn delete_matching(&self, query: &ExpiryQuery) -> Result<Vec<DocumentId>, DatabaseError> {
        let candidates = {
            let read_txn = self.db.begin_read()?;
            UPDATED_INDEX.ids_updated_at_or_before(&read_txn, query.updated_at_or_before)?
        };

        if candidates.is_empty() {
            return Ok(vec![]);
        }

        let write_txn = self.db.begin_write()?;
        let mut deleted = Vec::new();

        {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;

            for id in candidates {
                let Some(stored) = table
                    .get(&id)?
                    .map(|guard| guard.value().into_stored(id.clone()))
                else {
                    continue;
                };

                if !query.matches(&stored.record.record_type, stored.updated_at) {
                    continue;
                }

                table.remove(&id)?;
                Self::remove_index(&write_txn, &id, stored.updated_at)?;
                deleted.push(id);
            }
        }

        write_txn.commit()?;
        Ok(deleted)
    }
}

impl Dataset for RedbDataset {
    fn create_or_replace(
        &self,
        record: &PreviewSecretRecord,
        tag: &str,
        now: SystemTime,
    ) -> Result<(), StoreError> {
        tracing::debug!(tag, id = %record.id, "create or replace");
        self.upsert(record, now)?;
        Ok(())
    }

    fn delete_where(&self, query: &ExpiryQuery, tag: &str) -> Result<Vec<DocumentId>, StoreError> {
        tracing::debug!(tag, record_type = %query.record_type, "delete by query");
        Ok(self.delete_matching(query)?)
    }
}

/// Index helpers.
impl RedbDataset {
    fn remove_index(
        txn: &redb::WriteTransaction,
        id: &DocumentId,
        updated_at: SystemTime,
    ) -> Result<(), DatabaseError> {
        let ttl_key = TtlKey::new(id.clone(), updated_at);
        UPDATED_INDEX.remove(txn, &ttl_key)?;
        Ok(())
    }

    fn insert_index(
        txn: &redb::WriteTransaction,
        id: &DocumentId,
        updated_at: SystemTime,
    ) -> Result<(), DatabaseError> {
        let ttl_key = TtlKey::new(id.clone(), updated_at);
        UPDATED_INDEX.insert(txn, &ttl_key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
