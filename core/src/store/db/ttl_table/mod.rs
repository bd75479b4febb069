use crate::store::db::error::DatabaseError;
use crate::types::{DocumentId, TtlKey};
use redb::{ReadTransaction, ReadableTable, TableDefinition, WriteTransaction};
use std::time::SystemTime;

/// Index of `TtlKey { updated_at, id }` entries, sorted oldest first.
pub struct TtlTable {
    definition: TableDefinition<'static, TtlKey, ()>,
}

impl TtlTable {
    pub const fn new(name: &'static str) -> Self {
        Self {
            definition: TableDefinition::new(name),
        }
    }

    pub fn init(&self, txn: &WriteTransaction) -> Result<(), DatabaseError> {
        txn.open_table(self.definition)?;
        Ok(())
    }

    pub fn insert(&self, txn: &WriteTransaction, ttl_key: &TtlKey) -> Result<(), DatabaseError> {
        let mut table = txn.open_table(self.definition)?;
        table.insert(ttl_key, &())?;
        Ok(())
    }

    /// Returns `true` if the entry was present.
    pub fn remove(&self, txn: &WriteTransaction, ttl_key: &TtlKey) -> Result<bool, DatabaseError> {
        let mut table = txn.open_table(self.definition)?;
        Ok(table.remove(ttl_key)?.is_some())
    }

    /// Returns ids with `updated_at <= cutoff`, oldest first.
    pub fn ids_updated_at_or_before(
        &self,
        txn: &ReadTransaction,
        cutoff: SystemTime,
    ) -> Result<Vec<DocumentId>, DatabaseError> {
        let table = txn.open_table(self.definition)?;

        let entries = match TtlKey::sweep_bound(cutoff) {
            Some(bound) => table.range(..bound)?,
            None => table.range::<TtlKey>(..)?,
        };

        entries
            .map(|entry| {
                let (ttl_key_guard, _) = entry?;
                Ok(ttl_key_guard.value().id)
            })
            .collect()
    }

    pub fn all_ids(&self, txn: &ReadTransaction) -> Result<Vec<DocumentId>, DatabaseError> {
        let table = txn.open_table(self.definition)?;
        let mut ids = Vec::new();

        for entry in table.iter()? {
            let (ttl_key_guard, _) = entry?;
            ids.push(ttl_key_guard.value().id);
        }

        Ok(ids)
    }
}
