use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use super::{PreviewSecretRecord, RecordVariant, StoredSecret};
use crate::types::DocumentId;

#[cfg_attr(test, derive(Eq, PartialEq))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub record_type: String,
    pub secret: String,
    pub source: String,
    pub studio_url: String,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

impl RecordVariant for Record {
    const VERSION: u8 = 1;
}

impl Record {
    pub fn from_record(record: &PreviewSecretRecord, created_at: SystemTime, now: SystemTime) -> Self {
        Self {
            record_type: record.record_type.clone(),
            secret: record.secret.clone(),
            source: record.source.clone(),
            studio_url: record.studio_url.clone(),
            created_at,
            updated_at: now,
        }
    }

    pub fn into_stored(self, id: DocumentId) -> StoredSecret {
        StoredSecret {
            record: PreviewSecretRecord {
                id,
                record_type: self.record_type,
                secret: self.secret,
                source: self.source,
                studio_url: self.studio_url,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
