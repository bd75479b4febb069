//! Preview secret records and their on-disk encoding.

use crate::types::DocumentId;
use redb::TypeName;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

pub use v1 as latest_record;

pub mod v1;

/// Type discriminator shared by every preview secret record.
pub const SECRET_RECORD_TYPE: &str = "sanity.previewUrlSecret";

/// Ephemeral trust token handed to the frontend validation route.
///
/// Each preview request creates exactly one record with a fresh draft id.
/// Records are never read back by this crate; they expire one hour after
/// their last update and are removed by the cleanup sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSecretRecord {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(rename = "_type")]
    pub record_type: String,
    pub secret: String,
    /// Id of the document the preview was requested for.
    pub source: String,
    /// Origin the request was issued from, empty when unknown.
    #[serde(rename = "studioUrl")]
    pub studio_url: String,
}

impl PreviewSecretRecord {
    pub fn new(secret: String, source: &str, studio_url: Option<&str>) -> Self {
        let id = DocumentId::new_draft();
        debug_assert!(id.is_draft(), "secret records live under drafts.");
        Self {
            id,
            record_type: SECRET_RECORD_TYPE.to_string(),
            secret,
            source: source.to_string(),
            studio_url: studio_url.unwrap_or_default().to_string(),
        }
    }
}

/// A record as held by the dataset, with its system timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSecret {
    pub record: PreviewSecretRecord,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

pub trait RecordVariant {
    const VERSION: u8;
}

#[derive(Debug, Clone)]
pub enum VersionedRecord {
    V1(v1::Record),
}

impl VersionedRecord {
    pub fn into_stored(self, id: DocumentId) -> StoredSecret {
        match self {
            VersionedRecord::V1(v1) => v1.into_stored(id),
        }
    }
}

impl redb::Value for VersionedRecord {
    type SelfType<'a> = VersionedRecord;
    type AsBytes<'a> = Vec<u8>;

    fn fixed_width() -> Option<usize> {
        None
    }

    fn from_bytes<'a>(data: &'a [u8]) -> Self::SelfType<'a>
    where
        Self: 'a,
    {
        let (version, data) = data.split_first().expect("empty record");
        match *version {
            v1::Record::VERSION => {
                let v1 = postcard::from_bytes::<v1::Record>(data).expect("invalid record");
                VersionedRecord::V1(v1)
            }
            version => panic!("unsupported record version: {}", version),
        }
    }

    fn as_bytes<'a, 'b: 'a>(value: &'a Self::SelfType<'b>) -> Self::AsBytes<'a>
    where
        Self: 'b,
    {
        match value {
            VersionedRecord::V1(v1) => postcard::to_extend(v1, vec![v1::Record::VERSION])
                .expect("record serialization failed"),
        }
    }

    fn type_name() -> TypeName {
        TypeName::new("easy_preview::Record")
    }
}

#[cfg(test)]
mod tests;
