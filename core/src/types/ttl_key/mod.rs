use crate::types::DocumentId;
use redb::TypeName;
use std::cmp::Ordering;
use std::time::{Duration, SystemTime};

/// Width of the big-endian nanosecond prefix.
const TIMESTAMP_LEN: usize = 16;

/// Expiry index entry: records sort by `updated_at`, then by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlKey {
    /// Last-update time of the record; expiry is `updated_at + ttl`.
    pub updated_at: SystemTime,
    pub id: DocumentId,
}

impl TtlKey {
    pub fn new(id: DocumentId, updated_at: SystemTime) -> Self {
        Self { updated_at, id }
    }

    /// Exclusive upper bound covering every entry updated at or before `cutoff`.
    ///
    /// `None` when no representable time follows `cutoff`; every entry matches then.
    pub(crate) fn sweep_bound(cutoff: SystemTime) -> Option<Self> {
        let updated_at = cutoff.checked_add(Duration::from_nanos(1))?;
        Some(Self {
            updated_at,
            // SAFETY: Only used as a range bound and never stored; the empty id sorts
            // before every real id.
            id: unsafe { DocumentId::new_unchecked(String::new()) },
        })
    }
}

/// Nanoseconds since the epoch. Pre-epoch times clamp to zero so they sweep first.
fn encode_timestamp(at: SystemTime) -> [u8; TIMESTAMP_LEN] {
    at.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_be_bytes()
}

fn split_timestamp(data: &[u8]) -> (u128, &[u8]) {
    let (nanos, rest) = data
        .split_first_chunk::<TIMESTAMP_LEN>()
        .expect("ttl key shorter than timestamp");
    (u128::from_be_bytes(*nanos), rest)
}

impl redb::Key for TtlKey {
    fn compare(data1: &[u8], data2: &[u8]) -> Ordering {
        let (at1, id1) = split_timestamp(data1);
        let (at2, id2) = split_timestamp(data2);

        at1.cmp(&at2)
            .then_with(|| <DocumentId as redb::Key>::compare(id1, id2))
    }
}

impl redb::Value for TtlKey {
    type SelfType<'a> = TtlKey;
    type AsBytes<'a> = Vec<u8>;

    fn fixed_width() -> Option<usize> {
        None
    }

    fn from_bytes<'a>(data: &'a [u8]) -> Self::SelfType<'a>
    where
        Self: 'a,
    {
        let (nanos, id) = split_timestamp(data);
        let since_epoch = Duration::new(
            (nanos / 1_000_000_000) as u64,
            (nanos % 1_000_000_000) as u32,
        );

        TtlKey {
            updated_at: SystemTime::UNIX_EPOCH + since_epoch,
            id: <DocumentId as redb::Value>::from_bytes(id),
        }
    }

    fn as_bytes<'a, 'b: 'a>(value: &'a Self::SelfType<'b>) -> Self::AsBytes<'a>
    where
        Self: 'b,
    {
        let id = <DocumentId as redb::Value>::as_bytes(&value.id);
        let mut bytes = Vec::with_capacity(TIMESTAMP_LEN + id.len());
        bytes.extend_from_slice(&encode_timestamp(value.updated_at));
        bytes.extend_from_slice(id);
        bytes
    }

    fn type_name() -> TypeName {
        TypeName::new("easy_preview::TtlKey")
    }
}
