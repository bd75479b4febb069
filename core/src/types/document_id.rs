use nutype::nutype;
use redb::TypeName;
use std::cmp::Ordering;
use std::str;

pub const MAX_ID_LENGTH: usize = 128;

/// Prefix marking a document id as a draft. Drafts are never published.
pub const DRAFTS_PREFIX: &str = "drafts.";

#[nutype(
    new_unchecked,
    sanitize(trim),
    validate(not_empty, len_char_max = MAX_ID_LENGTH),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Borrow,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct DocumentId(String);

impl DocumentId {
    /// Mints a fresh draft id (`drafts.<uuid>`).
    pub fn new_draft() -> Self {
        let id = format!("{DRAFTS_PREFIX}{}", uuid::Uuid::new_v4());
        Self::try_new(id).expect("generated draft id is always valid")
    }

    pub fn is_draft(&self) -> bool {
        self.starts_with(DRAFTS_PREFIX)
    }
}

impl redb::Key for DocumentId {
    fn compare(data1: &[u8], data2: &[u8]) -> Ordering {
        let s1 = str::from_utf8(data1).expect("invalid UTF-8 in document id");
        let s2 = str::from_utf8(data2).expect("invalid UTF-8 in document id");

        s1.cmp(s2)
    }
}

impl redb::Value for DocumentId {
    type SelfType<'a> = Self;
    type AsBytes<'a> = &'a [u8];

    fn fixed_width() -> Option<usize> {
        None
    }

    fn from_bytes<'a>(data: &'a [u8]) -> Self::SelfType<'a>
    where
        Self: 'a,
    {
        let s = str::from_utf8(data).expect("invalid UTF-8 in document id");
        Self::try_from(s).expect("stored document id is valid")
    }

    fn as_bytes<'a, 'b: 'a>(value: &'a Self::SelfType<'b>) -> Self::AsBytes<'a>
    where
        Self: 'b,
    {
        value.as_bytes()
    }

    fn type_name() -> TypeName {
        TypeName::new("easy_preview::DocumentId")
    }
}

#[cfg(test)]
mod tests;
