use super::*;

#[test]
fn id_round_trips_through_redb_codec() {
    let id = DocumentId::try_from("drafts.abc").unwrap();
    assert_eq!(id.as_str(), "drafts.abc");

    let bytes = <DocumentId as redb::Value>::as_bytes(&id);
    let id_from_bytes = <DocumentId as redb::Value>::from_bytes(bytes);
    assert_eq!(id, id_from_bytes);
}

#[test]
fn id_rejects_empty_string() {
    DocumentId::try_from("").unwrap_err();
}

#[test]
fn id_rejects_whitespace_string() {
    DocumentId::try_from("   ").unwrap_err();
}

#[test]
fn id_rejects_too_long_string() {
    let long_string = "a".repeat(MAX_ID_LENGTH + 1);
    DocumentId::try_from(long_string.as_str()).unwrap_err();
}

#[test]
fn new_draft_is_prefixed_and_unique() {
    let a = DocumentId::new_draft();
    let b = DocumentId::new_draft();

    assert!(a.is_draft());
    assert!(b.is_draft());
    assert_ne!(a, b);
}

#[test]
fn published_id_is_not_draft() {
    let id = DocumentId::try_from("page-home").unwrap();
    assert!(!id.is_draft());
}
