use super::*;
use std::time::{Duration, SystemTime};

#[test]
fn new_record_is_a_fresh_draft_of_the_secret_type() {
    let a = PreviewSecretRecord::new("s1".to_string(), "page-home", None);
    let b = PreviewSecretRecord::new("s2".to_string(), "page-home", Some("http://studio"));

    assert!(a.id.is_draft());
    assert_ne!(a.id, b.id);
    assert_eq!(a.record_type, SECRET_RECORD_TYPE);
    assert_eq!(a.studio_url, "");
    assert_eq!(b.studio_url, "http://studio");
    assert_eq!(b.source, "page-home");
}

#[test]
fn record_serializes_with_dataset_field_names() {
    let record = PreviewSecretRecord {
        id: DocumentId::try_from("drafts.x").unwrap(),
        record_type: SECRET_RECORD_TYPE.to_string(),
        secret: "abc".to_string(),
        source: "page-home".to_string(),
        studio_url: String::new(),
    };

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["_id"], "drafts.x");
    assert_eq!(json["_type"], "sanity.previewUrlSecret");
    assert_eq!(json["studioUrl"], "");
}

#[test]
fn versioned_record_keeps_timestamps() {
    let created_at = SystemTime::now();
    let updated_at = created_at + Duration::from_secs(5);
    let record = PreviewSecretRecord::new("secret".to_string(), "post-1", None);
    let v1 = v1::Record::from_record(&record, created_at, updated_at);

    let bytes = <VersionedRecord as redb::Value>::as_bytes(&VersionedRecord::V1(v1.clone()));
    let decoded = <VersionedRecord as redb::Value>::from_bytes(&bytes);

    let stored = decoded.into_stored(record.id.clone());
    assert_eq!(stored.record, record);
    assert_eq!(stored.created_at, created_at);
    assert_eq!(stored.updated_at, updated_at);
}
