mod common {
    use crate::store::db::RedbDataset;
    use crate::types::{PreviewSecretRecord, StoreConfig};
    use tempfile::TempDir;

    pub(super) fn create_test_dataset() -> (RedbDataset, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            base_path: temp_dir.path().to_path_buf(),
        };
        let dataset = RedbDataset::open(&config).unwrap();
        (dataset, temp_dir)
    }

    pub(super) fn make_record(secret: &str) -> PreviewSecretRecord {
        PreviewSecretRecord::new(secret.to_string(), "page-home", Some("http://studio.local"))
    }
}

mod upsert {
    use super::common::{create_test_dataset, make_record};
    use std::time::{Duration, SystemTime};

    #[test]
    fn test_insert_then_get() {
        let (dataset, _temp) = create_test_dataset();
        let now = SystemTime::now();
        let record = make_record("s1");

        dataset.upsert(&record, now).unwrap();

        let stored = dataset.get(&record.id).unwrap().unwrap();
        assert_eq!(stored.record, record);
        assert_eq!(stored.created_at, now);
        assert_eq!(stored.updated_at, now);
    }

    #[test]
    fn test_get_missing() {
        let (dataset, _temp) = create_test_dataset();
        let record = make_record("s1");
        assert!(dataset.get(&record.id).unwrap().is_none());
    }

    #[test]
    fn test_replace_keeps_created_at_and_refreshes_index() {
        let (dataset, _temp) = create_test_dataset();
        let first = SystemTime::now();
        let second = first + Duration::from_secs(30);

        let mut record = make_record("s1");
        dataset.upsert(&record, first).unwrap();

        record.secret = "s2".to_string();
        dataset.upsert(&record, second).unwrap();

        let stored = dataset.get(&record.id).unwrap().unwrap();
        assert_eq!(stored.record.secret, "s2");
        assert_eq!(stored.created_at, first);
        assert_eq!(stored.updated_at, second);

        // One index entry, not two
        assert_eq!(dataset.ids().unwrap(), vec![record.id.clone()]);
    }

    #[test]
    fn test_reopen_preserves_records() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = crate::types::StoreConfig {
            base_path: temp_dir.path().to_path_buf(),
        };
        let record = make_record("persisted");

        {
            let dataset = crate::store::RedbDataset::open(&config).unwrap();
            dataset.upsert(&record, SystemTime::now()).unwrap();
        }

        let dataset = crate::store::RedbDataset::open(&config).unwrap();
        assert!(dataset.get(&record.id).unwrap().is_some());
    }
}

mod delete_matching {
    use super::common::{create_test_dataset, make_record};
    use crate::store::ExpiryQuery;
    use crate::types::SECRET_RECORD_TYPE;
    use std::time::{Duration, SystemTime};

    fn query(cutoff: SystemTime) -> ExpiryQuery {
        ExpiryQuery {
            record_type: SECRET_RECORD_TYPE.to_string(),
            updated_at_or_before: cutoff,
        }
    }

    #[test]
    fn test_deletes_only_old_records() {
        let (dataset, _temp) = create_test_dataset();
        let cutoff = SystemTime::now();

        let old = make_record("old");
        let exact = make_record("exact");
        let fresh = make_record("fresh");
        dataset.upsert(&old, cutoff - Duration::from_secs(1)).unwrap();
        dataset.upsert(&exact, cutoff).unwrap();
        dataset.upsert(&fresh, cutoff + Duration::from_secs(1)).unwrap();

        let mut deleted = dataset.delete_matching(&query(cutoff)).unwrap();
        deleted.sort();
        let mut expected = vec![old.id.clone(), exact.id.clone()];
        expected.sort();

        assert_eq!(deleted, expected);
        assert!(dataset.get(&old.id).unwrap().is_none());
        assert!(dataset.get(&exact.id).unwrap().is_none());
        assert!(dataset.get(&fresh.id).unwrap().is_some());
        assert_eq!(dataset.ids().unwrap(), vec![fresh.id.clone()]);
    }

    #[test]
    fn test_other_types_survive() {
        let (dataset, _temp) = create_test_dataset();
        let cutoff = SystemTime::now();

        let mut foreign = make_record("foreign");
        foreign.record_type = "sanity.somethingElse".to_string();
        dataset.upsert(&foreign, cutoff - Duration::from_secs(60)).unwrap();

        let deleted = dataset.delete_matching(&query(cutoff)).unwrap();
        assert!(deleted.is_empty());
        assert!(dataset.get(&foreign.id).unwrap().is_some());
    }

    #[test]
    fn test_empty_dataset() {
        let (dataset, _temp) = create_test_dataset();
        let deleted = dataset.delete_matching(&query(SystemTime::now())).unwrap();
        assert!(deleted.is_empty());
    }
}
