//! Integration tests for JsonFileStore using the store test harness.
//!
//! Each test gets its own temporary data directory.

#[macro_use]
mod store_harness;

use invoicer::entities::Expense;
use invoicer::storage::JsonFileStore;
use store_harness::*;

record_store_tests!(async {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::<Expense>::open_in(dir.path()).await.unwrap();
    (store, dir)
});

mod durability_tests {
    use super::*;
    use invoicer::core::service::RecordService;
    use invoicer::core::store::RecordStore;
    use invoicer::entities::ExpenseDraft;
    use std::sync::Arc;

    fn draft(item_name: &str) -> ExpenseDraft {
        serde_json::from_value(serde_json::json!({ "itemName": item_name, "amount": 12.5 }))
            .unwrap()
    }

    #[tokio::test]
    async fn test_counter_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = JsonFileStore::<Expense>::open_in(dir.path()).await.unwrap();
            let service = RecordService::new(Arc::new(store));
            service.create(draft("Pens")).await.unwrap();
            service.create(draft("Paper")).await.unwrap();
        }

        let store = JsonFileStore::<Expense>::open_in(dir.path()).await.unwrap();
        assert_eq!(store.last_sequence().await.unwrap(), 2);

        let service = RecordService::new(Arc::new(store));
        let created = service.create(draft("Stapler")).await.unwrap();
        assert_eq!(created.id, "EXP-003");
    }

    #[tokio::test]
    async fn test_deleted_tail_id_is_not_reissued() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<Expense>::open_in(dir.path()).await.unwrap();
        let service = RecordService::new(Arc::new(store));

        service.create(draft("Pens")).await.unwrap();
        let second = service.create(draft("Paper")).await.unwrap();
        service.delete(&second.id).await.unwrap();

        let third = service.create(draft("Stapler")).await.unwrap();
        assert_eq!(third.id, "EXP-003");
    }

    #[tokio::test]
    async fn test_file_uses_persisted_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<Expense>::open_in(dir.path()).await.unwrap();
        let service = RecordService::new(Arc::new(store));
        service.create(draft("Pens")).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("expenses.json")).unwrap();
        let document: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(document["lastSequenceNumber"], 1);
        assert_eq!(document["records"][0]["id"], "EXP-001");
        assert_eq!(document["records"][0]["itemName"], "Pens");
    }
}
