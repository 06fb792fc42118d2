//! Macro-generated test suite for the `RecordStore<Expense>` contract.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use invoicer::storage::InMemoryRecordStore;
//!
//! record_store_tests!(async { (InMemoryRecordStore::<Expense>::new(), ()) });
//! ```
//!
//! # Generated Tests
//!
//! - `test_list_empty`: a fresh store has no records and a zero counter
//! - `test_put_and_get`: a stored record reads back unchanged
//! - `test_get_nonexistent`: unknown id reads as `None`
//! - `test_list_preserves_insertion_order`
//! - `test_put_replaces_in_place`: same id overwrites without moving
//! - `test_delete_existing` / `test_delete_nonexistent`
//! - `test_insert_advances_counter`: record and counter written together
//! - `test_insert_rejects_existing_id`: a taken id leaves the store untouched
//! - `test_replace_all`: records and counter swapped together
//! - `test_concurrent_puts`: parallel writers from spawned tasks

/// Generate a full `RecordStore<Expense>` conformance test suite.
///
/// `$factory` must be a future resolving to `(store, guard)`. The guard is
/// held for the duration of each test (e.g. a `tempfile::TempDir`). It is
/// re-evaluated for each test to ensure isolation.
#[macro_export]
macro_rules! record_store_tests {
    ($factory:expr) => {
        mod record_store_contract_tests {
            use super::*;
            use invoicer::core::store::RecordStore;
            use invoicer::entities::Expense;
            use std::sync::Arc;

            #[tokio::test]
            async fn test_list_empty() {
                let (store, _guard) = $factory.await;
                assert!(store.list().await.unwrap().is_empty());
                assert_eq!(store.last_sequence().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_put_and_get() {
                let (store, _guard) = $factory.await;
                let expense = sample_expense("EXP-001", "Laptop", 999.0);

                let stored = store.put(expense.clone()).await.unwrap();
                assert_eq!(stored, expense);

                let retrieved: Option<Expense> = store.get("EXP-001").await.unwrap();
                assert_eq!(retrieved, Some(expense));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let (store, _guard) = $factory.await;
                assert!(store.get("EXP-404").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_preserves_insertion_order() {
                let (store, _guard) = $factory.await;
                for (id, name) in [("EXP-003", "Chair"), ("EXP-001", "Desk"), ("EXP-002", "Lamp")] {
                    store.put(sample_expense(id, name, 10.0)).await.unwrap();
                }

                let ids: Vec<String> = store
                    .list()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|e| e.id)
                    .collect();
                assert_eq!(ids, vec!["EXP-003", "EXP-001", "EXP-002"]);
            }

            #[tokio::test]
            async fn test_put_replaces_in_place() {
                let (store, _guard) = $factory.await;
                store.put(sample_expense("EXP-001", "Desk", 10.0)).await.unwrap();
                store.put(sample_expense("EXP-002", "Lamp", 20.0)).await.unwrap();

                store
                    .put(sample_expense("EXP-001", "Standing desk", 450.0))
                    .await
                    .unwrap();

                let all = store.list().await.unwrap();
                assert_eq!(all.len(), 2);
                assert_eq!(all[0].id, "EXP-001");
                assert_eq!(all[0].item_name, "Standing desk");
                assert_eq!(all[1].id, "EXP-002");
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let (store, _guard) = $factory.await;
                store.put(sample_expense("EXP-001", "Desk", 10.0)).await.unwrap();

                assert!(store.delete("EXP-001").await.unwrap());
                assert!(store.get("EXP-001").await.unwrap().is_none());
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let (store, _guard) = $factory.await;
                store.put(sample_expense("EXP-001", "Desk", 10.0)).await.unwrap();

                assert!(!store.delete("EXP-999").await.unwrap());
                assert_eq!(store.list().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_insert_advances_counter() {
                let (store, _guard) = $factory.await;
                let expense = sample_expense("EXP-041", "Printer", 150.0);

                let stored = store.insert(expense.clone(), 41).await.unwrap();
                assert_eq!(stored, expense);
                assert_eq!(store.last_sequence().await.unwrap(), 41);
                assert_eq!(store.get("EXP-041").await.unwrap(), Some(expense));
            }

            #[tokio::test]
            async fn test_insert_rejects_existing_id() {
                let (store, _guard) = $factory.await;
                store
                    .insert(sample_expense("EXP-001", "Desk", 10.0), 1)
                    .await
                    .unwrap();

                let result = store
                    .insert(sample_expense("EXP-001", "Lamp", 20.0), 2)
                    .await;
                assert!(matches!(
                    result,
                    Err(invoicer::core::error::InvoicerError::Record(
                        invoicer::core::error::RecordError::AlreadyExists { .. }
                    ))
                ));

                let all = store.list().await.unwrap();
                assert_eq!(all.len(), 1);
                assert_eq!(all[0].item_name, "Desk");
                assert_eq!(store.last_sequence().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_replace_all() {
                let (store, _guard) = $factory.await;
                store
                    .insert(sample_expense("EXP-001", "Desk", 10.0), 1)
                    .await
                    .unwrap();

                store
                    .replace_all(
                        vec![
                            sample_expense("EXP-010", "Monitor", 300.0),
                            sample_expense("EXP-004", "Cable", 5.0),
                        ],
                        10,
                    )
                    .await
                    .unwrap();

                let ids: Vec<String> = store
                    .list()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|e| e.id)
                    .collect();
                assert_eq!(ids, vec!["EXP-010", "EXP-004"]);
                assert!(store.get("EXP-001").await.unwrap().is_none());
                assert_eq!(store.last_sequence().await.unwrap(), 10);
            }

            #[tokio::test]
            async fn test_concurrent_puts() {
                let (store, _guard) = $factory.await;
                let store = Arc::new(store);

                let handles: Vec<_> = (1..=10)
                    .map(|n| {
                        let store = store.clone();
                        tokio::spawn(async move {
                            let id = format!("EXP-{:03}", n);
                            store.put(sample_expense(&id, "Paper", 1.0)).await.unwrap();
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.await.unwrap();
                }

                assert_eq!(store.list().await.unwrap().len(), 10);
            }
        }
    };
}
