//! Cart operations against the in-memory storefront.

use cart_cache::{KvBackend, MemoryStore};
use cart_commerce::cart::{Outcome, OUT_OF_STOCK_MESSAGE};
use cart_commerce::config::DEFAULT_STORAGE_KEY;
use cart_commerce::{CartError, ProductId};
use cart_integration_tests::{open_store, storefront, RecordingNotifier};
use cart_observability::TracingNotifier;
use serde_json::json;

fn id(n: u64) -> ProductId {
    ProductId::new(n)
}

fn stored(backend: &MemoryStore) -> serde_json::Value {
    let raw = backend
        .get(DEFAULT_STORAGE_KEY)
        .unwrap()
        .expect("snapshot written");
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn shopper_walkthrough() -> anyhow::Result<()> {
    let storefront = storefront()?;
    let backend = MemoryStore::new();
    let notifier = RecordingNotifier::new();
    let mut store = open_store(&storefront, backend.clone()).with_notifier(notifier.clone());

    assert_eq!(store.add(id(1)).await, Outcome::Applied);
    assert_eq!(store.add(id(1)).await, Outcome::Applied);
    assert_eq!(store.cart().amount_of(id(1)), 2);

    assert!(store.set_amount(id(1), 5).await.is_applied());
    assert_eq!(store.cart().amount_of(id(1)), 5);

    let outcome = store.set_amount(id(1), 6).await;
    assert!(outcome.is_rejected());
    assert_eq!(store.cart().amount_of(id(1)), 5);
    assert_eq!(stored(&backend)[0]["amount"], json!(5));

    assert!(store.remove(id(1)).is_applied());
    assert!(store.cart().is_empty());
    assert_eq!(stored(&backend), json!([]));

    assert_eq!(notifier.messages(), vec![OUT_OF_STOCK_MESSAGE]);
    Ok(())
}

#[tokio::test]
async fn out_of_stock_product_is_ignored_silently() -> anyhow::Result<()> {
    let storefront = storefront()?;
    let backend = MemoryStore::new();
    let notifier = RecordingNotifier::new();
    let mut store = open_store(&storefront, backend.clone()).with_notifier(notifier.clone());

    assert_eq!(store.add(id(2)).await, Outcome::Unchanged);
    assert!(store.cart().is_empty());
    assert!(!backend.exists(DEFAULT_STORAGE_KEY)?);
    assert!(notifier.messages().is_empty());
    Ok(())
}

#[tokio::test]
async fn stock_drop_blocks_increment() -> anyhow::Result<()> {
    let storefront = storefront()?;
    let mut store = open_store(&storefront, MemoryStore::new());

    assert!(store.add(id(3)).await.is_applied());
    storefront.set_stock(3, 1);

    let outcome = store.add(id(3)).await;
    assert_eq!(
        outcome.error(),
        Some(&CartError::InsufficientStock {
            product_id: id(3),
            requested: 2,
            available: 1,
        })
    );
    assert_eq!(store.cart().amount_of(id(3)), 1);

    storefront.set_stock(3, 4);
    assert!(store.add(id(3)).await.is_applied());
    assert_eq!(store.cart().amount_of(id(3)), 2);
    Ok(())
}

#[tokio::test]
async fn catalog_outage_reports_generic_failure() -> anyhow::Result<()> {
    let storefront = storefront()?;
    let notifier = RecordingNotifier::new();
    let mut store = open_store(&storefront, MemoryStore::new()).with_notifier(notifier.clone());

    storefront.remove(1);
    let outcome = store.add(id(1)).await;
    assert_eq!(outcome.error().map(CartError::kind), Some("upstream"));
    assert_eq!(notifier.messages(), vec!["Failed to add product"]);
    Ok(())
}

#[tokio::test]
async fn rejected_operations_leave_storage_untouched() -> anyhow::Result<()> {
    let storefront = storefront()?;
    let backend = MemoryStore::new();
    let mut store = open_store(&storefront, backend.clone()).with_notifier(std::sync::Arc::new(TracingNotifier));

    assert!(store.add(id(1)).await.is_applied());
    assert!(store.add(id(3)).await.is_applied());
    let before = stored(&backend);

    assert!(store.remove(id(2)).is_rejected());
    assert!(store.set_amount(id(1), 0).await.is_rejected());
    assert!(store.set_amount(id(1), -1).await.is_rejected());
    assert!(store.set_amount(id(2), 1).await.is_rejected());
    assert!(store.set_amount(id(3), 3).await.is_rejected());

    assert_eq!(stored(&backend), before);
    let ids: Vec<u64> = store.entries().iter().map(|e| e.id().get()).collect();
    assert_eq!(ids, vec![1, 3]);
    Ok(())
}
