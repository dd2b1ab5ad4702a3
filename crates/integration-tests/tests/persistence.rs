//! Snapshots surviving a restart.

use cart_cache::{CartSlot, FileStore, KvBackend, MemoryStore};
use cart_commerce::cart::CartStore;
use cart_commerce::catalog::Product;
use cart_commerce::config::{CartConfig, DEFAULT_STORAGE_KEY};
use cart_commerce::ProductId;
use cart_integration_tests::{open_store, storefront};
use serde_json::json;

#[tokio::test]
async fn file_snapshot_survives_restart() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("storage.json");
    let storefront = storefront()?;

    {
        let mut store = open_store(&storefront, FileStore::open(&path)?);
        assert!(store.add(ProductId::new(3)).await.is_applied());
        assert!(store.add(ProductId::new(1)).await.is_applied());
        assert!(store.add(ProductId::new(3)).await.is_applied());
    }

    let store = open_store(&storefront, FileStore::open(&path)?);
    let restored: Vec<(u64, u32)> = store
        .entries()
        .iter()
        .map(|e| (e.id().get(), e.amount()))
        .collect();
    assert_eq!(restored, vec![(3, 2), (1, 1)]);

    // Fields the cart does not model survive the round-trip.
    assert_eq!(
        store.entries()[0].product.extra.get("brand"),
        Some(&json!("Adidas"))
    );
    Ok(())
}

#[tokio::test]
async fn catalog_amount_field_survives_restart() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("storage.json");
    let storefront = storefront()?;
    storefront.insert_product(Product::new(9, "Boot", 249.9, "boot.png").with_field("amount", json!(7)));
    storefront.set_stock(9, 5);

    {
        let mut store = open_store(&storefront, FileStore::open(&path)?);
        assert!(store.add(ProductId::new(9)).await.is_applied());
    }

    let store = open_store(&storefront, FileStore::open(&path)?);
    assert_eq!(store.entries().len(), 1);
    assert_eq!(store.cart().amount_of(ProductId::new(9)), 1);
    Ok(())
}

#[tokio::test]
async fn snapshot_uses_storefront_wire_format() -> anyhow::Result<()> {
    let backend = MemoryStore::new();
    let mut store = open_store(&storefront()?, backend.clone());
    assert!(store.add(ProductId::new(1)).await.is_applied());

    let raw = backend.get(DEFAULT_STORAGE_KEY)?.unwrap_or_default();
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(
        value,
        json!([{
            "id": 1,
            "name": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg",
            "amount": 1
        }])
    );
    Ok(())
}

#[tokio::test]
async fn corrupt_snapshot_starts_empty_and_is_replaced() -> anyhow::Result<()> {
    let backend = MemoryStore::new();
    backend.set(DEFAULT_STORAGE_KEY, "[{\"id\": 1, \"amount\": 0}]")?;

    let mut store = open_store(&storefront()?, backend.clone());
    assert!(store.cart().is_empty());

    assert!(store.add(ProductId::new(1)).await.is_applied());
    let raw = backend.get(DEFAULT_STORAGE_KEY)?.unwrap_or_default();
    assert!(raw.contains("\"amount\":1"));
    Ok(())
}

#[tokio::test]
async fn configured_slot_uses_configured_key() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("local-storage.json");
    let config = CartConfig::from_toml_str(&format!(
        "[storage]\nkey = \"@shop:cart\"\npath = {:?}\n",
        path.display().to_string()
    ))?;

    let storefront = storefront()?;
    let slot = CartSlot::from_config(&config.storage)?;
    let mut store = CartStore::open(storefront.clone(), storefront.clone(), slot);
    assert!(store.add(ProductId::new(1)).await.is_applied());

    let file = FileStore::open(&path)?;
    assert_eq!(file.keys()?, vec!["@shop:cart".to_string()]);
    Ok(())
}

#[tokio::test]
async fn reload_sees_writes_from_another_store() -> anyhow::Result<()> {
    let storefront = storefront()?;
    let backend = MemoryStore::new();
    let mut first = open_store(&storefront, backend.clone());
    let mut second = open_store(&storefront, backend.clone());

    assert!(first.add(ProductId::new(1)).await.is_applied());
    assert!(second.cart().is_empty());

    second.reload();
    assert_eq!(second.cart().amount_of(ProductId::new(1)), 1);
    Ok(())
}
