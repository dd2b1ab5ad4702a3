//! Shared fixtures for the end-to-end cart tests.
//!
//! The tests under `tests/` build a real [`CartStore`] on top of
//! [`InMemoryStorefront`] and a [`CartSlot`], then inspect what landed in
//! storage.

use std::sync::{Arc, Mutex};

use cart_cache::{CartSlot, KvBackend};
use cart_commerce::cart::{CartStore, Notice};
use cart_commerce::ports::Notifier;
use cart_data::InMemoryStorefront;

/// Two products from the demo storefront, with 5 and 0 units in stock.
pub const STOREFRONT_DB: &str = r#"{
    "products": [
        {
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"
        },
        {
            "id": 2,
            "title": "Tênis VR Caminhada Confortável Detalhes Couro Masculino",
            "price": 139.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis2.jpg"
        },
        {
            "id": 3,
            "title": "Tênis Adidas Duramo Lite 2.0",
            "price": 219.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis3.jpg",
            "brand": "Adidas"
        }
    ],
    "stock": [
        { "id": 1, "amount": 5 },
        { "id": 2, "amount": 0 },
        { "id": 3, "amount": 2 }
    ]
}"#;

/// Store wired to an in-memory storefront and the given backend.
pub type TestStore<B> = CartStore<InMemoryStorefront, InMemoryStorefront, CartSlot<B>>;

/// Load the demo storefront.
pub fn storefront() -> anyhow::Result<InMemoryStorefront> {
    Ok(InMemoryStorefront::from_json(STOREFRONT_DB)?)
}

/// Open a store over `backend` using the default cart key.
pub fn open_store<B: KvBackend>(storefront: &InMemoryStorefront, backend: B) -> TestStore<B> {
    CartStore::open(
        storefront.clone(),
        storefront.clone(),
        CartSlot::with_default_key(backend),
    )
}

/// Notifier that records what it is shown.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.notices
            .lock()
            .map(|notices| notices.iter().map(|n| n.message).collect())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(*notice);
        }
    }
}
