//! Product metadata.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Keys owned by the cart entry or by `Product`'s named fields. An `extra`
/// field under one of these would be serialized twice.
const RESERVED_KEYS: [&str; 6] = ["id", "name", "title", "price", "image", "amount"];

/// A product as returned by the catalog.
///
/// The cart never interprets `name`, `price` or `image`; they are carried
/// through to the snapshot for the rendering layer. `price` is kept as raw
/// JSON so catalogs that send strings or `null` still decode. Any additional
/// fields the catalog returns are kept in `extra` so a snapshot round-trip is
/// lossless.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(alias = "title", default)]
    pub name: String,
    /// Unit price as reported by the catalog.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub price: serde_json::Value,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Fields the cart does not know about.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product with the standard display fields.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: serde_json::Value::from(price),
            image: image.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an extra passthrough field.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Drop passthrough fields that collide with cart-owned keys.
    pub fn strip_reserved(&mut self) {
        self.extra.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));
    }
}
