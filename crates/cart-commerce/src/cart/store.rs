//! The cart store: stock-checked mutations over a persisted cart.

use std::num::NonZeroU32;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cart::{Cart, CartEntry, Notice, Operation, Outcome};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::ports::{Notifier, PersistenceChannel, ProductCatalog, StockLedger};

/// Holds the shopper's cart and applies add / remove / set-amount requests.
///
/// Every mutation builds the next cart on the side, writes its snapshot
/// through the persistence channel and only then replaces the in-memory
/// cart, so readers never observe a half-applied change and a failed write
/// leaves the cart as it was.
///
/// Operations take `&mut self`; two requests against the same store cannot
/// overlap.
///
/// # Example
///
/// ```rust,ignore
/// let mut store = CartStore::open(catalog, ledger, slot);
///
/// let outcome = store.add(ProductId::new(1)).await;
/// if let Some(notice) = outcome.notice() {
///     show_toast(notice.message);
/// }
/// ```
pub struct CartStore<C, L, P> {
    catalog: C,
    ledger: L,
    persistence: P,
    notifier: Option<Arc<dyn Notifier>>,
    cart: Cart,
}

impl<C, L, P> CartStore<C, L, P>
where
    C: ProductCatalog,
    L: StockLedger,
    P: PersistenceChannel,
{
    /// Create a store, restoring the cart from `persistence`.
    ///
    /// A missing or unreadable snapshot yields an empty cart.
    pub fn open(catalog: C, ledger: L, persistence: P) -> Self {
        let cart = restore(&persistence);
        Self {
            catalog,
            ledger,
            persistence,
            notifier: None,
            cart,
        }
    }

    /// Forward every notice to `notifier` as it is produced.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        self.cart.entries()
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Re-read the snapshot, discarding in-memory state.
    pub fn reload(&mut self) {
        self.cart = restore(&self.persistence);
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart is incremented if the ledger has more
    /// units than the cart holds, otherwise the request is rejected as out of
    /// stock. A new product is appended with amount 1 when the ledger has any
    /// stock; with no stock at all the request is dropped silently.
    pub async fn add(&mut self, id: ProductId) -> Outcome {
        let result = self.try_add(id).await;
        self.finish(Operation::Add, id, result)
    }

    /// Remove a product line entirely.
    pub fn remove(&mut self, id: ProductId) -> Outcome {
        let result = self.try_remove(id);
        self.finish(Operation::Remove, id, result)
    }

    /// Set a product line's amount to exactly `amount`.
    ///
    /// Non-positive amounts are rejected; this never removes a line.
    pub async fn set_amount(&mut self, id: ProductId, amount: i64) -> Outcome {
        let result = self.try_set_amount(id, amount).await;
        self.finish(Operation::UpdateAmount, id, result)
    }

    async fn try_add(&mut self, id: ProductId) -> Result<bool, CartError> {
        if let Some(held) = self.cart.get(id).map(CartEntry::amount) {
            let stock = self.ledger.fetch_stock(id).await?;
            debug!(product_id = %id, held, available = stock.amount, "stock fetched");

            let insufficient = CartError::InsufficientStock {
                product_id: id,
                requested: i64::from(held) + 1,
                available: stock.amount,
            };
            if !stock.allows_increment(held) {
                return Err(insufficient);
            }

            let mut next = self.cart.clone();
            next.increment(id).ok_or(insufficient)?;
            self.commit(next)?;
            return Ok(true);
        }

        let mut product = self.catalog.fetch_product(id).await?;
        let stock = self.ledger.fetch_stock(id).await?;
        debug!(product_id = %id, available = stock.amount, "product and stock fetched");

        if !stock.is_available() {
            debug!(product_id = %id, "new product has no stock, ignoring");
            return Ok(false);
        }

        // Entries are keyed by the id that was requested.
        product.id = id;
        let mut next = self.cart.clone();
        next.push(product);
        self.commit(next)?;
        Ok(true)
    }

    fn try_remove(&mut self, id: ProductId) -> Result<bool, CartError> {
        let mut next = self.cart.clone();
        next.remove(id).ok_or(CartError::NotInCart(id))?;
        self.commit(next)?;
        Ok(true)
    }

    async fn try_set_amount(&mut self, id: ProductId, amount: i64) -> Result<bool, CartError> {
        if !self.cart.contains(id) {
            return Err(CartError::NotInCart(id));
        }

        let invalid = CartError::InvalidAmount {
            product_id: id,
            amount,
        };
        if amount <= 0 {
            return Err(invalid);
        }

        let stock = self.ledger.fetch_stock(id).await?;
        debug!(product_id = %id, requested = amount, available = stock.amount, "stock fetched");
        if !stock.can_fulfill(amount) {
            return Err(CartError::InsufficientStock {
                product_id: id,
                requested: amount,
                available: stock.amount,
            });
        }

        let amount = u32::try_from(amount)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(invalid)?;
        let mut next = self.cart.clone();
        next.set_amount(id, amount);
        self.commit(next)?;
        Ok(true)
    }

    /// Persist `next`, then make it the current cart.
    fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        let snapshot = next.to_snapshot()?;
        self.persistence.save(&snapshot)?;
        self.cart = next;
        Ok(())
    }

    fn finish(
        &self,
        operation: Operation,
        id: ProductId,
        result: Result<bool, CartError>,
    ) -> Outcome {
        match result {
            Ok(true) => {
                info!(
                    operation = operation.as_str(),
                    product_id = %id,
                    amount = self.cart.amount_of(id),
                    entries = self.cart.len(),
                    "cart updated"
                );
                Outcome::Applied
            }
            Ok(false) => Outcome::Unchanged,
            Err(error) => {
                let notice = Notice::for_error(operation, &error);
                warn!(
                    operation = operation.as_str(),
                    product_id = %id,
                    kind = error.kind(),
                    error = %error,
                    "cart operation rejected"
                );
                if let Some(notifier) = &self.notifier {
                    notifier.notify(&notice);
                }
                Outcome::Rejected { error, notice }
            }
        }
    }
}

fn restore<P: PersistenceChannel>(persistence: &P) -> Cart {
    match persistence.load() {
        Ok(Some(snapshot)) => Cart::from_snapshot(&snapshot).unwrap_or_else(|e| {
            warn!(error = %e, "discarding unreadable cart snapshot");
            Cart::new()
        }),
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(error = %e, "failed to load cart snapshot");
            Cart::new()
        }
    }
}
