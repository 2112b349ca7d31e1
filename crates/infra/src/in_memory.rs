use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use storefront_core::{ProductId, RequestContext, UserId};
use storefront_products::{Discount, DiscountId, Product, Purchase};
use storefront_purchasing::{ProductRepository, PurchaseRepository, RepositoryError};

#[derive(Debug, Default)]
struct CatalogState {
    products: HashMap<ProductId, Product>,
    discounts: Vec<Discount>,
    last_discount_id: i64,
    blocked_users: HashMap<UserId, String>,
    purchases: Vec<Purchase>,
}

/// In-memory catalog: products, discounts, user standing and purchases.
///
/// Intended for tests/dev. Implements both repository ports. Every call checks
/// the request context before touching state.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogState>, RepositoryError> {
        self.state
            .read()
            .map_err(|_| RepositoryError::backend("lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogState>, RepositoryError> {
        self.state
            .write()
            .map_err(|_| RepositoryError::backend("lock poisoned"))
    }

    fn live(ctx: &RequestContext) -> Result<(), RepositoryError> {
        ctx.check_at(Utc::now()).map_err(RepositoryError::from)
    }

    fn get_product(state: &CatalogState, id: ProductId) -> Result<Product, RepositoryError> {
        state
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("product", id))
    }

    fn ensure_price(price: i64) -> Result<(), RepositoryError> {
        if price < 0 {
            return Err(RepositoryError::backend(format!(
                "negative price {price} cannot be persisted"
            )));
        }
        Ok(())
    }

    /// Stores `product`, replacing any product with the same id.
    ///
    /// A stored product never has a negative price.
    pub fn insert_product(&self, product: Product) -> Result<(), RepositoryError> {
        Self::ensure_price(product.price())?;
        self.write()?.products.insert(product.id_typed(), product);
        Ok(())
    }

    pub fn publish(
        &self,
        id: ProductId,
        published_at: DateTime<Utc>,
    ) -> Result<Product, RepositoryError> {
        self.update_product(id, |p| p.with_published_at(Some(published_at)))
    }

    pub fn set_price(&self, id: ProductId, price: i64) -> Result<Product, RepositoryError> {
        Self::ensure_price(price)?;
        self.update_product(id, |p| p.with_price(price))
    }

    fn update_product(
        &self,
        id: ProductId,
        f: impl FnOnce(Product) -> Product,
    ) -> Result<Product, RepositoryError> {
        let mut state = self.write()?;
        let current = Self::get_product(&state, id)?;
        let updated = f(current);
        state.products.insert(id, updated.clone());
        Ok(updated)
    }

    /// Adds a discount and returns its newly assigned id.
    ///
    /// No validity check: invalid discounts can be stored and are rejected at
    /// purchase time.
    pub fn add_discount(
        &self,
        product_id: ProductId,
        name: impl Into<String>,
        amount: i64,
        min_purchase_qty: i64,
    ) -> Result<DiscountId, RepositoryError> {
        let mut state = self.write()?;
        state.last_discount_id += 1;
        let id = DiscountId(state.last_discount_id);
        state.discounts.push(Discount {
            id,
            name: name.into(),
            product_id,
            amount,
            min_purchase_qty,
        });
        Ok(id)
    }

    /// Makes `user_id` ineligible to purchase.
    pub fn block_user(&self, user_id: UserId, reason: impl Into<String>) -> Result<(), RepositoryError> {
        self.write()?.blocked_users.insert(user_id, reason.into());
        Ok(())
    }

    /// Recorded purchases, oldest first.
    pub fn purchases(&self) -> Result<Vec<Purchase>, RepositoryError> {
        Ok(self.read()?.purchases.clone())
    }
}

impl ProductRepository for InMemoryCatalog {
    fn find_by_id(&self, ctx: &RequestContext, id: ProductId) -> Result<Product, RepositoryError> {
        Self::live(ctx)?;
        Self::get_product(&*self.read()?, id)
    }

    fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        user_id: UserId,
    ) -> Result<Product, RepositoryError> {
        Self::live(ctx)?;
        let product = Product::new(ProductId::new(), name, user_id, 0);
        self.insert_product(product.clone())?;
        debug!(product_id = %product.id_typed(), "product created");
        Ok(product)
    }

    fn delete(&self, ctx: &RequestContext, id: ProductId) -> Result<(), RepositoryError> {
        Self::live(ctx)?;
        let mut state = self.write()?;
        if state.products.remove(&id).is_none() {
            return Err(RepositoryError::not_found("product", id));
        }
        state.discounts.retain(|d| d.product_id != id);
        debug!(product_id = %id, "product deleted");
        Ok(())
    }
}

impl PurchaseRepository for InMemoryCatalog {
    fn check_user_eligibility(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> Result<(), RepositoryError> {
        Self::live(ctx)?;
        match self.read()?.blocked_users.get(&user_id) {
            Some(reason) => Err(RepositoryError::Ineligible {
                user_id,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn find_product(
        &self,
        ctx: &RequestContext,
        product_id: ProductId,
    ) -> Result<Product, RepositoryError> {
        self.find_by_id(ctx, product_id)
    }

    fn find_product_discounts(
        &self,
        ctx: &RequestContext,
        product_id: ProductId,
    ) -> Result<Vec<Discount>, RepositoryError> {
        Self::live(ctx)?;
        Ok(self
            .read()?
            .discounts
            .iter()
            .filter(|d| d.product_id == product_id)
            .cloned()
            .collect())
    }

    fn create_purchase(
        &self,
        ctx: &RequestContext,
        purchase: &Purchase,
    ) -> Result<(), RepositoryError> {
        Self::live(ctx)?;
        self.write()?.purchases.push(*purchase);
        debug!(product_id = %purchase.product_id, "purchase stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn seeded() -> (InMemoryCatalog, Product) {
        let catalog = InMemoryCatalog::new();
        let product = Product::new(ProductId::new(), "colorful socks", UserId::new(), 10);
        catalog.insert_product(product.clone()).unwrap();
        (catalog, product)
    }

    #[test]
    fn find_missing_product_is_not_found() {
        let catalog = InMemoryCatalog::new();
        let err = catalog
            .find_by_id(&RequestContext::background(), ProductId::new())
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { entity: "product", .. }));
    }

    #[test]
    fn create_stores_unpublished_product_at_zero() {
        let catalog = InMemoryCatalog::new();
        let ctx = RequestContext::background();
        let owner = UserId::new();

        let created = catalog.create(&ctx, "colorful socks", owner).unwrap();
        let found = catalog.find_by_id(&ctx, created.id_typed()).unwrap();

        assert_eq!(found, created);
        assert!(found.is_mine(owner));
        assert!(found.published_at().is_none());
        assert_eq!(found.price(), 0);
    }

    #[test]
    fn delete_removes_product_and_its_discounts() {
        let (catalog, product) = seeded();
        let ctx = RequestContext::background();
        catalog.add_discount(product.id_typed(), "5 off", -5, 2).unwrap();

        catalog.delete(&ctx, product.id_typed()).unwrap();

        assert!(catalog.find_by_id(&ctx, product.id_typed()).is_err());
        assert!(catalog
            .find_product_discounts(&ctx, product.id_typed())
            .unwrap()
            .is_empty());
        assert!(matches!(
            catalog.delete(&ctx, product.id_typed()),
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn discount_ids_increase_and_filter_by_product() {
        let (catalog, product) = seeded();
        let other = ProductId::new();

        let first = catalog.add_discount(product.id_typed(), "a", -1, 1).unwrap();
        let second = catalog.add_discount(other, "b", -1, 1).unwrap();
        let third = catalog.add_discount(product.id_typed(), "c", -2, 3).unwrap();
        assert!(first < second && second < third);

        let found = catalog
            .find_product_discounts(&RequestContext::background(), product.id_typed())
            .unwrap();
        let ids: Vec<_> = found.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[test]
    fn blocked_user_is_ineligible() {
        let catalog = InMemoryCatalog::new();
        let ctx = RequestContext::background();
        let user = UserId::new();

        assert!(catalog.check_user_eligibility(&ctx, user).is_ok());
        catalog.block_user(user, "chargeback").unwrap();
        assert_eq!(
            catalog.check_user_eligibility(&ctx, user),
            Err(RepositoryError::Ineligible {
                user_id: user,
                reason: "chargeback".to_string(),
            })
        );
    }

    #[test]
    fn publish_and_set_price_update_the_stored_product() {
        let (catalog, product) = seeded();
        let at = Utc::now() - Duration::minutes(1);

        catalog.publish(product.id_typed(), at).unwrap();
        catalog.set_price(product.id_typed(), 25).unwrap();

        let stored = catalog
            .find_product(&RequestContext::background(), product.id_typed())
            .unwrap();
        assert_eq!(stored.published_at(), Some(at));
        assert_eq!(stored.price(), 25);
    }

    #[test]
    fn negative_prices_are_never_stored() {
        let (catalog, product) = seeded();
        let ctx = RequestContext::background();

        let negative = Product::new(ProductId::new(), "cheap socks", UserId::new(), -1);
        assert!(matches!(
            catalog.insert_product(negative.clone()),
            Err(RepositoryError::Backend(_))
        ));
        assert!(catalog.find_by_id(&ctx, negative.id_typed()).is_err());

        assert!(matches!(
            catalog.set_price(product.id_typed(), -5),
            Err(RepositoryError::Backend(_))
        ));
        assert_eq!(catalog.find_by_id(&ctx, product.id_typed()).unwrap().price(), 10);
    }

    #[test]
    fn cancelled_context_is_honoured() {
        let (catalog, product) = seeded();
        let ctx = RequestContext::background();
        ctx.cancel();

        assert_eq!(
            catalog.find_by_id(&ctx, product.id_typed()),
            Err(RepositoryError::Cancelled)
        );
        assert_eq!(
            catalog.create_purchase(
                &ctx,
                &Purchase {
                    product_id: product.id_typed(),
                    base_price: 10,
                    discount: 0,
                    unit: 1,
                }
            ),
            Err(RepositoryError::Cancelled)
        );
        assert!(catalog.purchases().unwrap().is_empty());
    }

    #[test]
    fn expired_deadline_is_honoured() {
        let (catalog, product) = seeded();
        let ctx = RequestContext::background().with_deadline(Utc::now() - Duration::seconds(1));

        assert_eq!(
            catalog.find_product_discounts(&ctx, product.id_typed()),
            Err(RepositoryError::DeadlineExceeded)
        );
    }
}
