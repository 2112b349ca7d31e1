//! Purchase pricing: which discounts apply and what the buyer pays.

use storefront_core::{DomainError, DomainResult};

use crate::discount::Discount;
use crate::product::Product;
use crate::purchase::Purchase;

/// Stateless pricing computation, called once per purchase request.
#[derive(Debug, Default, Copy, Clone)]
pub struct PurchasePricingService;

impl PurchasePricingService {
    pub fn new() -> Self {
        Self
    }

    /// Filters `discounts` down to the valid ones whose quantity gate `unit`
    /// meets, applies them to `product`, and records the outcome.
    ///
    /// Any structurally invalid discount aborts the whole computation with
    /// `NegativePrice` before any price is touched. A discount whose gate is
    /// not met is skipped, not an error.
    pub fn prepare_purchase(
        &self,
        unit: i64,
        product: &Product,
        discounts: &[Discount],
    ) -> DomainResult<Purchase> {
        let base_price = product.price();

        let mut accepted = Vec::with_capacity(discounts.len());
        for discount in discounts {
            if !discount.is_valid() {
                return Err(DomainError::NegativePrice);
            }
            if !discount.applies_to(unit) {
                continue;
            }
            accepted.push(discount.clone());
        }

        let priced = product.with_discount(&accepted)?;

        Ok(Purchase {
            product_id: priced.id_typed(),
            base_price,
            discount: priced.price() - base_price,
            unit,
        })
    }
}
