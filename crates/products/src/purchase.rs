use serde::{Deserialize, Serialize};

use storefront_core::{ProductId, ValueObject};

/// A completed pricing decision for one purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub product_id: ProductId,
    /// Unit price before discounts.
    pub base_price: i64,
    /// Final unit price minus base price (zero or negative).
    pub discount: i64,
    pub unit: i64,
}

impl Purchase {
    /// Unit price after discounts.
    pub fn unit_price(&self) -> i64 {
        self.base_price + self.discount
    }
}

impl ValueObject for Purchase {}
