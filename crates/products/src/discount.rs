use serde::{Deserialize, Serialize};

use storefront_core::{Entity, ProductId};

/// Discount identifier (repository-assigned).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountId(pub i64);

impl core::fmt::Display for DiscountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A flat markdown on one product, gated by a minimum purchase quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub id: DiscountId,
    pub name: String,
    pub product_id: ProductId,
    /// Negative amount deducted from the unit price.
    pub amount: i64,
    pub min_purchase_qty: i64,
}

impl Discount {
    /// Structural correctness: a markdown with a positive quantity gate.
    ///
    /// Says nothing about whether the discount applies to a given purchase.
    pub fn is_valid(&self) -> bool {
        self.amount < 0 && self.min_purchase_qty > 0
    }

    /// Whether the quantity gate is met for `unit` items.
    pub fn applies_to(&self, unit: i64) -> bool {
        unit >= self.min_purchase_qty
    }
}

impl Entity for Discount {
    type Id = DiscountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discount(amount: i64, min_purchase_qty: i64) -> Discount {
        Discount {
            id: DiscountId(1),
            name: "5$ off if you buy 2".to_string(),
            product_id: ProductId::new(),
            amount,
            min_purchase_qty,
        }
    }

    #[test]
    fn negative_amount_with_positive_qty_is_valid() {
        assert!(discount(-5, 2).is_valid());
    }

    #[test]
    fn positive_amount_is_invalid() {
        assert!(!discount(5, 2).is_valid());
    }

    #[test]
    fn non_positive_qty_is_invalid() {
        assert!(!discount(-5, -1).is_valid());
        assert!(!discount(-5, 0).is_valid());
    }

    #[test]
    fn zero_amount_is_invalid() {
        assert!(!discount(0, 1).is_valid());
    }

    #[test]
    fn applies_at_or_above_min_qty() {
        let d = discount(-5, 2);
        assert!(!d.applies_to(1));
        assert!(d.applies_to(2));
        assert!(d.applies_to(3));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn validity_matches_sign_rules(amount in -100i64..100, qty in -10i64..10) {
                prop_assert_eq!(discount(amount, qty).is_valid(), amount < 0 && qty > 0);
            }
        }
    }
}
