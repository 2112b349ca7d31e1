use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId, UserId};

use crate::discount::Discount;

static PRODUCT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9 ]+$").expect("static product name pattern"));

/// Display name of a product.
///
/// Validity is a predicate, not a construction rule: repositories may hold
/// names that would be rejected on create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// True iff the whole name is ASCII letters, digits and spaces (at least one).
    pub fn valid(&self) -> bool {
        PRODUCT_NAME.is_match(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for ProductName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entity: Product.
///
/// Publication and ownership are computed on every call and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: ProductName,
    published_at: Option<DateTime<Utc>>,
    user_id: UserId,
    price: i64, // Smallest currency unit (e.g., cents)
}

impl Product {
    /// An unpublished product.
    pub fn new(id: ProductId, name: impl Into<ProductName>, user_id: UserId, price: i64) -> Self {
        Self {
            id,
            name: name.into(),
            published_at: None,
            user_id,
            price,
        }
    }

    pub fn with_published_at(mut self, published_at: Option<DateTime<Utc>>) -> Self {
        self.published_at = published_at;
        self
    }

    pub fn with_price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    /// Published iff `published_at` is set and strictly before `now`.
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        match self.published_at {
            Some(at) => at < now,
            None => false,
        }
    }

    /// [`Product::is_published_at`] against the wall clock.
    pub fn is_published(&self) -> bool {
        self.is_published_at(Utc::now())
    }

    pub fn is_mine(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Returns a copy priced with every discount amount added, in order.
    ///
    /// Validity and minimum-quantity gating are the caller's job. On
    /// `NegativePrice` the receiver is untouched and no copy escapes.
    pub fn with_discount(&self, discounts: &[Discount]) -> DomainResult<Product> {
        let mut price = self.price;
        for discount in discounts {
            price = price
                .checked_add(discount.amount)
                .ok_or_else(|| DomainError::validation("price overflow"))?;
        }

        if price < 0 {
            return Err(DomainError::NegativePrice);
        }

        Ok(self.clone().with_price(price))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
