//! Products domain module.
//!
//! This crate contains the catalog and pricing rules (products, discounts and
//! the purchase pricing computation), implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod discount;
pub mod pricing;
pub mod product;
pub mod purchase;

pub use discount::{Discount, DiscountId};
pub use pricing::PurchasePricingService;
pub use product::{Product, ProductName};
pub use purchase::Purchase;
