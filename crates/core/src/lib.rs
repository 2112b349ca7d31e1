//! `storefront-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod clock;
pub mod context;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{ContextError, RequestContext};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, UserId};
pub use value_object::ValueObject;
