//! Collaborator contracts consumed by the use cases.
//!
//! Every call receives the caller's [`RequestContext`] unchanged. Implementations
//! own cancellation, deadlines, locking and durability.

use std::sync::Arc;

use thiserror::Error;

use storefront_core::{ContextError, ProductId, RequestContext, UserId};
use storefront_products::{Discount, Product, Purchase};

/// Collaborator failure.
///
/// These are **infrastructure errors** (storage, eligibility service, request
/// lifetime) as opposed to domain errors. Use cases propagate them with call-site
/// context and never reclassify them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("user {user_id} is not eligible: {reason}")]
    Ineligible { user_id: UserId, reason: String },

    #[error("request cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error("backend failure: {0}")]
    Backend(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<ContextError> for RepositoryError {
    fn from(value: ContextError) -> Self {
        match value {
            ContextError::Cancelled => RepositoryError::Cancelled,
            ContextError::DeadlineExceeded => RepositoryError::DeadlineExceeded,
        }
    }
}

/// Product storage.
pub trait ProductRepository: Send + Sync {
    /// Fails with [`RepositoryError::NotFound`] if absent.
    fn find_by_id(&self, ctx: &RequestContext, id: ProductId) -> Result<Product, RepositoryError>;

    fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        user_id: UserId,
    ) -> Result<Product, RepositoryError>;

    fn delete(&self, ctx: &RequestContext, id: ProductId) -> Result<(), RepositoryError>;
}

/// Everything a purchase needs from the outside world.
pub trait PurchaseRepository: Send + Sync {
    /// Succeeds silently if `user_id` may purchase at all.
    fn check_user_eligibility(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> Result<(), RepositoryError>;

    fn find_product(
        &self,
        ctx: &RequestContext,
        product_id: ProductId,
    ) -> Result<Product, RepositoryError>;

    fn find_product_discounts(
        &self,
        ctx: &RequestContext,
        product_id: ProductId,
    ) -> Result<Vec<Discount>, RepositoryError>;

    /// Durably records the final pricing decision.
    fn create_purchase(
        &self,
        ctx: &RequestContext,
        purchase: &Purchase,
    ) -> Result<(), RepositoryError>;
}

// Shared and borrowed repositories are repositories too.
macro_rules! forward_repositories {
    ($($target:ty),*) => {$(
        impl<S> ProductRepository for $target
        where
            S: ProductRepository + ?Sized,
        {
            fn find_by_id(
                &self,
                ctx: &RequestContext,
                id: ProductId,
            ) -> Result<Product, RepositoryError> {
                (**self).find_by_id(ctx, id)
            }

            fn create(
                &self,
                ctx: &RequestContext,
                name: &str,
                user_id: UserId,
            ) -> Result<Product, RepositoryError> {
                (**self).create(ctx, name, user_id)
            }

            fn delete(&self, ctx: &RequestContext, id: ProductId) -> Result<(), RepositoryError> {
                (**self).delete(ctx, id)
            }
        }

        impl<S> PurchaseRepository for $target
        where
            S: PurchaseRepository + ?Sized,
        {
            fn check_user_eligibility(
                &self,
                ctx: &RequestContext,
                user_id: UserId,
            ) -> Result<(), RepositoryError> {
                (**self).check_user_eligibility(ctx, user_id)
            }

            fn find_product(
                &self,
                ctx: &RequestContext,
                product_id: ProductId,
            ) -> Result<Product, RepositoryError> {
                (**self).find_product(ctx, product_id)
            }

            fn find_product_discounts(
                &self,
                ctx: &RequestContext,
                product_id: ProductId,
            ) -> Result<Vec<Discount>, RepositoryError> {
                (**self).find_product_discounts(ctx, product_id)
            }

            fn create_purchase(
                &self,
                ctx: &RequestContext,
                purchase: &Purchase,
            ) -> Result<(), RepositoryError> {
                (**self).create_purchase(ctx, purchase)
            }
        }
    )*};
}

forward_repositories!(Arc<S>, &S);
