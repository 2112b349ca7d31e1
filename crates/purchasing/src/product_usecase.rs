//! Product view / create / delete.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use storefront_core::{Clock, ProductId, RequestContext, SystemClock, UserId};
use storefront_products::{Product, ProductName};

use crate::error::UsecaseError;
use crate::ports::ProductRepository;

/// Input: create a product owned by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductDto {
    pub name: String,
    pub user_id: UserId,
}

#[derive(Debug)]
pub struct ProductUsecase<R, C = SystemClock> {
    repo: R,
    clock: C,
}

impl<R> ProductUsecase<R, SystemClock> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R, C> ProductUsecase<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }
}

impl<R, C> ProductUsecase<R, C>
where
    R: ProductRepository,
    C: Clock,
{
    /// Returns a published product.
    ///
    /// Unpublished products are reported exactly like missing ones.
    #[instrument(skip_all, fields(request_id = %ctx.request_id(), product_id = %id))]
    pub fn view(&self, ctx: &RequestContext, id: ProductId) -> Result<Product, UsecaseError> {
        let product = self
            .repo
            .find_by_id(ctx, id)
            .map_err(UsecaseError::repository("product_repo.find_by_id"))?;

        if !product.is_published_at(self.clock.now()) {
            debug!("product hidden: not published");
            return Err(UsecaseError::ProductNotFound);
        }

        Ok(product)
    }

    #[instrument(skip_all, fields(request_id = %ctx.request_id(), user_id = %dto.user_id))]
    pub fn create(&self, ctx: &RequestContext, dto: CreateProductDto) -> Result<Product, UsecaseError> {
        if !ProductName::from(dto.name.as_str()).valid() {
            warn!(name = %dto.name, "product name rejected");
            return Err(UsecaseError::ProductNameBadFormat);
        }

        self.repo
            .create(ctx, &dto.name, dto.user_id)
            .map_err(UsecaseError::repository("product_repo.create"))
    }

    /// Deletes a product on behalf of its owner.
    #[instrument(
        skip_all,
        fields(request_id = %ctx.request_id(), product_id = %id, user_id = %user_id)
    )]
    pub fn delete(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        user_id: UserId,
    ) -> Result<(), UsecaseError> {
        let product = self
            .repo
            .find_by_id(ctx, id)
            .map_err(UsecaseError::repository("product_repo.find_by_id"))?;

        if !product.is_mine(user_id) {
            warn!("delete rejected: not the owner");
            return Err(UsecaseError::ProductUnauthorized);
        }

        self.repo
            .delete(ctx, id)
            .map_err(UsecaseError::repository("product_repo.delete"))
    }
}
