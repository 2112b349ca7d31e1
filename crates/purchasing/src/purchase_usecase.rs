//! Purchase orchestration.
//!
//! ```text
//! PurchaseDto
//!   ↓
//! 1. Check user eligibility        (collaborator error → Repository)
//!   ↓
//! 2. Fetch product                 (collaborator error → Repository)
//!   ↓
//! 3. Require publication           (unpublished → ProductNotFound)
//!   ↓
//! 4. Fetch product discounts       (collaborator error → Repository)
//!   ↓
//! 5. Price the purchase            (domain error → DiscountInvalid)
//!   ↓
//! 6. Persist the purchase          (collaborator error → Repository)
//! ```
//!
//! Each step runs once, in order, and the first failure ends the call. Nothing
//! before step 6 mutates external state, so no step is ever compensated.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use storefront_core::{Clock, ProductId, RequestContext, SystemClock, UserId};
use storefront_products::{Purchase, PurchasePricingService};

use crate::error::UsecaseError;
use crate::ports::PurchaseRepository;

/// Input: one purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseDto {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub unit: i64,
}

/// Purchase use case.
///
/// Holds no per-request state; every call re-reads from the repository.
#[derive(Debug)]
pub struct PurchaseUsecase<R, C = SystemClock> {
    repo: R,
    clock: C,
    pricing: PurchasePricingService,
}

impl<R> PurchaseUsecase<R, SystemClock> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R, C> PurchaseUsecase<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            pricing: PurchasePricingService::new(),
        }
    }
}

impl<R, C> PurchaseUsecase<R, C>
where
    R: PurchaseRepository,
    C: Clock,
{
    /// Runs one purchase attempt and returns the persisted record.
    #[instrument(
        skip_all,
        fields(
            request_id = %ctx.request_id(),
            product_id = %dto.product_id,
            user_id = %dto.user_id,
            unit = dto.unit,
        )
    )]
    pub fn purchase(&self, ctx: &RequestContext, dto: PurchaseDto) -> Result<Purchase, UsecaseError> {
        self.repo
            .check_user_eligibility(ctx, dto.user_id)
            .map_err(UsecaseError::repository("purchase_repo.check_user_eligibility"))?;
        debug!("user eligible");

        let product = self
            .repo
            .find_product(ctx, dto.product_id)
            .map_err(UsecaseError::repository("purchase_repo.find_product"))?;

        if !product.is_published_at(self.clock.now()) {
            warn!("purchase rejected: product not published");
            return Err(UsecaseError::ProductNotFound);
        }

        let discounts = self
            .repo
            .find_product_discounts(ctx, dto.product_id)
            .map_err(UsecaseError::repository("purchase_repo.find_product_discounts"))?;
        debug!(discounts = discounts.len(), "discounts loaded");

        let purchase = self
            .pricing
            .prepare_purchase(dto.unit, &product, &discounts)
            .map_err(|e| {
                warn!(error = %e, "purchase rejected: discount invalid");
                UsecaseError::DiscountInvalid(e)
            })?;

        self.repo
            .create_purchase(ctx, &purchase)
            .map_err(UsecaseError::repository("purchase_repo.create_purchase"))?;

        info!(
            base_price = purchase.base_price,
            discount = purchase.discount,
            "purchase recorded"
        );
        Ok(purchase)
    }
}
