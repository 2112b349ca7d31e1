//! Use-case error set exposed to boundary layers.

use thiserror::Error;

use storefront_core::DomainError;

use crate::ports::RepositoryError;

/// Coarse classification a boundary layer maps to its own status codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    BadRequest,
    PreconditionFailed,
    /// A collaborator failed; its own error says why.
    Collaborator,
}

/// Terminal failure of one use-case call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsecaseError {
    /// The product is absent, or not (yet) published. Both causes share this
    /// variant so unpublished products stay invisible.
    #[error("product not found")]
    ProductNotFound,

    #[error("product unauthorized")]
    ProductUnauthorized,

    #[error("product name bad format")]
    ProductNameBadFormat,

    /// Pricing rejected the fetched discounts.
    #[error("discount invalid: {0}")]
    DiscountInvalid(#[source] DomainError),

    /// A collaborator call failed. `op` names the call site.
    #[error("{op}: {source}")]
    Repository {
        op: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl UsecaseError {
    /// Wraps a collaborator failure with the name of the failing call.
    pub fn repository(op: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |source| Self::Repository { op, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            UsecaseError::ProductNotFound => ErrorKind::NotFound,
            UsecaseError::ProductUnauthorized => ErrorKind::Unauthorized,
            UsecaseError::ProductNameBadFormat => ErrorKind::BadRequest,
            UsecaseError::DiscountInvalid(_) => ErrorKind::PreconditionFailed,
            UsecaseError::Repository { .. } => ErrorKind::Collaborator,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            UsecaseError::ProductNotFound => "product_not_found",
            UsecaseError::ProductUnauthorized => "product_unauthorized",
            UsecaseError::ProductNameBadFormat => "product_name_bad_format",
            UsecaseError::DiscountInvalid(_) => "discount_invalid",
            UsecaseError::Repository { .. } => "repository_failure",
        }
    }

    /// User-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            UsecaseError::ProductNotFound => "Product does not exist or may have been deleted.",
            UsecaseError::ProductUnauthorized => "You do not have access to this product.",
            UsecaseError::ProductNameBadFormat => {
                "Product name can only contain alphanumeric characters and spaces."
            }
            UsecaseError::DiscountInvalid(_) => "The discounts for this product cannot be applied.",
            UsecaseError::Repository { .. } => "The request could not be completed.",
        }
    }

    /// The collaborator failure, if this error wraps one.
    pub fn repository_error(&self) -> Option<&RepositoryError> {
        match self {
            UsecaseError::Repository { source, .. } => Some(source),
            _ => None,
        }
    }
}
