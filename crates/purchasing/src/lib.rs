//! Purchasing use cases.
//!
//! Orchestrates the product and pricing domain against collaborator ports
//! (repositories, eligibility checks). No storage lives here; callers inject
//! implementations of the traits in [`ports`].

pub mod error;
pub mod ports;
pub mod product_usecase;
pub mod purchase_usecase;

pub use error::{ErrorKind, UsecaseError};
pub use ports::{ProductRepository, PurchaseRepository, RepositoryError};
pub use product_usecase::{CreateProductDto, ProductUsecase};
pub use purchase_usecase::{PurchaseDto, PurchaseUsecase};
