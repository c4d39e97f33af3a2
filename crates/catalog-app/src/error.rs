//! Error types for the catalog service.

use catalog_store::CatalogError;
use thiserror::Error;

/// Errors returned by [`CatalogClient`](crate::client::CatalogClient) calls.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// The actor's request channel is closed.
    #[error("Catalog actor closed")]
    ActorClosed,

    /// The actor dropped the response channel without answering.
    #[error("Catalog actor dropped response channel")]
    ActorDropped,

    /// The actor task panicked or was aborted.
    #[error("Catalog actor task failed: {0}")]
    ActorFailed(String),

    /// The catalog rejected the operation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The product has no stock left to reserve.
    #[error("Insufficient stock: product {product_id} is out of stock")]
    InsufficientStock { product_id: String },
}
