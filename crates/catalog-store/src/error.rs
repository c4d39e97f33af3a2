//! Error types for the catalog store.

use thiserror::Error;

/// Errors reported by catalog mutations and the sequential list.
///
/// Lookups (`find_*`) report a miss as `None`; these variants are used when an
/// operation has to say why it did nothing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// No product with this ID is in the master product list.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No customer with this ID is registered.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// No order with this ID has been placed.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The product has no review written by this customer.
    #[error("No review from customer {customer_id} on product {product_id}")]
    ReviewNotFound {
        product_id: String,
        customer_id: String,
    },

    /// Index outside `0..len` of a sequential list.
    #[error("Index out of range: {index} (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Rating outside `1..=5`.
    #[error("Invalid rating: {0} (expected 1-5)")]
    InvalidRating(u8),
}
