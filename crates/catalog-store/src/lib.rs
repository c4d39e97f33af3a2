//! # Catalog Store
//!
//! In-memory record store for a small e-commerce catalog: products with their
//! reviews, customers with their order histories, and placed orders.
//!
//! All records live in [`SequentialList`]s owned by a single [`Catalog`]. The
//! catalog hands out borrowed views; callers that need to hold results across
//! a boundary clone them.
//!
//! ```
//! use catalog_store::{Catalog, Customer, Order, Product};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let mut catalog = Catalog::new();
//! catalog.register_customer(Customer::new("C1", "Ada", "ada@example.com"));
//! catalog.add_product(Product::new("P1", "Lamp", Decimal::new(2500, 2), 3));
//!
//! let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//! let mut order = Order::new(catalog.next_order_id(), "C1", date);
//! order.add_item(catalog.find_product_by_id("P1").unwrap());
//! catalog.place_order("C1", order).unwrap();
//!
//! assert_eq!(catalog.order_history("C1").unwrap().len(), 1);
//! ```

pub mod catalog;
pub mod error;
pub mod ids;
pub mod model;
pub mod seq_list;

pub use catalog::queries::HIGHLY_RATED_THRESHOLD;
pub use catalog::Catalog;
pub use error::CatalogError;
pub use ids::{IdSeeds, IdSequence};
pub use model::*;
pub use seq_list::SequentialList;
