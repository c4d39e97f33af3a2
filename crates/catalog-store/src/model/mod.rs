//! Plain record types held by the [`Catalog`](crate::Catalog).

pub mod customer;
pub mod order;
pub mod product;
pub mod review;

pub use customer::*;
pub use order::*;
pub use product::*;
pub use review::*;
