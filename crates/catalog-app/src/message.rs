//! # Message Protocol
//!
//! Requests sent from [`CatalogClient`](crate::client::CatalogClient) to the
//! [`CatalogActor`](crate::actor::CatalogActor). Every variant carries a
//! `oneshot` responder; query results travel back as owned clones so nothing
//! borrowed from the catalog leaves the actor task.

use crate::error::ServiceError;
use catalog_store::{Customer, Order, OrderStatus, Product, ProductUpdate, Rating, Review};
use chrono::NaiveDate;
use tokio::sync::oneshot;

/// One-shot reply channel for a request.
pub type Response<T> = oneshot::Sender<Result<T, ServiceError>>;

/// Which ID sequence to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Product,
    Customer,
    Order,
}

#[derive(Debug)]
pub enum CatalogRequest {
    NextId {
        kind: IdKind,
        respond_to: Response<String>,
    },

    // Mutations
    AddProduct {
        product: Product,
        respond_to: Response<()>,
    },
    RemoveProduct {
        product_id: String,
        respond_to: Response<Option<Product>>,
    },
    UpdateProduct {
        product_id: String,
        update: ProductUpdate,
        respond_to: Response<Product>,
    },
    RegisterCustomer {
        customer: Customer,
        respond_to: Response<()>,
    },
    /// Takes one unit of stock; replies with the product as it was priced.
    ReserveItem {
        product_id: String,
        respond_to: Response<Product>,
    },
    PlaceOrder {
        customer_id: String,
        order: Order,
        respond_to: Response<()>,
    },
    AddReview {
        product_id: String,
        review: Review,
        respond_to: Response<()>,
    },
    EditReview {
        product_id: String,
        customer_id: String,
        comment: String,
        rating: Rating,
        respond_to: Response<()>,
    },
    UpdateOrderStatus {
        order_id: String,
        status: OrderStatus,
        respond_to: Response<Order>,
    },
    CancelOrder {
        order_id: String,
        respond_to: Response<Order>,
    },

    // Lookups
    FindProduct {
        product_id: String,
        respond_to: Response<Option<Product>>,
    },
    FindProductByName {
        name: String,
        respond_to: Response<Option<Product>>,
    },
    FindCustomer {
        customer_id: String,
        respond_to: Response<Option<Customer>>,
    },
    FindOrder {
        order_id: String,
        respond_to: Response<Option<Order>>,
    },

    // Reports
    ListProducts {
        respond_to: Response<Vec<Product>>,
    },
    ListCustomers {
        respond_to: Response<Vec<Customer>>,
    },
    ListOrders {
        respond_to: Response<Vec<Order>>,
    },
    OutOfStock {
        respond_to: Response<Vec<Product>>,
    },
    TopRated {
        respond_to: Response<Vec<Product>>,
    },
    OrdersBetween {
        start: NaiveDate,
        end: NaiveDate,
        respond_to: Response<Vec<Order>>,
    },
    CustomerReviews {
        customer_id: String,
        respond_to: Response<Vec<Review>>,
    },
    CommonReviewed {
        first_customer: String,
        second_customer: String,
        respond_to: Response<Vec<Product>>,
    },
    OrderHistory {
        customer_id: String,
        respond_to: Response<Option<Vec<Order>>>,
    },
}
