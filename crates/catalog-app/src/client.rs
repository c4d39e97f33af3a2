//! # Catalog Client
//!
//! The [`CatalogClient`] is the handle callers use to talk to the
//! [`CatalogActor`](crate::actor::CatalogActor). It is cheap to clone; every
//! clone feeds the same request channel.
//!
//! Each method sends one [`CatalogRequest`] and awaits its reply. Channel
//! failures map to [`ServiceError::ActorClosed`] (the actor is gone before the
//! request was delivered) and [`ServiceError::ActorDropped`] (the actor never
//! answered).

use crate::error::ServiceError;
use crate::message::{CatalogRequest, IdKind, Response};
use catalog_store::{Customer, Order, OrderStatus, Product, ProductUpdate, Rating, Review};
use chrono::NaiveDate;
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    async fn call<T>(
        &self,
        request: impl FnOnce(Response<T>) -> CatalogRequest,
    ) -> Result<T, ServiceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| ServiceError::ActorClosed)?;
        response.await.map_err(|_| ServiceError::ActorDropped)?
    }

    // --- IDs ---

    pub async fn next_id(&self, kind: IdKind) -> Result<String, ServiceError> {
        self.call(|respond_to| CatalogRequest::NextId { kind, respond_to })
            .await
    }

    // --- Mutations ---

    #[instrument(skip_all, fields(product_id = product.id()))]
    pub async fn add_product(&self, product: Product) -> Result<(), ServiceError> {
        self.call(|respond_to| CatalogRequest::AddProduct {
            product,
            respond_to,
        })
        .await
    }

    /// Returns the removed product, `None` when the ID is unknown.
    pub async fn remove_product(
        &self,
        product_id: impl Into<String>,
    ) -> Result<Option<Product>, ServiceError> {
        let product_id = product_id.into();
        self.call(|respond_to| CatalogRequest::RemoveProduct {
            product_id,
            respond_to,
        })
        .await
    }

    pub async fn update_product(
        &self,
        product_id: impl Into<String>,
        update: ProductUpdate,
    ) -> Result<Product, ServiceError> {
        let product_id = product_id.into();
        self.call(|respond_to| CatalogRequest::UpdateProduct {
            product_id,
            update,
            respond_to,
        })
        .await
    }

    #[instrument(skip_all, fields(customer_id = customer.id()))]
    pub async fn register_customer(&self, customer: Customer) -> Result<(), ServiceError> {
        self.call(|respond_to| CatalogRequest::RegisterCustomer {
            customer,
            respond_to,
        })
        .await
    }

    /// Takes one unit of stock from the product.
    ///
    /// Returns the product as it was before the decrement, ready for
    /// [`Order::add_item`].
    ///
    /// # Errors
    /// - [`ServiceError::InsufficientStock`] when the stock is already zero.
    /// - [`ServiceError::Catalog`] when the product is unknown.
    pub async fn reserve_item(&self, product_id: impl Into<String>) -> Result<Product, ServiceError> {
        let product_id = product_id.into();
        self.call(|respond_to| CatalogRequest::ReserveItem {
            product_id,
            respond_to,
        })
        .await
    }

    #[instrument(skip_all, fields(order_id = order.id()))]
    pub async fn place_order(
        &self,
        customer_id: impl Into<String>,
        order: Order,
    ) -> Result<(), ServiceError> {
        let customer_id = customer_id.into();
        self.call(|respond_to| CatalogRequest::PlaceOrder {
            customer_id,
            order,
            respond_to,
        })
        .await
    }

    pub async fn add_review(
        &self,
        product_id: impl Into<String>,
        review: Review,
    ) -> Result<(), ServiceError> {
        let product_id = product_id.into();
        self.call(|respond_to| CatalogRequest::AddReview {
            product_id,
            review,
            respond_to,
        })
        .await
    }

    pub async fn edit_review(
        &self,
        product_id: impl Into<String>,
        customer_id: impl Into<String>,
        comment: impl Into<String>,
        rating: Rating,
    ) -> Result<(), ServiceError> {
        let (product_id, customer_id, comment) =
            (product_id.into(), customer_id.into(), comment.into());
        self.call(|respond_to| CatalogRequest::EditReview {
            product_id,
            customer_id,
            comment,
            rating,
            respond_to,
        })
        .await
    }

    pub async fn update_order_status(
        &self,
        order_id: impl Into<String>,
        status: OrderStatus,
    ) -> Result<Order, ServiceError> {
        let order_id = order_id.into();
        self.call(|respond_to| CatalogRequest::UpdateOrderStatus {
            order_id,
            status,
            respond_to,
        })
        .await
    }

    pub async fn cancel_order(&self, order_id: impl Into<String>) -> Result<Order, ServiceError> {
        let order_id = order_id.into();
        self.call(|respond_to| CatalogRequest::CancelOrder {
            order_id,
            respond_to,
        })
        .await
    }

    // --- Lookups ---

    pub async fn find_product(
        &self,
        product_id: impl Into<String>,
    ) -> Result<Option<Product>, ServiceError> {
        let product_id = product_id.into();
        self.call(|respond_to| CatalogRequest::FindProduct {
            product_id,
            respond_to,
        })
        .await
    }

    pub async fn find_product_by_name(
        &self,
        name: impl Into<String>,
    ) -> Result<Option<Product>, ServiceError> {
        let name = name.into();
        self.call(|respond_to| CatalogRequest::FindProductByName { name, respond_to })
            .await
    }

    pub async fn find_customer(
        &self,
        customer_id: impl Into<String>,
    ) -> Result<Option<Customer>, ServiceError> {
        let customer_id = customer_id.into();
        self.call(|respond_to| CatalogRequest::FindCustomer {
            customer_id,
            respond_to,
        })
        .await
    }

    pub async fn find_order(
        &self,
        order_id: impl Into<String>,
    ) -> Result<Option<Order>, ServiceError> {
        let order_id = order_id.into();
        self.call(|respond_to| CatalogRequest::FindOrder {
            order_id,
            respond_to,
        })
        .await
    }

    // --- Reports ---

    pub async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.call(|respond_to| CatalogRequest::ListProducts { respond_to })
            .await
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        self.call(|respond_to| CatalogRequest::ListCustomers { respond_to })
            .await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, ServiceError> {
        self.call(|respond_to| CatalogRequest::ListOrders { respond_to })
            .await
    }

    pub async fn out_of_stock(&self) -> Result<Vec<Product>, ServiceError> {
        self.call(|respond_to| CatalogRequest::OutOfStock { respond_to })
            .await
    }

    /// Up to three best-rated products, best first.
    pub async fn top_rated(&self) -> Result<Vec<Product>, ServiceError> {
        self.call(|respond_to| CatalogRequest::TopRated { respond_to })
            .await
    }

    /// Orders dated strictly between `start` and `end`.
    pub async fn orders_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Order>, ServiceError> {
        self.call(|respond_to| CatalogRequest::OrdersBetween {
            start,
            end,
            respond_to,
        })
        .await
    }

    pub async fn customer_reviews(
        &self,
        customer_id: impl Into<String>,
    ) -> Result<Vec<Review>, ServiceError> {
        let customer_id = customer_id.into();
        self.call(|respond_to| CatalogRequest::CustomerReviews {
            customer_id,
            respond_to,
        })
        .await
    }

    pub async fn common_reviewed(
        &self,
        first_customer: impl Into<String>,
        second_customer: impl Into<String>,
    ) -> Result<Vec<Product>, ServiceError> {
        let (first_customer, second_customer) = (first_customer.into(), second_customer.into());
        self.call(|respond_to| CatalogRequest::CommonReviewed {
            first_customer,
            second_customer,
            respond_to,
        })
        .await
    }

    /// The customer's orders in placement order, `None` for an unknown customer.
    pub async fn order_history(
        &self,
        customer_id: impl Into<String>,
    ) -> Result<Option<Vec<Order>>, ServiceError> {
        let customer_id = customer_id.into();
        self.call(|respond_to| CatalogRequest::OrderHistory {
            customer_id,
            respond_to,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{
        create_mock_client, expect_find_product, expect_place_order, expect_reserve_item,
    };
    use catalog_store::CatalogError;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_find_product_forwards_id() {
        let (client, mut receiver) = create_mock_client(10);

        let handle = tokio::spawn(async move { client.find_product("P1").await });

        let (product_id, respond_to) = expect_find_product(&mut receiver)
            .await
            .expect("Expected FindProduct request");
        assert_eq!(product_id, "P1");
        respond_to
            .send(Ok(Some(Product::new("P1", "Lamp", Decimal::ONE, 2))))
            .unwrap();

        let product = handle.await.unwrap().unwrap().unwrap();
        assert_eq!(product.name(), "Lamp");
    }

    #[tokio::test]
    async fn test_reserve_item_surfaces_insufficient_stock() {
        let (client, mut receiver) = create_mock_client(10);

        let handle = tokio::spawn(async move { client.reserve_item("P2").await });

        let (product_id, respond_to) = expect_reserve_item(&mut receiver).await.unwrap();
        respond_to
            .send(Err(ServiceError::InsufficientStock {
                product_id: product_id.clone(),
            }))
            .unwrap();

        let result = handle.await.unwrap();
        assert_eq!(
            result,
            Err(ServiceError::InsufficientStock {
                product_id: "P2".into()
            })
        );
    }

    #[tokio::test]
    async fn test_place_order_maps_catalog_error() {
        let (client, mut receiver) = create_mock_client(10);
        let order = Order::new("501", "C9", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

        let handle = tokio::spawn(async move { client.place_order("C9", order).await });

        let (customer_id, order, respond_to) = expect_place_order(&mut receiver).await.unwrap();
        assert_eq!(customer_id, "C9");
        assert_eq!(order.id(), "501");
        respond_to
            .send(Err(CatalogError::CustomerNotFound(customer_id).into()))
            .unwrap();

        let err = handle.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Customer not found: C9");
    }

    #[tokio::test]
    async fn test_closed_actor_reports_actor_closed() {
        let (client, receiver) = create_mock_client(1);
        drop(receiver);

        assert_eq!(client.list_products().await, Err(ServiceError::ActorClosed));
    }

    #[tokio::test]
    async fn test_dropped_responder_reports_actor_dropped() {
        let (client, mut receiver) = create_mock_client(1);

        let handle = tokio::spawn(async move { client.top_rated().await });
        let request = receiver.recv().await.unwrap();
        drop(request);

        assert_eq!(handle.await.unwrap(), Err(ServiceError::ActorDropped));
    }
}
