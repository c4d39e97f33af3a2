//! # Catalog Actor
//!
//! The [`CatalogActor`] is the server half of the catalog service. It owns the
//! [`Catalog`] and the receiving end of the request channel, and processes
//! requests one at a time.
//!
//! **Concurrency Model**:
//! The run loop is the only code that touches the catalog, so ID issuance,
//! list relinking and the dual append of an order placement are serialized
//! without a `Mutex`. Any number of cloned clients may send concurrently.
//!
//! # Usage Pattern
//!
//! ```rust,ignore
//! let (actor, client) = CatalogActor::new(catalog, 32);
//! let handle = tokio::spawn(actor.run());
//! // ... use client ...
//! drop(client);
//! let catalog = handle.await?;
//! ```

use crate::client::CatalogClient;
use crate::error::ServiceError;
use crate::message::{CatalogRequest, IdKind};
use catalog_store::{Catalog, CatalogError, Order, SequentialList};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct CatalogActor {
    receiver: mpsc::Receiver<CatalogRequest>,
    catalog: Catalog,
}

impl CatalogActor {
    /// Creates the actor around `catalog` and a client connected to it.
    ///
    /// `buffer_size` bounds the number of requests waiting in the channel.
    pub fn new(catalog: Catalog, buffer_size: usize) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, catalog };
        (actor, CatalogClient::new(sender))
    }

    /// Processes requests until every client has been dropped, then returns
    /// the catalog.
    pub async fn run(mut self) -> Catalog {
        info!(
            products = self.catalog.products().len(),
            customers = self.catalog.customers().len(),
            orders = self.catalog.orders().len(),
            "Catalog actor started"
        );

        while let Some(request) = self.receiver.recv().await {
            self.handle(request);
        }

        info!(
            products = self.catalog.products().len(),
            customers = self.catalog.customers().len(),
            orders = self.catalog.orders().len(),
            "Shutdown"
        );
        self.catalog
    }

    fn handle(&mut self, request: CatalogRequest) {
        let catalog = &mut self.catalog;

        match request {
            CatalogRequest::NextId { kind, respond_to } => {
                let id = match kind {
                    IdKind::Product => catalog.next_product_id(),
                    IdKind::Customer => catalog.next_customer_id(),
                    IdKind::Order => catalog.next_order_id(),
                };
                debug!(?kind, %id, "NextId");
                let _ = respond_to.send(Ok(id));
            }

            CatalogRequest::AddProduct {
                product,
                respond_to,
            } => {
                debug!(?product, "AddProduct");
                let id = product.id().to_string();
                catalog.add_product(product);
                info!(%id, size = catalog.products().len(), "Product added");
                let _ = respond_to.send(Ok(()));
            }
            CatalogRequest::RemoveProduct {
                product_id,
                respond_to,
            } => {
                debug!(%product_id, "RemoveProduct");
                let removed = catalog.remove_product(&product_id);
                match &removed {
                    Some(_) => info!(%product_id, size = catalog.products().len(), "Product removed"),
                    None => warn!(%product_id, "Not found"),
                }
                let _ = respond_to.send(Ok(removed));
            }
            CatalogRequest::UpdateProduct {
                product_id,
                update,
                respond_to,
            } => {
                debug!(%product_id, ?update, "UpdateProduct");
                let result = catalog
                    .update_product(&product_id, update)
                    .cloned()
                    .map_err(ServiceError::from);
                match &result {
                    Ok(_) => info!(%product_id, "Product updated"),
                    Err(e) => warn!(%product_id, error = %e, "Update failed"),
                }
                let _ = respond_to.send(result);
            }
            CatalogRequest::RegisterCustomer {
                customer,
                respond_to,
            } => {
                debug!(?customer, "RegisterCustomer");
                let id = customer.id().to_string();
                catalog.register_customer(customer);
                info!(%id, size = catalog.customers().len(), "Customer registered");
                let _ = respond_to.send(Ok(()));
            }
            CatalogRequest::ReserveItem {
                product_id,
                respond_to,
            } => {
                debug!(%product_id, "ReserveItem");
                let result = match catalog.find_product_mut(&product_id) {
                    None => Err(ServiceError::from(CatalogError::ProductNotFound(
                        product_id.clone(),
                    ))),
                    Some(product) if product.stock() == 0 => Err(ServiceError::InsufficientStock {
                        product_id: product_id.clone(),
                    }),
                    Some(product) => {
                        let reserved = product.clone();
                        product.set_stock(product.stock() - 1);
                        info!(%product_id, stock = product.stock(), "Stock reserved");
                        Ok(reserved)
                    }
                };
                if let Err(e) = &result {
                    warn!(%product_id, error = %e, "Reservation rejected");
                }
                let _ = respond_to.send(result);
            }
            CatalogRequest::PlaceOrder {
                customer_id,
                order,
                respond_to,
            } => {
                debug!(%customer_id, order_id = order.id(), "PlaceOrder");
                let order_id = order.id().to_string();
                let total = order.total_price();
                let result = catalog
                    .place_order(&customer_id, order)
                    .map_err(ServiceError::from);
                match &result {
                    Ok(()) => info!(%customer_id, %order_id, %total, "Order placed"),
                    Err(e) => warn!(%customer_id, %order_id, error = %e, "Order rejected"),
                }
                let _ = respond_to.send(result);
            }
            CatalogRequest::AddReview {
                product_id,
                review,
                respond_to,
            } => {
                debug!(%product_id, ?review, "AddReview");
                let customer_id = review.customer_id().to_string();
                let result = catalog
                    .add_review(&product_id, review)
                    .map_err(ServiceError::from);
                match &result {
                    Ok(()) => info!(%product_id, %customer_id, "Review added"),
                    Err(e) => warn!(%product_id, error = %e, "Review rejected"),
                }
                let _ = respond_to.send(result);
            }
            CatalogRequest::EditReview {
                product_id,
                customer_id,
                comment,
                rating,
                respond_to,
            } => {
                debug!(%product_id, %customer_id, %rating, "EditReview");
                let result = catalog
                    .edit_review(&product_id, &customer_id, comment, rating)
                    .map_err(ServiceError::from);
                match &result {
                    Ok(()) => info!(%product_id, %customer_id, "Review edited"),
                    Err(e) => warn!(%product_id, %customer_id, error = %e, "Edit failed"),
                }
                let _ = respond_to.send(result);
            }
            CatalogRequest::UpdateOrderStatus {
                order_id,
                status,
                respond_to,
            } => {
                debug!(%order_id, %status, "UpdateOrderStatus");
                let result = catalog
                    .update_order_status(&order_id, status)
                    .cloned()
                    .map_err(ServiceError::from);
                log_order_change(&order_id, &result);
                let _ = respond_to.send(result);
            }
            CatalogRequest::CancelOrder {
                order_id,
                respond_to,
            } => {
                debug!(%order_id, "CancelOrder");
                let result = catalog
                    .cancel_order(&order_id)
                    .cloned()
                    .map_err(ServiceError::from);
                log_order_change(&order_id, &result);
                let _ = respond_to.send(result);
            }

            CatalogRequest::FindProduct {
                product_id,
                respond_to,
            } => {
                let product = catalog.find_product_by_id(&product_id).cloned();
                debug!(%product_id, found = product.is_some(), "FindProduct");
                let _ = respond_to.send(Ok(product));
            }
            CatalogRequest::FindProductByName { name, respond_to } => {
                let product = catalog.find_product_by_name(&name).cloned();
                debug!(%name, found = product.is_some(), "FindProductByName");
                let _ = respond_to.send(Ok(product));
            }
            CatalogRequest::FindCustomer {
                customer_id,
                respond_to,
            } => {
                let customer = catalog.find_customer_by_id(&customer_id).cloned();
                debug!(%customer_id, found = customer.is_some(), "FindCustomer");
                let _ = respond_to.send(Ok(customer));
            }
            CatalogRequest::FindOrder {
                order_id,
                respond_to,
            } => {
                let order = catalog.find_order_by_id(&order_id).cloned();
                debug!(%order_id, found = order.is_some(), "FindOrder");
                let _ = respond_to.send(Ok(order));
            }

            CatalogRequest::ListProducts { respond_to } => {
                debug!("ListProducts");
                let _ = respond_to.send(Ok(catalog.products().iter().cloned().collect()));
            }
            CatalogRequest::ListCustomers { respond_to } => {
                debug!("ListCustomers");
                let _ = respond_to.send(Ok(catalog.customers().iter().cloned().collect()));
            }
            CatalogRequest::ListOrders { respond_to } => {
                debug!("ListOrders");
                let _ = respond_to.send(Ok(catalog.orders().iter().cloned().collect()));
            }
            CatalogRequest::OutOfStock { respond_to } => {
                let products = owned(catalog.out_of_stock_products());
                debug!(count = products.len(), "OutOfStock");
                let _ = respond_to.send(Ok(products));
            }
            CatalogRequest::TopRated { respond_to } => {
                let products = owned(catalog.top3_products());
                debug!(count = products.len(), "TopRated");
                let _ = respond_to.send(Ok(products));
            }
            CatalogRequest::OrdersBetween {
                start,
                end,
                respond_to,
            } => {
                let orders = owned(catalog.orders_between_dates(start, end));
                debug!(%start, %end, count = orders.len(), "OrdersBetween");
                let _ = respond_to.send(Ok(orders));
            }
            CatalogRequest::CustomerReviews {
                customer_id,
                respond_to,
            } => {
                let reviews = owned(catalog.extract_customer_reviews(&customer_id));
                debug!(%customer_id, count = reviews.len(), "CustomerReviews");
                let _ = respond_to.send(Ok(reviews));
            }
            CatalogRequest::CommonReviewed {
                first_customer,
                second_customer,
                respond_to,
            } => {
                let products =
                    owned(catalog.common_reviewed_products(&first_customer, &second_customer));
                debug!(%first_customer, %second_customer, count = products.len(), "CommonReviewed");
                let _ = respond_to.send(Ok(products));
            }
            CatalogRequest::OrderHistory {
                customer_id,
                respond_to,
            } => {
                let history = catalog.order_history(&customer_id).map(owned);
                match &history {
                    Some(orders) => debug!(%customer_id, count = orders.len(), "OrderHistory"),
                    None => warn!(%customer_id, "Not found"),
                }
                let _ = respond_to.send(Ok(history));
            }
        }
    }
}

/// Clones a borrowed query result so it can leave the actor.
fn owned<T: Clone>(items: SequentialList<&T>) -> Vec<T> {
    items.iter().copied().cloned().collect()
}

fn log_order_change(order_id: &str, result: &Result<Order, ServiceError>) {
    match result {
        Ok(order) => info!(%order_id, status = %order.status(), "Order status changed"),
        Err(e) => warn!(%order_id, error = %e, "Status change failed"),
    }
}
