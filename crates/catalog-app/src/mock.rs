//! # Mock Client Helpers
//!
//! Test [`CatalogClient`] callers without spawning a [`CatalogActor`](crate::actor::CatalogActor).
//!
//! [`create_mock_client`] returns a real client plus the receiving end of its
//! channel. The `expect_*` helpers pull the next request off that receiver,
//! check its variant, and hand back the request's fields together with the
//! responder so the test decides what the "actor" answers.
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_client(10);
//! let handle = tokio::spawn(async move { client.find_product("P1").await });
//!
//! let (product_id, respond_to) = expect_find_product(&mut receiver).await.unwrap();
//! respond_to.send(Ok(None)).unwrap();
//!
//! assert_eq!(handle.await.unwrap(), Ok(None));
//! ```
//!
//! Each helper returns `None` when the channel closed or the next request
//! was a different variant.

use crate::client::CatalogClient;
use crate::message::{CatalogRequest, IdKind, Response};
use catalog_store::{Customer, Order, Product};
use tokio::sync::mpsc;

pub fn create_mock_client(buffer_size: usize) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

pub async fn expect_next_id(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(IdKind, Response<String>)> {
    match receiver.recv().await {
        Some(CatalogRequest::NextId { kind, respond_to }) => Some((kind, respond_to)),
        _ => None,
    }
}

pub async fn expect_find_product(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(String, Response<Option<Product>>)> {
    match receiver.recv().await {
        Some(CatalogRequest::FindProduct {
            product_id,
            respond_to,
        }) => Some((product_id, respond_to)),
        _ => None,
    }
}

pub async fn expect_find_customer(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(String, Response<Option<Customer>>)> {
    match receiver.recv().await {
        Some(CatalogRequest::FindCustomer {
            customer_id,
            respond_to,
        }) => Some((customer_id, respond_to)),
        _ => None,
    }
}

pub async fn expect_list_products(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<Response<Vec<Product>>> {
    match receiver.recv().await {
        Some(CatalogRequest::ListProducts { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_reserve_item(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(String, Response<Product>)> {
    match receiver.recv().await {
        Some(CatalogRequest::ReserveItem {
            product_id,
            respond_to,
        }) => Some((product_id, respond_to)),
        _ => None,
    }
}

pub async fn expect_place_order(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(String, Order, Response<()>)> {
    match receiver.recv().await {
        Some(CatalogRequest::PlaceOrder {
            customer_id,
            order,
            respond_to,
        }) => Some((customer_id, order, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_expect_helper_rejects_other_variant() {
        let (client, mut receiver) = create_mock_client(4);

        let handle = tokio::spawn(async move { client.next_id(IdKind::Order).await });

        // Next request is NextId, not FindProduct
        assert!(expect_find_product(&mut receiver).await.is_none());
        handle.await.unwrap().unwrap_err();
    }

    #[tokio::test]
    async fn test_expect_next_id_hands_back_kind() {
        let (client, mut receiver) = create_mock_client(4);

        let handle = tokio::spawn(async move { client.next_id(IdKind::Customer).await });

        let (kind, respond_to) = expect_next_id(&mut receiver).await.unwrap();
        assert_eq!(kind, IdKind::Customer);
        respond_to.send(Ok("231".to_string())).unwrap();

        assert_eq!(handle.await.unwrap(), Ok("231".to_string()));
    }
}
