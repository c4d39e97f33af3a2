//! Read-only reporting over the [`Catalog`].
//!
//! Every query walks the master lists in insertion order and returns borrowed
//! records, so results always reflect the current state of the catalog.

use super::Catalog;
use crate::model::{Customer, Order, Product, Review};
use crate::seq_list::SequentialList;
use chrono::NaiveDate;

/// Averages must be strictly greater than this to count as highly rated.
pub const HIGHLY_RATED_THRESHOLD: f64 = 4.0;

/// Below any real average, including the `0.0` of an unreviewed product.
const EMPTY_SLOT: f64 = -1.0;

impl Catalog {
    pub fn find_product_by_id(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id() == product_id)
    }

    /// First product whose name equals `name` exactly (case-sensitive).
    pub fn find_product_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.name() == name)
    }

    pub fn find_customer_by_id(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id() == customer_id)
    }

    pub fn find_order_by_id(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id() == order_id)
    }

    /// Up to three products with the highest average rating, best first.
    ///
    /// A single pass keeps three ranked slots. A product only displaces a slot
    /// when its average is strictly greater, so on ties the product seen
    /// first keeps the better rank.
    pub fn top3_products(&self) -> SequentialList<&Product> {
        let mut ranked: [(Option<&Product>, f64); 3] = [(None, EMPTY_SLOT); 3];

        for product in self.products.iter() {
            let avg = product.average_rating();
            if let Some(rank) = ranked.iter().position(|&(_, best)| avg > best) {
                // Shift the lower slots down and drop the last one
                ranked[rank..].rotate_right(1);
                ranked[rank] = (Some(product), avg);
            }
        }

        ranked.into_iter().filter_map(|(product, _)| product).collect()
    }

    /// Orders placed strictly after `start` and strictly before `end`.
    ///
    /// Orders dated exactly on either bound are excluded.
    pub fn orders_between_dates(&self, start: NaiveDate, end: NaiveDate) -> SequentialList<&Order> {
        self.orders
            .iter()
            .filter(|order| order.order_date() > start && order.order_date() < end)
            .collect()
    }

    /// Every review written by `customer_id`, grouped by product in catalog
    /// order, then in each product's review order.
    pub fn extract_customer_reviews(&self, customer_id: &str) -> SequentialList<&Review> {
        self.products
            .iter()
            .flat_map(|product| product.reviews().iter())
            .filter(|review| review.customer_id() == customer_id)
            .collect()
    }

    /// Products rated above [`HIGHLY_RATED_THRESHOLD`] that both customers
    /// reviewed.
    pub fn common_reviewed_products(
        &self,
        first_customer: &str,
        second_customer: &str,
    ) -> SequentialList<&Product> {
        self.products
            .iter()
            .filter(|product| product.average_rating() > HIGHLY_RATED_THRESHOLD)
            .filter(|product| {
                product.has_review_from(first_customer) && product.has_review_from(second_customer)
            })
            .collect()
    }

    pub fn out_of_stock_products(&self) -> SequentialList<&Product> {
        self.products.iter().filter(|product| product.stock() == 0).collect()
    }

    /// The orders a customer placed, oldest first, as stored in the master
    /// order list.
    ///
    /// `None` when the customer is unknown. Orders are resolved by position,
    /// so another customer's order with the same ID is never returned.
    pub fn order_history(&self, customer_id: &str) -> Option<SequentialList<&Order>> {
        let customer = self.find_customer_by_id(customer_id)?;
        Some(
            customer
                .order_positions()
                .iter()
                .filter_map(|&position| self.orders.get(position))
                .collect(),
        )
    }
}
