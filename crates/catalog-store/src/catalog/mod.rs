//! # Catalog
//!
//! The [`Catalog`] owns the three master lists (products, customers, orders)
//! and the ID sequences. It is an explicitly constructed value: create one per
//! process (or per test) and pass it to whoever needs it.
//!
//! Mutations live in this module; the reporting queries are in [`queries`].
//!
//! ## Failure model
//!
//! - Lookups return `Option`: a miss is an expected outcome.
//! - Mutations that can do nothing return `Result<_, CatalogError>` naming
//!   the missing record.
//!
//! Nothing here logs, prints or panics.

pub mod queries;

use crate::error::CatalogError;
use crate::ids::{IdSeeds, IdSequence};
use crate::model::{Customer, Order, OrderStatus, Product, ProductUpdate, Rating, Review};
use crate::seq_list::SequentialList;

/// The aggregate record store.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: SequentialList<Product>,
    customers: SequentialList<Customer>,
    orders: SequentialList<Order>,
    product_ids: IdSequence,
    customer_ids: IdSequence,
    order_ids: IdSequence,
}

impl Catalog {
    /// Creates an empty catalog with the default ID seeds.
    pub fn new() -> Self {
        Self::with_seeds(IdSeeds::default())
    }

    pub fn with_seeds(seeds: IdSeeds) -> Self {
        Self {
            products: SequentialList::new(),
            customers: SequentialList::new(),
            orders: SequentialList::new(),
            product_ids: IdSequence::starting_at(seeds.product),
            customer_ids: IdSequence::starting_at(seeds.customer),
            order_ids: IdSequence::starting_at(seeds.order),
        }
    }

    // --- ID issuance ---

    pub fn next_product_id(&mut self) -> String {
        self.product_ids.next_id()
    }

    pub fn next_customer_id(&mut self) -> String {
        self.customer_ids.next_id()
    }

    pub fn next_order_id(&mut self) -> String {
        self.order_ids.next_id()
    }

    // --- Master lists ---

    pub fn products(&self) -> &SequentialList<Product> {
        &self.products
    }

    pub fn customers(&self) -> &SequentialList<Customer> {
        &self.customers
    }

    pub fn orders(&self) -> &SequentialList<Order> {
        &self.orders
    }

    // --- Products ---

    /// Appends `product` to the master list. IDs are not checked for uniqueness.
    pub fn add_product(&mut self, product: Product) {
        self.products.append(product);
    }

    /// Removes the first product with this ID and returns it.
    pub fn remove_product(&mut self, product_id: &str) -> Option<Product> {
        let index = self.products.position(|product| product.id() == product_id)?;
        self.products.remove_at(index).ok()
    }

    pub fn find_product_mut(&mut self, product_id: &str) -> Option<&mut Product> {
        self.products.find_mut(|product| product.id() == product_id)
    }

    /// Applies `update` to the product with this ID.
    ///
    /// # Errors
    /// [`CatalogError::ProductNotFound`] when no product matches.
    pub fn update_product(
        &mut self,
        product_id: &str,
        update: ProductUpdate,
    ) -> Result<&Product, CatalogError> {
        let product = self
            .find_product_mut(product_id)
            .ok_or_else(|| CatalogError::ProductNotFound(product_id.to_string()))?;
        product.apply(update);
        Ok(product)
    }

    // --- Reviews ---

    /// Attaches `review` to the product with this ID.
    ///
    /// # Errors
    /// [`CatalogError::ProductNotFound`] when the product does not resolve;
    /// the review is dropped.
    pub fn add_review(&mut self, product_id: &str, review: Review) -> Result<(), CatalogError> {
        let product = self
            .find_product_mut(product_id)
            .ok_or_else(|| CatalogError::ProductNotFound(product_id.to_string()))?;
        product.add_review(review);
        Ok(())
    }

    /// Overwrites the first review `customer_id` left on the product.
    ///
    /// # Errors
    /// - [`CatalogError::ProductNotFound`] when the product does not resolve.
    /// - [`CatalogError::ReviewNotFound`] when the customer never reviewed it.
    ///   No review is created.
    pub fn edit_review(
        &mut self,
        product_id: &str,
        customer_id: &str,
        comment: impl Into<String>,
        rating: Rating,
    ) -> Result<(), CatalogError> {
        let product = self
            .find_product_mut(product_id)
            .ok_or_else(|| CatalogError::ProductNotFound(product_id.to_string()))?;
        if product.edit_review(customer_id, comment, rating) {
            Ok(())
        } else {
            Err(CatalogError::ReviewNotFound {
                product_id: product_id.to_string(),
                customer_id: customer_id.to_string(),
            })
        }
    }

    // --- Customers ---

    pub fn register_customer(&mut self, customer: Customer) {
        self.customers.append(customer);
    }

    // --- Orders ---

    /// Records `order` in the customer's history and in the master order list.
    ///
    /// Both appends happen or neither does.
    ///
    /// # Errors
    /// [`CatalogError::CustomerNotFound`] when `customer_id` is not registered.
    pub fn place_order(&mut self, customer_id: &str, order: Order) -> Result<(), CatalogError> {
        let position = self.orders.len();
        let customer = self
            .customers
            .find_mut(|customer| customer.id() == customer_id)
            .ok_or_else(|| CatalogError::CustomerNotFound(customer_id.to_string()))?;
        customer.add_order_to_history(position);
        self.orders.append(order);
        Ok(())
    }

    /// # Errors
    /// [`CatalogError::OrderNotFound`] when no order matches.
    pub fn update_order_status(
        &mut self,
        order_id: &str,
        status: impl Into<OrderStatus>,
    ) -> Result<&Order, CatalogError> {
        let order = self
            .orders
            .find_mut(|order| order.id() == order_id)
            .ok_or_else(|| CatalogError::OrderNotFound(order_id.to_string()))?;
        order.update_status(status);
        Ok(order)
    }

    /// Marks the order as [`OrderStatus::Canceled`].
    ///
    /// # Errors
    /// [`CatalogError::OrderNotFound`] when no order matches.
    pub fn cancel_order(&mut self, order_id: &str) -> Result<&Order, CatalogError> {
        self.update_order_status(order_id, OrderStatus::Canceled)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_id_sequences_are_independent() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.next_product_id(), "151");
        assert_eq!(catalog.next_customer_id(), "231");
        assert_eq!(catalog.next_order_id(), "501");
        assert_eq!(catalog.next_order_id(), "502");
        assert_eq!(catalog.next_product_id(), "152");

        let mut seeded = Catalog::with_seeds(IdSeeds {
            product: 1,
            customer: 10,
            order: 100,
        });
        assert_eq!(seeded.next_customer_id(), "10");
    }

    #[test]
    fn test_place_order_appends_to_both_lists() {
        let mut catalog = Catalog::new();
        catalog.register_customer(Customer::new("C1", "Ada", "ada@example.com"));

        catalog.place_order("C1", Order::new("O1", "C1", date())).unwrap();

        assert_eq!(catalog.orders().len(), 1);
        let customer = catalog.find_customer_by_id("C1").unwrap();
        assert_eq!(customer.order_count(), 1);
        assert_eq!(catalog.order_history("C1").unwrap().get(0).unwrap().id(), "O1");
    }

    #[test]
    fn test_place_order_unknown_customer_changes_nothing() {
        let mut catalog = Catalog::new();
        catalog.register_customer(Customer::new("C1", "Ada", "ada@example.com"));

        let result = catalog.place_order("C404", Order::new("O1", "C404", date()));

        assert_eq!(result, Err(CatalogError::CustomerNotFound("C404".into())));
        assert_eq!(catalog.orders().len(), 0);
        assert_eq!(catalog.find_customer_by_id("C1").unwrap().order_count(), 0);
    }

    #[test]
    fn test_remove_product_removes_first_match_only() {
        let mut catalog = Catalog::new();
        catalog.add_product(Product::new("P1", "First", Decimal::ONE, 1));
        catalog.add_product(Product::new("P2", "Other", Decimal::ONE, 1));
        catalog.add_product(Product::new("P1", "Duplicate", Decimal::ONE, 1));

        let removed = catalog.remove_product("P1").unwrap();

        assert_eq!(removed.name(), "First");
        assert_eq!(catalog.products().len(), 2);
        assert_eq!(catalog.find_product_by_id("P1").unwrap().name(), "Duplicate");
        assert!(catalog.remove_product("P9").is_none());
    }

    #[test]
    fn test_cancel_order_is_visible_through_history() {
        let mut catalog = Catalog::new();
        catalog.register_customer(Customer::new("C1", "Ada", "ada@example.com"));
        catalog.place_order("C1", Order::new("O1", "C1", date())).unwrap();

        catalog.cancel_order("O1").unwrap();

        let history = catalog.order_history("C1").unwrap();
        assert_eq!(history.get(0).unwrap().status(), &OrderStatus::Canceled);
        assert_eq!(
            catalog.cancel_order("O2").unwrap_err(),
            CatalogError::OrderNotFound("O2".into())
        );
    }

    #[test]
    fn test_add_review_to_unknown_product_is_rejected() {
        let mut catalog = Catalog::new();
        let review = Review::new("C1", Rating::new(4).unwrap(), "nice");

        assert_eq!(
            catalog.add_review("P1", review),
            Err(CatalogError::ProductNotFound("P1".into()))
        );
    }

    #[test]
    fn test_update_product_applies_fields() {
        let mut catalog = Catalog::new();
        catalog.add_product(Product::new("P1", "Lamp", Decimal::ONE, 1));

        let updated = catalog
            .update_product(
                "P1",
                ProductUpdate {
                    name: Some("Desk Lamp".into()),
                    price: Some(Decimal::TEN),
                    stock: None,
                },
            )
            .unwrap();

        assert_eq!(updated.name(), "Desk Lamp");
        assert_eq!(updated.price(), Decimal::TEN);
        assert_eq!(updated.stock(), 1);
        assert!(catalog.update_product("P2", ProductUpdate::default()).is_err());
    }
}
