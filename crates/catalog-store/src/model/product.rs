use crate::model::{Rating, Review};
use crate::seq_list::SequentialList;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a product in the catalog.
///
/// A product owns its reviews; they are kept in insertion order and are only
/// ever mutated in place through [`Product::edit_review`].
///
/// See [`Catalog`](crate::Catalog) for the queries that rank and filter
/// products:
/// - [`top3_products`](crate::Catalog::top3_products) (by [`Product::average_rating`])
/// - [`out_of_stock_products`](crate::Catalog::out_of_stock_products)
/// - [`common_reviewed_products`](crate::Catalog::common_reviewed_products)
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: String,
    name: String,
    price: Decimal,
    stock: u32,
    reviews: SequentialList<Review>,
}

impl Product {
    /// Creates a new Product with no reviews.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (from the bulk data or [`Catalog::next_product_id`](crate::Catalog::next_product_id))
    /// * `name` - Product name
    /// * `price` - Unit price
    /// * `stock` - Available stock quantity
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock,
            reviews: SequentialList::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn reviews(&self) -> &SequentialList<Review> {
        &self.reviews
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_price(&mut self, price: Decimal) {
        self.price = price;
    }

    /// Stock is written as given; callers keep it from going below zero.
    pub fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }

    /// Applies every field present in `update`.
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
    }

    pub fn add_review(&mut self, review: Review) {
        self.reviews.append(review);
    }

    /// Mean of all review scores, `0.0` when there are no reviews.
    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = self
            .reviews
            .iter()
            .map(|review| u32::from(review.rating().value()))
            .sum();
        f64::from(sum) / self.reviews.len() as f64
    }

    /// Overwrites the first review written by `customer_id`.
    ///
    /// Returns `false` (and creates nothing) when the customer has not
    /// reviewed this product.
    pub fn edit_review(&mut self, customer_id: &str, comment: impl Into<String>, rating: Rating) -> bool {
        match self.reviews.find_mut(|review| review.customer_id() == customer_id) {
            Some(review) => {
                review.set_comment(comment);
                review.set_rating(rating);
                true
            }
            None => false,
        }
    }

    /// Whether at least one review was written by `customer_id`.
    pub fn has_review_from(&self, customer_id: &str) -> bool {
        self.reviews.iter().any(|review| review.customer_id() == customer_id)
    }
}

// DTOs for Product updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(value: u8) -> Rating {
        Rating::new(value).unwrap()
    }

    fn product_with_scores(scores: &[u8]) -> Product {
        let mut product = Product::new("P1", "Lamp", Decimal::new(1999, 2), 3);
        for (i, &score) in scores.iter().enumerate() {
            product.add_review(Review::new(format!("C{}", i + 1), rating(score), "ok"));
        }
        product
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(product_with_scores(&[5, 3, 4]).average_rating(), 4.0);
        assert_eq!(product_with_scores(&[5, 4]).average_rating(), 4.5);
        assert_eq!(product_with_scores(&[]).average_rating(), 0.0);
    }

    #[test]
    fn test_edit_review_overwrites_first_match_only() {
        let mut product = Product::new("P1", "Lamp", Decimal::ONE, 1);
        product.add_review(Review::new("C1", rating(2), "meh"));
        product.add_review(Review::new("C1", rating(3), "second"));

        assert!(product.edit_review("C1", "great", rating(5)));

        let first = product.reviews().get(0).unwrap();
        assert_eq!(first.comment(), "great");
        assert_eq!(first.rating().value(), 5);
        let second = product.reviews().get(1).unwrap();
        assert_eq!(second.comment(), "second");
        assert_eq!(second.rating().value(), 3);
    }

    #[test]
    fn test_edit_review_without_match_changes_nothing() {
        let mut product = product_with_scores(&[4]);
        let before = product.reviews().clone();

        assert!(!product.edit_review("C9", "new", rating(1)));
        assert_eq!(product.reviews(), &before);
        assert_eq!(product.reviews().len(), 1);
    }

    #[test]
    fn test_has_review_from() {
        let product = product_with_scores(&[4, 2]);

        assert!(product.has_review_from("C1"));
        assert!(product.has_review_from("C2"));
        assert!(!product.has_review_from("C3"));
        assert!(!product_with_scores(&[]).has_review_from("C1"));
    }

    #[test]
    fn test_apply_update_only_touches_present_fields() {
        let mut product = Product::new("P1", "Lamp", Decimal::new(1000, 2), 4);
        product.apply(ProductUpdate {
            stock: Some(0),
            ..Default::default()
        });

        assert_eq!(product.name(), "Lamp");
        assert_eq!(product.price(), Decimal::new(1000, 2));
        assert_eq!(product.stock(), 0);
    }
}
