use crate::model::Product;
use crate::seq_list::SequentialList;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

/// Lifecycle status of an order.
///
/// Any text that is not one of the known words is kept verbatim in
/// [`OrderStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Canceled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
            Self::Other(text) => text,
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(text: &str) -> Self {
        let text = text.trim();
        match text.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "canceled" | "cancelled" => Self::Canceled,
            _ => Self::Other(text.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl FromStr for OrderStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item of an order, captured when the item was added.
///
/// Later edits to the product (price, name, removal) do not reach the line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
}

/// Represents a customer order.
///
/// `total_price` is the sum of the line prices at the time each line was
/// added. After placement only the status changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: String,
    customer_id: String,
    items: SequentialList<OrderLine>,
    total_price: Decimal,
    order_date: NaiveDate,
    status: OrderStatus,
}

impl Order {
    /// Creates a new, empty order.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (from the bulk data or [`Catalog::next_order_id`](crate::Catalog::next_order_id))
    /// * `customer_id` - ID of the customer placing the order
    /// * `order_date` - Day the order was placed
    ///
    /// # Notes
    /// The order is initialized with status [`OrderStatus::Pending`] and a zero total.
    pub fn new(id: impl Into<String>, customer_id: impl Into<String>, order_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items: SequentialList::new(),
            total_price: Decimal::ZERO,
            order_date,
            status: OrderStatus::Pending,
        }
    }

    /// Appends one unit of `product` and adds its current price to the total.
    pub fn add_item(&mut self, product: &Product) {
        self.items.append(OrderLine {
            product_id: product.id().to_string(),
            name: product.name().to_string(),
            unit_price: product.price(),
        });
        self.total_price += product.price();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn items(&self) -> &SequentialList<OrderLine> {
        &self.items
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    pub fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    pub fn update_status(&mut self, status: impl Into<OrderStatus>) {
        self.status = status.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_total_is_frozen_at_add_time() {
        let mut product = Product::new("P1", "Mug", Decimal::new(500, 2), 10);
        let mut order = Order::new("O1", "C1", day(1));

        order.add_item(&product);
        order.add_item(&product);
        product.set_price(Decimal::new(900, 2));

        assert_eq!(order.total_price(), Decimal::new(1000, 2));
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.items().get(1).unwrap().unit_price, Decimal::new(500, 2));
    }

    #[test]
    fn test_status_parsing_keeps_free_text() {
        assert_eq!(OrderStatus::from("Shipped"), OrderStatus::Shipped);
        assert_eq!(OrderStatus::from(" cancelled "), OrderStatus::Canceled);
        assert_eq!(
            OrderStatus::from("on hold"),
            OrderStatus::Other("on hold".to_string())
        );
        assert_eq!(OrderStatus::Delivered.to_string(), "delivered");
        assert_eq!(OrderStatus::Other("lost".into()).to_string(), "lost");
    }

    #[test]
    fn test_new_order_is_pending() {
        let mut order = Order::new("O1", "C1", day(5));
        assert_eq!(order.status(), &OrderStatus::Pending);

        order.update_status(OrderStatus::Shipped);
        assert_eq!(order.status(), &OrderStatus::Shipped);
        order.update_status("delivered");
        assert_eq!(order.status(), &OrderStatus::Delivered);
    }
}
