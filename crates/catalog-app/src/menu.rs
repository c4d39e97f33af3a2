//! # Interactive Menu
//!
//! The numbered console front-end. Every action goes through a
//! [`CatalogClient`]; input is validated here before a request is sent.
//!
//! The menu reads lines from any [`AsyncBufRead`] and writes plain text to
//! any [`Write`], so tests drive it with a scripted byte slice and inspect the
//! returned buffer. End of input ends the session like option `0`.

use crate::client::CatalogClient;
use crate::error::ServiceError;
use crate::message::IdKind;
use catalog_store::{CatalogError, Customer, Order, Product, Rating, Review};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Input closed while the menu was waiting for a line.
    #[error("End of input")]
    EndOfInput,
}

pub struct Menu<'a, R, W> {
    client: &'a CatalogClient,
    lines: Lines<R>,
    out: W,
}

impl<'a, R, W> Menu<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(client: &'a CatalogClient, input: R, out: W) -> Self {
        Self {
            client,
            lines: input.lines(),
            out,
        }
    }

    /// Runs until the user picks `0` or the input ends, then returns the
    /// output sink.
    ///
    /// # Errors
    /// Console I/O failures and a closed catalog actor. Rejected requests
    /// (unknown IDs, empty stock) are reported to the user instead.
    pub async fn run(mut self) -> Result<W, MenuError> {
        loop {
            self.print_menu()?;
            let choice = match self.line("Enter your choice: ").await {
                Ok(choice) => choice,
                Err(MenuError::EndOfInput) => break,
                Err(e) => return Err(e),
            };

            let outcome = match choice.parse::<u32>() {
                Ok(0) => {
                    writeln!(self.out, "Thank you for using the system. Goodbye!")?;
                    break;
                }
                Ok(option) => self.dispatch(option).await,
                Err(_) => {
                    writeln!(self.out, "Invalid input. Please enter a number.")?;
                    Ok(())
                }
            };
            match outcome {
                Ok(()) => {}
                Err(MenuError::EndOfInput) => break,
                Err(e) => return Err(e),
            }
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn print_menu(&mut self) -> Result<(), MenuError> {
        let out = &mut self.out;
        writeln!(out)?;
        writeln!(out, "--- E-Commerce System Menu ---")?;
        writeln!(out, "1. Add a new Product")?;
        writeln!(out, "2. Register a new Customer")?;
        writeln!(out, "3. Place a new Order")?;
        writeln!(out, "4. Add a Product Review")?;
        writeln!(out, "---")?;
        writeln!(out, "5. Find Product by ID")?;
        writeln!(out, "6. List Out-of-Stock Products")?;
        writeln!(out, "7. List Top 3 Products (by rating)")?;
        writeln!(out, "8. Find all Reviews by a Customer")?;
        writeln!(out, "9. Find Common Reviewed Products (by 2 customers)")?;
        writeln!(out, "10. View All Customers")?;
        writeln!(out, "11. Find Orders Between Two Dates")?;
        writeln!(out, "12. View Order History for a Customer")?;
        writeln!(out, "13. View All Products")?;
        writeln!(out, "14. View All Orders")?;
        writeln!(out, "--- (Admin & Edit Actions) ---")?;
        writeln!(out, "15. Remove a Product")?;
        writeln!(out, "16. Search Product by Name")?;
        writeln!(out, "17. Cancel an Order")?;
        writeln!(out, "18. Search Order by ID")?;
        writeln!(out, "19. Edit a Review")?;
        writeln!(out, "---")?;
        writeln!(out, "0. Exit System")?;
        Ok(())
    }

    async fn dispatch(&mut self, option: u32) -> Result<(), MenuError> {
        match option {
            1 => self.add_product().await,
            2 => self.register_customer().await,
            3 => self.place_order().await,
            4 => self.add_review().await,
            5 => self.find_product().await,
            6 => self.out_of_stock().await,
            7 => self.top_rated().await,
            8 => self.customer_reviews().await,
            9 => self.common_reviewed().await,
            10 => self.all_customers().await,
            11 => self.orders_between().await,
            12 => self.order_history().await,
            13 => self.all_products().await,
            14 => self.all_orders().await,
            15 => self.remove_product().await,
            16 => self.search_by_name().await,
            17 => self.cancel_order().await,
            18 => self.find_order().await,
            19 => self.edit_review().await,
            _ => {
                writeln!(self.out, "Invalid choice. Please try again.")?;
                Ok(())
            }
        }
    }

    // --- Input ---

    async fn line(&mut self, prompt: &str) -> Result<String, MenuError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(MenuError::EndOfInput),
        }
    }

    /// Prompts until `parse` accepts the line.
    async fn parsed<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Result<T, MenuError> {
        loop {
            let text = self.line(prompt).await?;
            match parse(&text) {
                Ok(value) => return Ok(value),
                Err(message) => writeln!(self.out, "Error: {message}")?,
            }
        }
    }

    /// Prints rejections; propagates failures of the service itself.
    fn report(&mut self, error: ServiceError) -> Result<(), MenuError> {
        match error {
            ServiceError::Catalog(_) | ServiceError::InsufficientStock { .. } => {
                writeln!(self.out, "ERROR: {error}")?;
                Ok(())
            }
            other => Err(other.into()),
        }
    }

    async fn existing_customer(&mut self, prompt: &str) -> Result<Option<Customer>, MenuError> {
        let customer_id = self.line(prompt).await?;
        let customer = self.client.find_customer(customer_id).await?;
        if customer.is_none() {
            writeln!(self.out, "ERROR: Customer ID not found.")?;
        }
        Ok(customer)
    }

    async fn existing_product(&mut self, prompt: &str) -> Result<Option<Product>, MenuError> {
        let product_id = self.line(prompt).await?;
        let product = self.client.find_product(product_id).await?;
        if product.is_none() {
            writeln!(self.out, "ERROR: Product ID not found.")?;
        }
        Ok(product)
    }

    // --- Mutations ---

    async fn add_product(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Add New Product ---")?;
        let id = self.client.next_id(IdKind::Product).await?;
        writeln!(self.out, "Your new (auto-generated) Product ID is: {id}")?;

        let name = self.line("Enter Product Name: ").await?;
        let price = self.parsed("Enter Price (e.g., 49.99): ", parse_price).await?;
        let stock = self.parsed("Enter Stock Quantity (e.g., 10): ", parse_stock).await?;

        self.client.add_product(Product::new(id, &name, price, stock)).await?;
        writeln!(self.out, "SUCCESS: Product '{name}' added.")?;
        Ok(())
    }

    async fn register_customer(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Register New Customer ---")?;
        let id = self.client.next_id(IdKind::Customer).await?;
        writeln!(self.out, "Your new (auto-generated) Customer ID is: {id}")?;

        let name = self.line("Enter Customer Name: ").await?;
        let email = self.line("Enter Customer Email: ").await?;

        self.client.register_customer(Customer::new(id, &name, email)).await?;
        writeln!(self.out, "SUCCESS: Customer '{name}' registered.")?;
        Ok(())
    }

    async fn place_order(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Place New Order ---")?;
        let Some(customer) = self.existing_customer("Enter your Customer ID: ").await? else {
            return Ok(());
        };

        let products = self.client.list_products().await?;
        if products.is_empty() {
            writeln!(self.out, "Sorry, there are no products available to order.")?;
            return Ok(());
        }
        writeln!(self.out, "--- Available Products (Please choose a number) ---")?;
        for (number, product) in products.iter().enumerate() {
            writeln!(
                self.out,
                "{}. Name: {} | Price: {} | Stock: {}",
                number + 1,
                product.name(),
                product.price(),
                product.stock()
            )?;
        }

        let order_id = self.client.next_id(IdKind::Order).await?;
        let mut order = Order::new(&order_id, customer.id(), Local::now().date_naive());
        writeln!(self.out, "Your new Order ID is: {order_id}")?;

        loop {
            let text = self
                .line("Enter Product *Number* to add to cart (or 0 to finish): ")
                .await?;
            let Ok(number) = text.parse::<usize>() else {
                writeln!(self.out, "Invalid input. Please enter a number.")?;
                continue;
            };
            if number == 0 {
                break;
            }
            let Some(listed) = number.checked_sub(1).and_then(|index| products.get(index)) else {
                writeln!(self.out, "ERROR: Invalid number. Please choose from the list.")?;
                continue;
            };

            match self.client.reserve_item(listed.id()).await {
                Ok(reserved) => {
                    order.add_item(&reserved);
                    writeln!(
                        self.out,
                        "Added '{}' to cart. Current Total: {}",
                        reserved.name(),
                        order.total_price()
                    )?;
                }
                Err(ServiceError::InsufficientStock { .. }) => {
                    writeln!(self.out, "ERROR: Sorry, '{}' is out of stock.", listed.name())?;
                }
                Err(e) => self.report(e)?,
            }
        }

        if order.items().is_empty() {
            writeln!(self.out, "Order canceled (no products were added).")?;
            return Ok(());
        }

        writeln!(self.out, "--- Your Order Summary (ID: {}) ---", order.id())?;
        for line in order.items() {
            writeln!(self.out, "- {} ({})", line.name, line.unit_price)?;
        }
        let total = order.total_price();
        match self.client.place_order(customer.id(), order).await {
            Ok(()) => writeln!(self.out, "SUCCESS: Order placed! Your final total is: {total}")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    async fn add_review(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Add Product Review ---")?;
        let Some(product) = self.existing_product("Enter Product ID to review: ").await? else {
            return Ok(());
        };
        let Some(customer) = self.existing_customer("Enter your Customer ID: ").await? else {
            return Ok(());
        };
        let rating = self.parsed("Enter Rating (a whole number 1-5): ", parse_rating).await?;
        let comment = self.line("Enter your comment: ").await?;

        match self
            .client
            .add_review(product.id(), Review::new(customer.id(), rating, comment))
            .await
        {
            Ok(()) => writeln!(
                self.out,
                "SUCCESS: Your review for '{}' has been added.",
                product.name()
            )?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    async fn remove_product(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Remove a Product ---")?;
        let product_id = self.line("Enter the Product ID to remove: ").await?;
        match self.client.remove_product(&product_id).await? {
            Some(product) => writeln!(
                self.out,
                "SUCCESS: Product '{}' (ID: {product_id}) has been removed.",
                product.name()
            )?,
            None => writeln!(self.out, "ERROR: Product ID not found. No product was removed.")?,
        }
        Ok(())
    }

    async fn cancel_order(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Cancel an Order ---")?;
        let order_id = self.line("Enter the Order ID to cancel: ").await?;
        match self.client.cancel_order(&order_id).await {
            Ok(_) => writeln!(
                self.out,
                "SUCCESS: Order ID {order_id} has been marked as 'canceled'."
            )?,
            Err(ServiceError::Catalog(CatalogError::OrderNotFound(_))) => {
                writeln!(self.out, "ERROR: Order ID not found.")?
            }
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    async fn edit_review(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Edit a Review ---")?;
        let Some(product) = self
            .existing_product("Enter the Product ID for the review you want to edit: ")
            .await?
        else {
            return Ok(());
        };
        let Some(customer) = self
            .existing_customer("Enter *your* Customer ID (the review's author): ")
            .await?
        else {
            return Ok(());
        };
        let rating = self.parsed("Enter New Rating (a whole number 1-5): ", parse_rating).await?;
        let comment = self.line("Enter New Comment: ").await?;

        match self
            .client
            .edit_review(product.id(), customer.id(), comment, rating)
            .await
        {
            Ok(()) => writeln!(
                self.out,
                "SUCCESS: Your review for '{}' has been updated.",
                product.name()
            )?,
            Err(ServiceError::Catalog(CatalogError::ReviewNotFound { customer_id, .. })) => {
                writeln!(
                    self.out,
                    "ERROR: No review from customer {customer_id} was found for this product."
                )?
            }
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    // --- Lookups & reports ---

    async fn find_product(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Find Product by ID ---")?;
        let product_id = self.line("Enter Product ID: ").await?;
        match self.client.find_product(product_id).await? {
            Some(product) => {
                writeln!(self.out, "Found Product:")?;
                self.product_details(&product)?;
            }
            None => writeln!(self.out, "ERROR: Product ID not found.")?,
        }
        Ok(())
    }

    async fn search_by_name(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Search Product by Name ---")?;
        let name = self.line("Enter the exact Product Name: ").await?;
        match self.client.find_product_by_name(name).await? {
            Some(product) => {
                writeln!(self.out, "--- Product Found ---")?;
                writeln!(self.out, "  ID: {}", product.id())?;
                self.product_details(&product)?;
            }
            None => writeln!(self.out, "ERROR: No product found with that name.")?,
        }
        Ok(())
    }

    fn product_details(&mut self, product: &Product) -> Result<(), MenuError> {
        writeln!(self.out, "  Name: {}", product.name())?;
        writeln!(self.out, "  Price: {}", product.price())?;
        writeln!(self.out, "  Stock: {}", product.stock())?;
        writeln!(self.out, "  Avg Rating: {:.2}", product.average_rating())?;
        Ok(())
    }

    async fn out_of_stock(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Out-of-Stock Products ---")?;
        let products = self.client.out_of_stock().await?;
        if products.is_empty() {
            writeln!(self.out, "No products are out of stock.")?;
        }
        for product in &products {
            writeln!(self.out, "- {} (ID: {})", product.name(), product.id())?;
        }
        Ok(())
    }

    async fn top_rated(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Top 3 Rated Products ---")?;
        let products = self.client.top_rated().await?;
        if products.is_empty() {
            writeln!(self.out, "No products have been rated yet.")?;
        }
        for (rank, product) in products.iter().enumerate() {
            writeln!(
                self.out,
                "{}. {} (Avg Rating: {:.2})",
                rank + 1,
                product.name(),
                product.average_rating()
            )?;
        }
        Ok(())
    }

    async fn customer_reviews(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Find Reviews by Customer ---")?;
        let customer_id = self.line("Enter Customer ID: ").await?;
        let reviews = self.client.customer_reviews(&customer_id).await?;
        if reviews.is_empty() {
            writeln!(self.out, "No reviews found for this customer.")?;
            return Ok(());
        }
        writeln!(self.out, "Reviews by Customer {customer_id}:")?;
        for review in &reviews {
            writeln!(
                self.out,
                "- Rating: {} | Comment: {}",
                review.rating(),
                review.comment()
            )?;
        }
        Ok(())
    }

    async fn common_reviewed(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Find Common Reviewed Products (> 4 stars) ---")?;
        let first = self.line("Enter first Customer ID: ").await?;
        let second = self.line("Enter second Customer ID: ").await?;
        let products = self.client.common_reviewed(first, second).await?;
        if products.is_empty() {
            writeln!(self.out, "No products with >4 stars were reviewed by both customers.")?;
            return Ok(());
        }
        writeln!(self.out, "Common Products (>4 stars) reviewed by both:")?;
        for product in &products {
            writeln!(self.out, "- {}", product.name())?;
        }
        Ok(())
    }

    async fn all_customers(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- All Registered Customers ---")?;
        let customers = self.client.list_customers().await?;
        if customers.is_empty() {
            writeln!(self.out, "There are no customers registered yet.")?;
            return Ok(());
        }
        for customer in &customers {
            writeln!(
                self.out,
                "ID: {} | Name: {} | Email: {}",
                customer.id(),
                customer.name(),
                customer.email()
            )?;
        }
        writeln!(self.out, "Total Customers: {}", customers.len())?;
        Ok(())
    }

    async fn orders_between(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Find Orders Between Two Dates ---")?;
        let start = self.parsed("Enter Start Date (yyyy-MM-dd): ", parse_date).await?;
        let end = self.parsed("Enter End Date (yyyy-MM-dd): ", parse_date).await?;
        let orders = self.client.orders_between(start, end).await?;
        if orders.is_empty() {
            writeln!(self.out, "No orders found between {start} and {end}")?;
            return Ok(());
        }
        writeln!(self.out, "--- Orders Found ---")?;
        for order in &orders {
            self.order_line(order)?;
        }
        writeln!(self.out, "Found {} orders.", orders.len())?;
        Ok(())
    }

    async fn order_history(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- View Customer Order History ---")?;
        let Some(customer) = self.existing_customer("Enter Customer ID: ").await? else {
            return Ok(());
        };
        let orders = self
            .client
            .order_history(customer.id())
            .await?
            .unwrap_or_default();
        if orders.is_empty() {
            writeln!(self.out, "Customer '{}' has no orders on record.", customer.name())?;
            return Ok(());
        }
        writeln!(self.out, "--- Orders for {} ---", customer.name())?;
        for order in &orders {
            self.order_line(order)?;
        }
        writeln!(self.out, "Found {} total orders.", orders.len())?;
        Ok(())
    }

    async fn all_products(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- All Products in System ---")?;
        let products = self.client.list_products().await?;
        if products.is_empty() {
            writeln!(self.out, "There are no products in the system.")?;
            return Ok(());
        }
        for product in &products {
            writeln!(
                self.out,
                "ID: {} | Name: {} | Price: {} | Stock: {}",
                product.id(),
                product.name(),
                product.price(),
                product.stock()
            )?;
        }
        writeln!(self.out, "Total Products: {}", products.len())?;
        Ok(())
    }

    async fn all_orders(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- All Orders in System ---")?;
        let orders = self.client.list_orders().await?;
        if orders.is_empty() {
            writeln!(self.out, "There are no orders in the system.")?;
            return Ok(());
        }
        for order in &orders {
            self.order_line(order)?;
        }
        writeln!(self.out, "Total Orders: {}", orders.len())?;
        Ok(())
    }

    async fn find_order(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "--- Search Order by ID ---")?;
        let order_id = self.line("Enter Order ID: ").await?;
        let Some(order) = self.client.find_order(order_id).await? else {
            writeln!(self.out, "ERROR: No order found with that ID.")?;
            return Ok(());
        };
        writeln!(self.out, "--- Order Found ---")?;
        writeln!(self.out, "  Order ID: {}", order.id())?;
        writeln!(self.out, "  Customer ID: {}", order.customer_id())?;
        writeln!(self.out, "  Date: {}", order.order_date().format(DATE_FORMAT))?;
        writeln!(self.out, "  Status: {}", order.status())?;
        writeln!(self.out, "  Total Price: {}", order.total_price())?;
        writeln!(self.out, "  Products in this order:")?;
        for line in order.items() {
            writeln!(self.out, "    - {}", line.name)?;
        }
        Ok(())
    }

    fn order_line(&mut self, order: &Order) -> Result<(), MenuError> {
        writeln!(
            self.out,
            "ID: {} | Customer: {} | Date: {} | Total: {} | Status: {}",
            order.id(),
            order.customer_id(),
            order.order_date().format(DATE_FORMAT),
            order.total_price(),
            order.status()
        )?;
        Ok(())
    }
}

fn parse_price(text: &str) -> Result<Decimal, String> {
    let price =
        Decimal::from_str(text).map_err(|_| "Invalid input. Please enter a number.".to_string())?;
    if price <= Decimal::ZERO {
        return Err("Price must be greater than 0.".to_string());
    }
    Ok(price)
}

fn parse_stock(text: &str) -> Result<u32, String> {
    if text.starts_with('-') {
        return Err("Stock cannot be negative.".to_string());
    }
    text.parse()
        .map_err(|_| "Invalid input. Please enter a whole number.".to_string())
}

fn parse_rating(text: &str) -> Result<Rating, String> {
    let value: u8 = text
        .parse()
        .map_err(|_| "Invalid input. Please enter a whole number (e.g., 4).".to_string())?;
    Rating::new(value).map_err(|_| "Rating must be between 1 and 5.".to_string())
}

fn parse_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| "Invalid date format. Please use yyyy-MM-dd (e.g., 2025-01-20).".to_string())
}
