//! # Bulk Loader
//!
//! Fills a [`Catalog`] from four CSV sources before the actor starts.
//!
//! | Source    | Header                                                        |
//! |-----------|---------------------------------------------------------------|
//! | customers | `customer_id,name,email`                                      |
//! | products  | `product_id,name,price,stock`                                 |
//! | reviews   | `review_id,product_id,customer_id,rating,comment`             |
//! | orders    | `order_id,customer_id,product_ids,total_price,order_date,status` |
//!
//! Sources load in that order so reviews and orders can resolve their
//! products and customers. `product_ids` is `;`-separated. The `total_price`
//! column is ignored: the total is recomputed from the items that resolve.
//!
//! A review comment is the rest of its line: unquoted commas inside it are
//! kept as part of the comment.
//!
//! A row that fails to parse or references an unknown product/customer is
//! skipped with a warning. A source that cannot be opened is skipped as a
//! whole and the remaining sources still load.

use catalog_store::{Catalog, CatalogError, Customer, Order, OrderStatus, Product, Rating, Review};
use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields of a review row before the free-text comment.
const REVIEW_LEADING_FIELDS: usize = 4;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid row: {0}")]
    InvalidRow(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Paths of the four bulk data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub customers: PathBuf,
    pub products: PathBuf,
    pub reviews: PathBuf,
    pub orders: PathBuf,
}

impl DataFiles {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            customers: dir.join("customers.csv"),
            products: dir.join("products.csv"),
            reviews: dir.join("reviews.csv"),
            orders: dir.join("orders.csv"),
        }
    }
}

/// Row counts for one source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub loaded: usize,
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub customers: SourceReport,
    pub products: SourceReport,
    pub reviews: SourceReport,
    pub orders: SourceReport,
    /// Sources that could not be read at all.
    pub errors: Vec<LoadError>,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.customers.skipped + self.products.skipped + self.reviews.skipped + self.orders.skipped
    }
}

#[derive(Debug, Deserialize)]
struct CustomerRow {
    customer_id: String,
    name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    product_id: String,
    name: String,
    // Parsed from the raw text so "25.00" keeps its two decimal places
    #[serde(with = "rust_decimal::serde::str")]
    price: Decimal,
    stock: u32,
}

#[derive(Debug, Deserialize)]
struct ReviewRow {
    product_id: String,
    customer_id: String,
    rating: u8,
    comment: String,
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    order_id: String,
    customer_id: String,
    product_ids: String,
    order_date: String,
    status: String,
}

/// Loads all four sources in dependency order.
pub fn load_all(catalog: &mut Catalog, files: &DataFiles) -> LoadReport {
    let mut report = LoadReport::default();

    match open(&files.customers).and_then(|file| load_customers(catalog, file)) {
        Ok(counts) => report.customers = counts,
        Err(e) => skip_source(&mut report, "customers", e),
    }
    match open(&files.products).and_then(|file| load_products(catalog, file)) {
        Ok(counts) => report.products = counts,
        Err(e) => skip_source(&mut report, "products", e),
    }
    match open(&files.reviews).and_then(|file| load_reviews(catalog, file)) {
        Ok(counts) => report.reviews = counts,
        Err(e) => skip_source(&mut report, "reviews", e),
    }
    match open(&files.orders).and_then(|file| load_orders(catalog, file)) {
        Ok(counts) => report.orders = counts,
        Err(e) => skip_source(&mut report, "orders", e),
    }

    info!(
        customers = report.customers.loaded,
        products = report.products.loaded,
        reviews = report.reviews.loaded,
        orders = report.orders.loaded,
        skipped = report.skipped(),
        "Bulk load finished"
    );
    report
}

pub fn load_customers(catalog: &mut Catalog, source: impl Read) -> Result<SourceReport, LoadError> {
    load_rows(source, "customers", |row: CustomerRow| {
        catalog.register_customer(Customer::new(row.customer_id, row.name, row.email));
        Ok(())
    })
}

pub fn load_products(catalog: &mut Catalog, source: impl Read) -> Result<SourceReport, LoadError> {
    load_rows(source, "products", |row: ProductRow| {
        catalog.add_product(Product::new(row.product_id, row.name, row.price, row.stock));
        Ok(())
    })
}

pub fn load_reviews(catalog: &mut Catalog, source: impl Read) -> Result<SourceReport, LoadError> {
    // Untrimmed fields, so the comment keeps its spacing around the commas
    load_records(source, "reviews", csv::Trim::Headers, join_comment, |row: ReviewRow| {
        let rating = Rating::new(row.rating)?;
        catalog.add_review(&row.product_id, Review::new(row.customer_id, rating, row.comment))?;
        Ok(())
    })
}

pub fn load_orders(catalog: &mut Catalog, source: impl Read) -> Result<SourceReport, LoadError> {
    load_rows(source, "orders", |row: OrderRow| {
        let order_date = NaiveDate::parse_from_str(&row.order_date, DATE_FORMAT)
            .map_err(|_| LoadError::InvalidDate(row.order_date.clone()))?;

        let mut order = Order::new(&row.order_id, &row.customer_id, order_date);
        order.update_status(OrderStatus::from(row.status));

        for product_id in row.product_ids.split(';').map(str::trim).filter(|id| !id.is_empty()) {
            match catalog.find_product_by_id(product_id) {
                Some(product) => order.add_item(product),
                None => debug!(order_id = %row.order_id, %product_id, "Item skipped, unknown product"),
            }
        }

        catalog.place_order(&row.customer_id, order)?;
        Ok(())
    })
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn skip_source(report: &mut LoadReport, source: &str, error: LoadError) {
    warn!(source, error = %error, "Source skipped");
    report.errors.push(error);
}

/// Re-joins a review comment that was split on unquoted commas.
fn join_comment(record: StringRecord) -> StringRecord {
    let mut shaped: StringRecord = record
        .iter()
        .take(REVIEW_LEADING_FIELDS)
        .map(str::trim)
        .collect();
    if record.len() > REVIEW_LEADING_FIELDS {
        let comment = record
            .iter()
            .skip(REVIEW_LEADING_FIELDS)
            .collect::<Vec<_>>()
            .join(",");
        shaped.push_field(comment.trim());
    }
    shaped
}

fn load_rows<R, F>(source: impl Read, name: &str, apply: F) -> Result<SourceReport, LoadError>
where
    R: DeserializeOwned,
    F: FnMut(R) -> Result<(), LoadError>,
{
    load_records(source, name, csv::Trim::All, |record| record, apply)
}

/// Reads every record of `source`, lets `shape` rewrite it, then deserializes
/// it and hands the row to `apply`.
///
/// Rows that fail to deserialize or that `apply` rejects are counted as
/// skipped. Only I/O failures abort the source.
fn load_records<R, S, F>(
    source: impl Read,
    name: &str,
    trim: csv::Trim,
    shape: S,
    mut apply: F,
) -> Result<SourceReport, LoadError>
where
    R: DeserializeOwned,
    S: Fn(StringRecord) -> StringRecord,
    F: FnMut(R) -> Result<(), LoadError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(trim)
        .flexible(true)
        .from_reader(source);
    let headers = reader.headers()?.clone();
    let mut report = SourceReport::default();

    for (index, record) in reader.records().enumerate() {
        // Line 1 is the header
        let line = index + 2;
        let outcome = match record {
            Ok(record) => shape(record)
                .deserialize::<R>(Some(&headers))
                .map_err(|e| LoadError::InvalidRow(e.to_string()))
                .and_then(&mut apply),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => Err(LoadError::InvalidRow(e.to_string())),
        };
        match outcome {
            Ok(()) => report.loaded += 1,
            Err(e) => {
                warn!(source = name, line, error = %e, "Row skipped");
                report.skipped += 1;
            }
        }
    }

    debug!(source = name, loaded = report.loaded, skipped = report.skipped, "Source loaded");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOMERS: &str = "customer_id,name,email\n\
        C1, Ada Lovelace ,ada@example.com\n\
        C2,Grace Hopper,grace@example.com\n";

    const PRODUCTS: &str = "product_id,name,price,stock\n\
        P1,Lamp,25.00,4\n\
        P2,Chair,89.90,0\n\
        P3,Broken,not-a-price,1\n";

    #[test]
    fn test_customers_are_trimmed() {
        let mut catalog = Catalog::new();

        let report = load_customers(&mut catalog, CUSTOMERS.as_bytes()).unwrap();

        assert_eq!(report, SourceReport { loaded: 2, skipped: 0 });
        assert_eq!(catalog.find_customer_by_id("C1").unwrap().name(), "Ada Lovelace");
    }

    #[test]
    fn test_bad_price_skips_only_that_row() {
        let mut catalog = Catalog::new();

        let report = load_products(&mut catalog, PRODUCTS.as_bytes()).unwrap();

        assert_eq!(report, SourceReport { loaded: 2, skipped: 1 });
        assert_eq!(catalog.find_product_by_id("P2").unwrap().price(), Decimal::new(8990, 2));
        assert!(catalog.find_product_by_id("P3").is_none());
    }

    #[test]
    fn test_prices_keep_their_scale() {
        let mut catalog = Catalog::new();

        load_products(&mut catalog, PRODUCTS.as_bytes()).unwrap();

        assert_eq!(catalog.find_product_by_id("P1").unwrap().price().to_string(), "25.00");
        assert_eq!(catalog.find_product_by_id("P2").unwrap().price().to_string(), "89.90");
    }

    #[test]
    fn test_review_comment_keeps_quoted_commas() {
        let mut catalog = Catalog::new();
        load_products(&mut catalog, PRODUCTS.as_bytes()).unwrap();
        let reviews = "review_id,product_id,customer_id,rating,comment\n\
            R1,P1,C1,5,\"Bright, warm, quiet\"\n\
            R2,P9,C1,4,unknown product\n\
            R3,P1,C2,9,out of range\n";

        let report = load_reviews(&mut catalog, reviews.as_bytes()).unwrap();

        assert_eq!(report, SourceReport { loaded: 1, skipped: 2 });
        let lamp = catalog.find_product_by_id("P1").unwrap();
        assert_eq!(lamp.reviews().get(0).unwrap().comment(), "Bright, warm, quiet");
    }

    #[test]
    fn test_review_comment_keeps_unquoted_commas() {
        let mut catalog = Catalog::new();
        load_products(&mut catalog, PRODUCTS.as_bytes()).unwrap();
        let reviews = "review_id,product_id,customer_id,rating,comment
            R1, P1 ,C1, 5 ,Great lamp, very bright
            R2,P1,C2,4,Plain
            R3,P1,C2,4
";

        let report = load_reviews(&mut catalog, reviews.as_bytes()).unwrap();

        assert_eq!(report, SourceReport { loaded: 2, skipped: 1 });
        let lamp = catalog.find_product_by_id("P1").unwrap();
        let first = lamp.reviews().get(0).unwrap();
        assert_eq!(first.customer_id(), "C1");
        assert_eq!(first.rating().value(), 5);
        assert_eq!(first.comment(), "Great lamp, very bright");
        assert_eq!(lamp.reviews().get(1).unwrap().comment(), "Plain");
    }

    #[test]
    fn test_orders_recompute_total_and_skip_unknown_refs() {
        let mut catalog = Catalog::new();
        load_customers(&mut catalog, CUSTOMERS.as_bytes()).unwrap();
        load_products(&mut catalog, PRODUCTS.as_bytes()).unwrap();
        let orders = "order_id,customer_id,product_ids,total_price,order_date,status\n\
            O1,C1,P1;P2;P9,999.99,2025-01-05,shipped\n\
            O2,C9,P1,25.00,2025-01-06,pending\n\
            O3,C2,P1,25.00,05/01/2025,pending\n";

        let report = load_orders(&mut catalog, orders.as_bytes()).unwrap();

        assert_eq!(report, SourceReport { loaded: 1, skipped: 2 });
        let order = catalog.find_order_by_id("O1").unwrap();
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.total_price(), Decimal::new(11490, 2));
        assert_eq!(order.status(), &OrderStatus::Shipped);
        assert_eq!(
            catalog.find_customer_by_id("C1").unwrap().order_count(),
            1
        );
    }

    #[test]
    fn test_missing_file_skips_source_only() {
        let dir = std::env::temp_dir().join(format!("catalog-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("customers.csv"), CUSTOMERS).unwrap();
        let files = DataFiles::in_dir(&dir);

        let mut catalog = Catalog::new();
        let report = load_all(&mut catalog, &files);

        assert_eq!(report.customers.loaded, 2);
        assert_eq!(report.errors.len(), 3);
        assert!(matches!(report.errors[0], LoadError::Io { .. }));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
