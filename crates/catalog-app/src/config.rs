use crate::loader::DataFiles;
use catalog_store::IdSeeds;
use clap::Parser;
use std::path::PathBuf;

const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Command line and environment configuration for the `catalog` binary.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "catalog", about = "In-memory product catalog with an interactive menu", version)]
pub struct Config {
    #[arg(
        long,
        env = "CATALOG_DATA_DIR",
        value_name = "DIR",
        default_value = ".",
        help = "Directory the data file names are resolved against"
    )]
    pub data_dir: PathBuf,

    #[arg(long, env = "CATALOG_PRODUCTS", value_name = "FILE", default_value = "products.csv")]
    pub products: PathBuf,

    #[arg(long, env = "CATALOG_CUSTOMERS", value_name = "FILE", default_value = "customers.csv")]
    pub customers: PathBuf,

    #[arg(long, env = "CATALOG_ORDERS", value_name = "FILE", default_value = "orders.csv")]
    pub orders: PathBuf,

    #[arg(long, env = "CATALOG_REVIEWS", value_name = "FILE", default_value = "reviews.csv")]
    pub reviews: PathBuf,

    #[arg(
        long,
        env = "CATALOG_LOG_LEVEL",
        value_name = "FILTER",
        default_value = "info",
        help = "Log filter used when RUST_LOG is not set"
    )]
    pub log_level: String,

    #[arg(
        long,
        env = "CATALOG_CHANNEL_CAPACITY",
        value_name = "N",
        default_value_t = DEFAULT_CHANNEL_CAPACITY,
        help = "Maximum number of queued requests to the catalog actor"
    )]
    pub channel_capacity: usize,

    #[arg(
        long,
        env = "CATALOG_NO_MENU",
        help = "Load the data, print a summary and exit"
    )]
    pub no_menu: bool,

    #[arg(long, env = "CATALOG_PRODUCT_ID_SEED", value_name = "N", default_value_t = IdSeeds::default().product)]
    pub product_id_seed: u64,

    #[arg(long, env = "CATALOG_CUSTOMER_ID_SEED", value_name = "N", default_value_t = IdSeeds::default().customer)]
    pub customer_id_seed: u64,

    #[arg(long, env = "CATALOG_ORDER_ID_SEED", value_name = "N", default_value_t = IdSeeds::default().order)]
    pub order_id_seed: u64,
}

impl Config {
    /// Data file paths; relative names are joined onto `data_dir`.
    pub fn data_files(&self) -> DataFiles {
        DataFiles {
            customers: self.data_dir.join(&self.customers),
            products: self.data_dir.join(&self.products),
            reviews: self.data_dir.join(&self.reviews),
            orders: self.data_dir.join(&self.orders),
        }
    }

    pub fn id_seeds(&self) -> IdSeeds {
        IdSeeds {
            product: self.product_id_seed,
            customer: self.customer_id_seed,
            order: self.order_id_seed,
        }
    }
}
