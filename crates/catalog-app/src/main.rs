use anyhow::Context;
use catalog_app::config::Config;
use catalog_app::lifecycle::{setup_tracing, CatalogSystem};
use catalog_app::loader;
use catalog_app::menu::Menu;
use catalog_store::Catalog;
use clap::Parser;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    setup_tracing(&config.log_level);

    info!(data_dir = %config.data_dir.display(), "Initializing catalog");

    let mut catalog = Catalog::with_seeds(config.id_seeds());
    let report = loader::load_all(&mut catalog, &config.data_files());
    for error in &report.errors {
        warn!(error = %error, "Data source unavailable");
    }

    if config.no_menu {
        println!(
            "Loaded {} customers, {} products, {} reviews, {} orders ({} rows skipped)",
            report.customers.loaded,
            report.products.loaded,
            report.reviews.loaded,
            report.orders.loaded,
            report.skipped()
        );
        return Ok(());
    }

    let system = CatalogSystem::new(catalog, config.channel_capacity);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let result = Menu::new(&system.client, stdin, std::io::stdout())
        .run()
        .await
        .map(|_| ())
        .context("Menu session failed");

    let catalog = system
        .shutdown()
        .await
        .context("Catalog shutdown failed")?;
    info!(
        products = catalog.products().len(),
        customers = catalog.customers().len(),
        orders = catalog.orders().len(),
        "Session finished"
    );

    result
}
