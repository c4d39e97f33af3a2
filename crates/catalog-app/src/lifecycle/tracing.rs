//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber for the `catalog`
//! binary.
//!
//! ## Configuration
//!
//! Log lines use the compact formatter without the crate/module prefix
//! (`with_target(false)`). They go to stderr; stdout belongs to the menu.
//!
//! The filter comes from `RUST_LOG` when it is set and parses, otherwise from
//! the configured level (`--log-level` / `CATALOG_LOG_LEVEL`).
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup and shutdown with record counts
//! - **Requests**: one `debug!` per request, with full payloads for mutations
//! - **Mutations**: an `info!` carrying the affected IDs
//! - **Rejections**: a `warn!` with the error (unknown IDs, empty stock)
//! - **Bulk load**: per-source counts and one `warn!` per skipped row
//!
//! ## Usage Examples
//!
//! ```bash
//! # Default
//! catalog --data-dir ./data
//!
//! # Show request payloads
//! RUST_LOG=debug catalog --data-dir ./data
//!
//! # Only the loader
//! RUST_LOG=catalog_app::loader=debug catalog --no-menu
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
