//! # System Lifecycle
//!
//! Starting and stopping the catalog service.
//!
//! ## The CatalogSystem Pattern
//!
//! ```rust,ignore
//! let mut catalog = Catalog::with_seeds(config.id_seeds());
//! loader::load_all(&mut catalog, &config.data_files())?;
//!
//! let system = CatalogSystem::new(catalog, config.channel_capacity);
//! menu::run(&system.client, stdin, stdout).await?;
//! let catalog = system.shutdown().await?;
//! ```
//!
//! The bulk load runs on the plain [`Catalog`](catalog_store::Catalog) before
//! the actor exists, so it needs no messages. From [`CatalogSystem::new`]
//! onward every access goes through the client.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client** - closes the sender side of the channel
//! 2. **Actor drains** - requests already queued are still answered
//! 3. **Actor returns** - the run loop ends and yields the catalog
//! 4. **Await completion** - [`CatalogSystem::shutdown`] hands the catalog back
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes structured logging; see [`tracing`](self::tracing).

pub mod catalog_system;
pub mod tracing;

pub use catalog_system::*;
pub use self::tracing::*;
