//! # Catalog App
//!
//! The service layer around [`catalog_store`].
//!
//! - **[actor]**: [`CatalogActor`](actor::CatalogActor), the single task that owns the catalog.
//! - **[client]**: [`CatalogClient`](client::CatalogClient), the cloneable async handle.
//! - **[message]**: the request protocol between the two.
//! - **[lifecycle]**: [`CatalogSystem`](lifecycle::CatalogSystem) start/stop and tracing setup.
//! - **[loader]**: CSV bulk load into a catalog before the actor starts.
//! - **[menu]**: the interactive console front-end.
//! - **[config]**: command line and environment configuration.
//!
//! ## Testing
//!
//! See [`mock`] for utilities to test client callers without spawning an actor.

pub mod actor;
pub mod client;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod loader;
pub mod menu;
pub mod message;
pub mod mock;

pub use error::ServiceError;
