use crate::actor::CatalogActor;
use crate::client::CatalogClient;
use crate::error::ServiceError;
use catalog_store::Catalog;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// A running catalog service: the actor task plus a client connected to it.
///
/// Clone `client` to hand out more handles. Call [`shutdown`](Self::shutdown)
/// to stop the actor and take the catalog back.
pub struct CatalogSystem {
    pub client: CatalogClient,

    handle: JoinHandle<Catalog>,
}

impl CatalogSystem {
    /// Spawns the actor around `catalog`.
    ///
    /// Must be called from inside a Tokio runtime.
    pub fn new(catalog: Catalog, channel_capacity: usize) -> Self {
        let (actor, client) = CatalogActor::new(catalog, channel_capacity.max(1));
        let handle = tokio::spawn(actor.run());

        Self { client, handle }
    }

    /// Closes the channel and waits for the actor to drain it.
    ///
    /// Clones of the client held elsewhere keep the actor alive; drop them
    /// first.
    pub async fn shutdown(self) -> Result<Catalog, ServiceError> {
        info!("Shutting down catalog system...");

        // The actor's receiver returns None once every sender is gone
        drop(self.client);

        match self.handle.await {
            Ok(catalog) => {
                info!("System shutdown complete.");
                Ok(catalog)
            }
            Err(e) => {
                error!("Actor task failed: {:?}", e);
                Err(ServiceError::ActorFailed(e.to_string()))
            }
        }
    }
}
