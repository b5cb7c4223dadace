pub mod queries;

use std::collections::HashMap;

use mongodb::{
    Client, Collection, Database,
    bson::{Document, doc},
};

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::uri::build_uri;

/// Index-metadata collection reported by older servers; never cached.
const RESERVED_COLLECTION: &str = "system.indexes";

/// Owns the client connection and the name-to-collection map.
///
/// State transitions (`connect`, `close`) take `&mut self`, so exclusive use
/// is enforced by the borrow checker rather than a lock. Wrap the registry
/// yourself if it has to be shared across tasks.
pub struct ConnectionRegistry {
    config: RegistryConfig,
    client: Option<Client>,
    database: Option<Database>,
    collections: HashMap<String, Collection<Document>>,
}

impl ConnectionRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            client: None,
            database: None,
            collections: HashMap::new(),
        }
    }

    /// Opens the client, pings it, and fills the collection map.
    ///
    /// Re-entrant: a second call replaces the held client without closing it.
    /// On failure the error is logged at debug level and returned; whatever
    /// partial state was reached stays in place.
    pub async fn connect(&mut self) -> Result<(), RegistryError> {
        match self.try_connect().await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::debug!("[MongoDB] was not able to create connection properly: {e}");
                Err(RegistryError::Connect(e))
            }
        }
    }

    async fn try_connect(&mut self) -> mongodb::error::Result<()> {
        let uri = build_uri(&self.config);

        let client = Client::with_uri_str(&uri).await?;
        let database = client.database(&self.config.database);
        self.client = Some(client.clone());
        self.database = Some(database.clone());

        // The driver connects lazily; ping so a bad address fails here
        // instead of on the first query.
        client
            .database("admin")
            .run_command(doc! {"ping": 1})
            .await?;

        for name in database.list_collection_names().await? {
            if name.eq_ignore_ascii_case(RESERVED_COLLECTION) {
                continue;
            }
            self.collections
                .insert(name.clone(), database.collection::<Document>(&name));
            tracing::debug!("Collection: {name} has been added.");
        }

        tracing::info!("Successfully connected to MongoDB");
        Ok(())
    }

    /// Clears the map, then shuts the client down.
    ///
    /// The map is cleared even when no client is held; a second close finds
    /// no client and reports a close failure, it does not panic.
    pub async fn close(&mut self) -> Result<(), RegistryError> {
        self.collections.clear();
        self.database = None;

        match self.client.take() {
            Some(client) => {
                client.shutdown().await;
                Ok(())
            }
            None => {
                tracing::debug!("[MongoDB] was not able to close connection properly.");
                Err(RegistryError::Close)
            }
        }
    }

    /// Cached handle for `name`, or `None` if the database never reported it
    /// (or the registry is closed).
    pub fn get_collection(&self, name: &str) -> Option<Collection<Document>> {
        self.collections.get(name).cloned()
    }

    /// Typed view of a cached collection, for callers with serde models.
    pub fn typed_collection<T>(&self, name: &str) -> Option<Collection<T>>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
    {
        self.collections.get(name).map(|c| c.clone_with_type())
    }

    /// Names currently held in the map, sorted.
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.collections.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    /// Flag consulted by the next `connect`; no effect on an open connection.
    pub fn set_production(&mut self, production: bool) {
        self.config.production = production;
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}
