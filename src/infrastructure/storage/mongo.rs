//! MongoDB document storage implementation

use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document, doc, oid::ObjectId};
use mongodb::options::{ClientOptions, Credential, ServerAddress};
use mongodb::{Client, Collection};
use tracing::{debug, info};

use crate::domain::DomainError;
use crate::domain::storage::{EntityId, Storage, StorageEntity};

/// Name of the store-assigned primary key field
const ID_FIELD: &str = "_id";
/// Name of the identifier field on serialized entities
const ENTITY_ID_FIELD: &str = "id";

/// Credential used to authenticate against MongoDB
#[derive(Clone, PartialEq, Eq)]
pub struct MongoCredential {
    pub username: String,
    /// Database the user is defined in
    pub source: String,
    pub password: String,
}

impl Debug for MongoCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoCredential")
            .field("username", &self.username)
            .field("source", &self.source)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// MongoDB connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub host: String,
    pub port: u16,
    /// Database holding the entity collections
    pub database: String,
    /// Connection and server selection timeout in seconds
    pub connect_timeout_secs: u64,
    pub credential: Option<MongoCredential>,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            database: "restlet".to_string(),
            connect_timeout_secs: 10,
            credential: None,
        }
    }
}

impl MongoConfig {
    pub const DEFAULT_HOST: &'static str = "localhost";
    pub const DEFAULT_PORT: u16 = 27017;

    pub const HOST_VAR: &'static str = "MONGO_HOST";
    pub const PORT_VAR: &'static str = "MONGO_PORT";
    pub const USERNAME_VAR: &'static str = "MONGO_USERNAME";
    pub const SOURCE_VAR: &'static str = "MONGO_DATABASE";
    pub const PASSWORD_VAR: &'static str = "MONGO_PASSWORD";

    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Default::default()
        }
    }

    /// Reads host, port and credential through `lookup`
    ///
    /// The credential is only set when username, source and password are all
    /// present; otherwise the client connects unauthenticated.
    pub fn from_lookup<F>(database: impl Into<String>, lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(database);

        if let Some(host) = lookup(Self::HOST_VAR).filter(|h| !h.is_empty()) {
            config.host = host;
        }

        if let Some(port) = lookup(Self::PORT_VAR).filter(|p| !p.is_empty()) {
            config.port = port.parse().map_err(|_| {
                DomainError::configuration(format!(
                    "{} must be a valid port number, got '{}'",
                    Self::PORT_VAR,
                    port
                ))
            })?;
        }

        config.credential = match (
            lookup(Self::USERNAME_VAR),
            lookup(Self::SOURCE_VAR),
            lookup(Self::PASSWORD_VAR),
        ) {
            (Some(username), Some(source), Some(password)) => Some(MongoCredential {
                username,
                source,
                password,
            }),
            _ => None,
        };

        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_credential(mut self, credential: MongoCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    fn client_options(&self) -> ClientOptions {
        let timeout = Duration::from_secs(self.connect_timeout_secs);
        let mut options = ClientOptions::default();

        options.hosts = vec![ServerAddress::Tcp {
            host: self.host.clone(),
            port: Some(self.port),
        }];
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        if let Some(ref credential) = self.credential {
            let mut mongo_credential = Credential::default();
            mongo_credential.username = Some(credential.username.clone());
            mongo_credential.source = Some(credential.source.clone());
            mongo_credential.password = Some(credential.password.clone());
            options.credential = Some(mongo_credential);
        }

        options
    }
}

/// MongoDB storage implementation
///
/// One collection per entity type. Documents carry the store's ObjectId in
/// `_id`; the entity's own `id` field is never persisted.
pub struct MongoStorage<E>
where
    E: StorageEntity,
{
    collection: Collection<Document>,
    _phantom: PhantomData<E>,
}

impl<E> Debug for MongoStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoStorage")
            .field("collection", &self.collection.name())
            .finish()
    }
}

impl<E> MongoStorage<E>
where
    E: StorageEntity,
{
    /// Creates storage over an existing client
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
            _phantom: PhantomData,
        }
    }

    /// Connects to MongoDB, failing if the server cannot be reached
    pub async fn connect(config: &MongoConfig, collection: &str) -> Result<Self, DomainError> {
        let client = connect_client(config).await?;
        Ok(Self::new(&client, &config.database, collection))
    }
}

/// Resolves the configured address and opens a verified client
pub async fn connect_client(config: &MongoConfig) -> Result<Client, DomainError> {
    let mut addresses = tokio::net::lookup_host((config.host.as_str(), config.port))
        .await
        .map_err(|e| {
            DomainError::connection_unavailable(format!(
                "Unable to resolve MongoDB host '{}:{}': {}",
                config.host, config.port, e
            ))
        })?;

    if addresses.next().is_none() {
        return Err(DomainError::connection_unavailable(format!(
            "MongoDB host '{}' resolved to no addresses",
            config.host
        )));
    }

    let client = Client::with_options(config.client_options()).map_err(|e| {
        DomainError::connection_unavailable(format!("Unable to create MongoDB client: {}", e))
    })?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| {
            DomainError::connection_unavailable(format!(
                "Unable to reach MongoDB at '{}:{}': {}",
                config.host, config.port, e
            ))
        })?;

    info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        authenticated = config.credential.is_some(),
        "Connected to MongoDB"
    );

    Ok(client)
}

/// Parses an external identifier into the store's ObjectId
pub fn parse_object_id(id: &EntityId) -> Result<ObjectId, DomainError> {
    ObjectId::parse_str(id.as_str()).map_err(|_| {
        DomainError::invalid_id(format!("'{}' is not a valid document identifier", id))
    })
}

/// Serializes an entity into a document without its identifier
pub fn entity_to_document<E>(entity: &E) -> Result<Document, DomainError>
where
    E: StorageEntity,
{
    let mut document = bson::to_document(entity).map_err(|e| {
        DomainError::serialization(format!("Failed to serialize {}: {}", E::COLLECTION, e))
    })?;

    document.remove(ENTITY_ID_FIELD);
    document.remove(ID_FIELD);
    Ok(document)
}

/// Deserializes a stored document, copying `_id` into the entity's `id`
pub fn document_to_entity<E>(mut document: Document) -> Result<E, DomainError>
where
    E: StorageEntity,
{
    let id = match document.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => {
            return Err(DomainError::serialization(format!(
                "Unexpected identifier type in {}: {:?}",
                E::COLLECTION,
                other.element_type()
            )));
        }
        None => {
            return Err(DomainError::serialization(format!(
                "Document in {} has no identifier",
                E::COLLECTION
            )));
        }
    };

    document.remove(ENTITY_ID_FIELD);

    let entity: E = bson::from_document(document).map_err(|e| {
        DomainError::serialization(format!("Failed to deserialize {}: {}", E::COLLECTION, e))
    })?;

    Ok(entity.with_id(EntityId::new(id)))
}

fn driver_error(action: &str, e: mongodb::error::Error) -> DomainError {
    DomainError::storage(format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl<E> Storage<E> for MongoStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let document = entity_to_document(&entity)?;

        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(|e| driver_error("insert document", e))?;

        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            DomainError::serialization(format!(
                "Inserted {} document has a non-ObjectId identifier",
                E::COLLECTION
            ))
        })?;

        debug!(collection = E::COLLECTION, id = %oid, "Inserted document");
        Ok(entity.with_id(EntityId::new(oid.to_hex())))
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| driver_error("query documents", e))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| driver_error("read documents", e))?;

        documents.into_iter().map(document_to_entity).collect()
    }

    async fn get(&self, id: &EntityId) -> Result<Option<E>, DomainError> {
        let oid = parse_object_id(id)?;

        let document = self
            .collection
            .find_one(doc! { ID_FIELD: oid })
            .await
            .map_err(|e| driver_error("find document", e))?;

        document.map(document_to_entity).transpose()
    }

    async fn update(&self, id: &EntityId, entity: E) -> Result<E, DomainError> {
        let oid = parse_object_id(id)?;
        let document = entity_to_document(&entity)?;

        let result = self
            .collection
            .replace_one(doc! { ID_FIELD: oid }, document)
            .upsert(true)
            .await
            .map_err(|e| driver_error("replace document", e))?;

        debug!(
            collection = E::COLLECTION,
            id = %oid,
            matched = result.matched_count,
            upserted = result.upserted_id.is_some(),
            "Replaced document"
        );

        Ok(entity.with_id(id.clone()))
    }

    async fn delete(&self, id: &EntityId) -> Result<bool, DomainError> {
        let oid = parse_object_id(id)?;

        let result = self
            .collection
            .delete_one(doc! { ID_FIELD: oid })
            .await
            .map_err(|e| driver_error("delete document", e))?;

        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count = self
            .collection
            .count_documents(doc! {})
            .await
            .map_err(|e| driver_error("count documents", e))?;

        Ok(count as usize)
    }
}
