//! MongoDB-backed counter source.
//!
//! Counts the documents in the four clone-detector collections on every
//! query. The client connects lazily, so building the source succeeds
//! even while the store is still coming up; the first tick surfaces any
//! connectivity problem instead.
//!
//! ## Example
//!
//! ```rust,no_run
//! use clonewatch::source::MongoSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = MongoSource::builder()
//!         .uri("mongodb://dbstorage:27017")
//!         .database("cloneDetector")
//!         .connect()
//!         .await?;
//!
//!     println!("reading from {}", clonewatch::source::CounterSource::description(&source));
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use super::CounterSource;
use crate::data::Totals;
use crate::error::SourceError;

/// Collections holding the tracked entities.
const FILES: &str = "files";
const CLONES: &str = "clones";
const CHUNKS: &str = "chunks";
const CANDIDATES: &str = "candidates";

/// Counter source backed by the clone-detector MongoDB store.
#[derive(Debug, Clone)]
pub struct MongoSource {
    database: Database,
    description: String,
}

impl MongoSource {
    /// Create a new builder for configuring the source.
    pub fn builder() -> MongoSourceBuilder {
        MongoSourceBuilder::default()
    }

    async fn count(&self, collection: &str) -> Result<u64, SourceError> {
        let count = self
            .database
            .collection::<Document>(collection)
            .count_documents(doc! {})
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CounterSource for MongoSource {
    async fn totals(&self) -> Result<Totals, SourceError> {
        let (files, clones, chunks, candidates) = tokio::try_join!(
            self.count(FILES),
            self.count(CLONES),
            self.count(CHUNKS),
            self.count(CANDIDATES),
        )?;

        Ok(Totals {
            files,
            clones,
            chunks,
            candidates,
        })
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`MongoSource`].
#[derive(Debug, Default)]
pub struct MongoSourceBuilder {
    uri: Option<String>,
    database: Option<String>,
    timeout: Option<Duration>,
}

impl MongoSourceBuilder {
    /// Set the connection string (e.g. "mongodb://dbstorage:27017").
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the database holding the pipeline collections
    /// (default: "cloneDetector").
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the connect and server-selection timeout (default: 5 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the source.
    ///
    /// Parses the connection string and prepares a lazily-connecting
    /// client; no round trip to the store happens here.
    pub async fn connect(self) -> Result<MongoSource, SourceError> {
        let uri = self
            .uri
            .unwrap_or_else(|| "mongodb://dbstorage:27017".to_string());
        let database = self
            .database
            .unwrap_or_else(|| "cloneDetector".to_string());
        let timeout = self.timeout.unwrap_or(Duration::from_secs(5));

        let mut options = ClientOptions::parse(&uri).await?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        let description = format!("mongodb: {}/{}", uri, database);

        Ok(MongoSource {
            database: client.database(&database),
            description,
        })
    }
}
