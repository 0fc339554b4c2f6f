//! Counter sources - where the dashboard reads its four totals from.
//!
//! This module provides a trait-based abstraction over backends exposing
//! the current counts of the tracked entities, with implementations for
//! the clone-detector MongoDB store and for a local JSON file.

mod file;
mod mongo;

pub use file::FileSource;
pub use mongo::{MongoSource, MongoSourceBuilder};

use std::fmt::Debug;

use async_trait::async_trait;

use crate::data::Totals;
use crate::error::SourceError;

/// A backend exposing the current counts of the four tracked entities.
///
/// The four values need not be read atomically with respect to each
/// other; each query simply reports whatever the backend holds at that
/// moment.
#[async_trait]
pub trait CounterSource: Send + Sync + Debug {
    /// Fetch the current totals.
    async fn totals(&self) -> Result<Totals, SourceError>;

    /// Human-readable description of the source.
    ///
    /// Used in logs and the dashboard footer.
    fn description(&self) -> &str;
}
