//! # clonewatch
//!
//! A web dashboard for monitoring clone-detection pipeline activity.
//!
//! The dashboard samples four aggregate counters (files, clones, chunks,
//! candidates) from the pipeline's backing store once per minute, records
//! the minute-over-minute deltas in bounded in-memory series, and serves
//! a single page with a four-panel time-series chart and the latest
//! totals.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         clonewatch                             │
//! │  ┌─────────┐     ┌──────────┐     ┌─────────┐    ┌─────────┐  │
//! │  │ source  │────▶│ data     │────▶│ chart   │───▶│ server  │  │
//! │  │ (totals)│     │(sampling)│     │(render) │    │ (page)  │  │
//! │  └─────────┘     └──────────┘     └─────────┘    └─────────┘  │
//! │       ▲                ▲                                       │
//! │  MongoSource |    interval task + request-driven ticks         │
//! │  FileSource       (serialized on one gate)                     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Counter source abstraction ([`CounterSource`] trait)
//!   with implementations for the clone-detector MongoDB store and for a
//!   local JSON file
//! - **[`data`]**: The four totals, the delta-series store, and the
//!   sampling tick with its background loop
//! - **[`chart`]**: Renders the series as a 2x2 grid of line charts,
//!   encoded for inline embedding
//! - **[`page`]** / **[`server`]**: HTML assembly and the HTTP surface
//! - **[`config`]**: Layered runtime settings
//!
//! ## Usage
//!
//! ```bash
//! # Sample the clone-detector MongoDB store
//! clonewatch --mongo-uri mongodb://localhost:27017
//!
//! # Demo against a local JSON totals file
//! clonewatch --file totals.json --interval 5
//! ```
//!
//! ## As a library
//!
//! ```
//! use clonewatch::{Entity, SeriesStore};
//!
//! let store = SeriesStore::new();
//! store.append(Entity::Files, 5);
//! assert_eq!(store.read_all(Entity::Files), vec![5]);
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod page;
pub mod server;
pub mod source;

// Re-export main types for convenience
pub use config::Settings;
pub use data::{Entity, Sampler, SamplerHandle, SeriesSnapshot, SeriesStore, Totals};
pub use error::{RenderError, SourceError};
pub use source::{CounterSource, FileSource, MongoSource};
