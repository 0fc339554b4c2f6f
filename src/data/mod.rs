//! Data model and sampling.
//!
//! ## Submodules
//!
//! - [`totals`]: The four tracked counts ([`Totals`]) and their identities ([`Entity`])
//! - [`series`]: Process-wide delta-series storage ([`SeriesStore`])
//! - [`sampler`]: The sampling tick and its background loop ([`Sampler`])
//!
//! ## Data flow
//!
//! ```text
//! CounterSource::totals()
//!        │
//!        ▼
//! Sampler::sample() ──▶ abs delta vs. last observed
//!        │                      │ (non-zero only)
//!        ▼                      ▼
//! SeriesStore baseline    SeriesStore series ──▶ SeriesSnapshot (chart)
//! ```

pub mod sampler;
pub mod series;
pub mod totals;

pub use sampler::{Sampler, SamplerHandle};
pub use series::{SeriesSnapshot, SeriesStore};
pub use totals::{Entity, Totals};
