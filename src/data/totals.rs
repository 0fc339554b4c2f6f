//! The four tracked entity counts.

use serde::{Deserialize, Serialize};

/// A point-in-time reading of the four pipeline counters.
///
/// A fresh `Totals` is produced by every source query and is never
/// persisted; deltas between consecutive readings feed the chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Number of source files ingested by the pipeline.
    pub files: u64,
    /// Number of detected clones.
    pub clones: u64,
    /// Number of content chunks.
    pub chunks: u64,
    /// Number of clone candidates awaiting expansion.
    pub candidates: u64,
}

impl Totals {
    /// Create a reading from the four counts.
    pub fn new(files: u64, clones: u64, chunks: u64, candidates: u64) -> Self {
        Self {
            files,
            clones,
            chunks,
            candidates,
        }
    }

    /// The count for one entity.
    pub fn get(&self, entity: Entity) -> u64 {
        match entity {
            Entity::Files => self.files,
            Entity::Clones => self.clones,
            Entity::Chunks => self.chunks,
            Entity::Candidates => self.candidates,
        }
    }
}

/// The entity kinds tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Files,
    Clones,
    Chunks,
    Candidates,
}

impl Entity {
    /// All entities, in a stable order.
    pub const ALL: [Entity; 4] = [
        Entity::Files,
        Entity::Clones,
        Entity::Chunks,
        Entity::Candidates,
    ];

    /// Lower-case name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Entity::Files => "files",
            Entity::Clones => "clones",
            Entity::Chunks => "chunks",
            Entity::Candidates => "candidates",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Entity::Files => 0,
            Entity::Clones => 1,
            Entity::Chunks => 2,
            Entity::Candidates => 3,
        }
    }
}
