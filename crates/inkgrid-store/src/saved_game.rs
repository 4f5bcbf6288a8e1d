use chrono::{DateTime, Utc};
use inkgrid_engine::SessionSnapshot;
use serde::{Deserialize, Serialize};

pub const SAVE_KEY: &str = "inkgrid_saved_game";

/// Format version of [`SavedGame`]. Saves with any other version are discarded.
pub const SAVE_VERSION: u32 = 1;

/// A resumable game as written to storage.
///
/// The snapshot fields are stored inline next to `version` and `savedAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub version: u32,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
    pub saved_at: DateTime<Utc>,
}

impl SavedGame {
    #[must_use]
    pub fn new(snapshot: SessionSnapshot, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: SAVE_VERSION,
            snapshot,
            saved_at,
        }
    }

    /// Whether this save may be resumed: current version and not finished.
    #[must_use]
    pub fn is_resumable(&self) -> bool {
        self.version == SAVE_VERSION && !self.snapshot.status.is_game_over()
    }
}
