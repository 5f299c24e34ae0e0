//! Audio/video link groups keyed by source media.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tracks which media ids have had their picture and sound detached.
///
/// Every media id is linked unless it appears in the unlinked set, so clips
/// placed from a fresh asset move together without any registration step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkGroups {
    unlinked: HashSet<Uuid>,
}

impl LinkGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_linked(&self, media_id: Uuid) -> bool {
        !self.unlinked.contains(&media_id)
    }

    /// Flip the link state for a media id. Returns the new state.
    pub fn toggle(&mut self, media_id: Uuid) -> bool {
        if !self.unlinked.remove(&media_id) {
            self.unlinked.insert(media_id);
            false
        } else {
            true
        }
    }

    pub fn set_linked(&mut self, media_id: Uuid, linked: bool) {
        if linked {
            self.unlinked.remove(&media_id);
        } else {
            self.unlinked.insert(media_id);
        }
    }

    pub fn unlinked(&self) -> impl Iterator<Item = &Uuid> {
        self.unlinked.iter()
    }
}
