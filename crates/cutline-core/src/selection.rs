//! Clip selection.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::timeline::Timeline;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    clip_ids: BTreeSet<Uuid>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain click: the clicked clip becomes the only selected clip.
    pub fn select(&mut self, clip_id: Uuid) {
        self.clip_ids.clear();
        self.clip_ids.insert(clip_id);
    }

    /// Shift-click: add to the selection.
    pub fn add(&mut self, clip_id: Uuid) {
        self.clip_ids.insert(clip_id);
    }

    pub fn click(&mut self, clip_id: Uuid, shift: bool) {
        if shift {
            self.add(clip_id);
        } else {
            self.select(clip_id);
        }
    }

    pub fn remove(&mut self, clip_id: Uuid) {
        self.clip_ids.remove(&clip_id);
    }

    pub fn clear(&mut self) {
        self.clip_ids.clear();
    }

    pub fn contains(&self, clip_id: Uuid) -> bool {
        self.clip_ids.contains(&clip_id)
    }

    pub fn is_empty(&self) -> bool {
        self.clip_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clip_ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Uuid> {
        self.clip_ids.iter()
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.clip_ids.iter().copied().collect()
    }

    /// Drop ids whose clip is no longer on the timeline.
    pub fn prune(&mut self, timeline: &Timeline) {
        self.clip_ids.retain(|id| timeline.find_clip(*id).is_some());
    }

    /// Distinct media ids behind the selected clips.
    pub fn media_ids(&self, timeline: &Timeline) -> BTreeSet<Uuid> {
        self.clip_ids
            .iter()
            .filter_map(|id| timeline.find_clip(*id))
            .map(|(_, clip)| clip.media_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_replaces_shift_click_adds() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut sel = Selection::new();
        sel.click(a, false);
        sel.click(b, true);
        assert_eq!(sel.len(), 2);
        sel.click(c, false);
        assert_eq!(sel.ids(), vec![c]);
    }

    #[test]
    fn test_prune_drops_stale_ids() {
        let mut sel = Selection::new();
        sel.select(Uuid::new_v4());
        sel.prune(&Timeline::new());
        assert!(sel.is_empty());
    }
}
