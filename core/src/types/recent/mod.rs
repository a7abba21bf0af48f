//! Bounded recency log of launched items.

use crate::types::{ItemId, LaunchItem};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};

pub const MAX_RECENT_LAUNCHES: usize = 10;

/// Snapshot of an item at the time it was launched. Not kept in sync with later edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RecentLaunch {
    #[serde(rename = "AppId")]
    pub item_id: ItemId,
    pub display_name: String,
    pub file_path: String,
}

/// Most recent first, at most [`MAX_RECENT_LAUNCHES`] entries, one per item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecentLaunches(Vec<RecentLaunch>);

impl RecentLaunches {
    pub fn record(&mut self, item: &LaunchItem) {
        self.0.retain(|r| r.item_id != item.id);
        self.0.insert(
            0,
            RecentLaunch {
                item_id: item.id,
                display_name: item.display_name.clone(),
                file_path: item.file_path.clone(),
            },
        );
        self.0.truncate(MAX_RECENT_LAUNCHES);
    }

    /// Drops entries whose item no longer exists. Returns whether anything was removed.
    pub fn purge_stale(&mut self, valid_ids: &HashSet<ItemId>) -> bool {
        let before = self.0.len();
        self.0.retain(|r| valid_ids.contains(&r.item_id));
        self.0.len() != before
    }

    pub fn remove(&mut self, item_id: ItemId) -> bool {
        let before = self.0.len();
        self.0.retain(|r| r.item_id != item_id);
        self.0.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecentLaunch> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[RecentLaunch] {
        &self.0
    }

    /// Rewrites item ids, dropping entries with no mapping.
    pub(crate) fn remap(&mut self, mapping: &HashMap<ItemId, ItemId>) {
        self.0.retain_mut(|r| match mapping.get(&r.item_id) {
            Some(new_id) => {
                r.item_id = *new_id;
                true
            }
            None => false,
        });
    }
}

impl From<Vec<RecentLaunch>> for RecentLaunches {
    fn from(mut entries: Vec<RecentLaunch>) -> Self {
        entries.truncate(MAX_RECENT_LAUNCHES);
        Self(entries)
    }
}

impl<'de> Deserialize<'de> for RecentLaunches {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<RecentLaunch>::deserialize(deserializer).map(Self::from)
    }
}
