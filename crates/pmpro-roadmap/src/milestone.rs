//! Milestone types

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Name given to the placeholder item of an empty milestone
pub const PLACEHOLDER_ITEM: &str = "Feature 1";

/// Unique milestone identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MilestoneId(pub Ulid);

impl MilestoneId {
    /// Generate new milestone ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for MilestoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Delivery status shared by milestones and their items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    /// Not started
    #[default]
    Planned,
    /// Under way
    #[serde(rename = "In Progress")]
    InProgress,
    /// Delivered
    Completed,
}

impl Status {
    /// Display label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Status::Planned => "Planned",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A deliverable inside a milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapItem {
    /// Item name
    pub name: String,
    /// Item status
    pub status: Status,
}

impl RoadmapItem {
    /// Create item
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }

    /// Create planned item
    #[inline]
    #[must_use]
    pub fn planned(name: impl Into<String>) -> Self {
        Self::new(name, Status::Planned)
    }
}

/// Editable milestone form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MilestoneDraft {
    /// Quarter label, e.g. `Q1 2026`
    pub quarter: String,
    /// Title
    pub title: String,
    /// Status
    pub status: Status,
    /// Percent complete (0-100)
    pub progress: u8,
    /// Items
    pub items: Vec<RoadmapItem>,
}

impl MilestoneDraft {
    /// Create draft with quarter and title
    #[inline]
    #[must_use]
    pub fn new(quarter: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            quarter: quarter.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// With progress
    #[inline]
    #[must_use]
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    /// Append a planned item; blank names are ignored
    ///
    /// Returns whether an item was added.
    pub fn add_item(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        self.items.push(RoadmapItem::planned(name));
        true
    }

    /// Remove the item at `index`, if any
    pub fn remove_item(&mut self, index: usize) -> Option<RoadmapItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}

/// A stored milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone id
    pub id: MilestoneId,
    /// Quarter label
    pub quarter: String,
    /// Title
    pub title: String,
    /// Status
    pub status: Status,
    /// Percent complete (0-100)
    pub progress: u8,
    /// Items
    pub items: Vec<RoadmapItem>,
}

impl Milestone {
    /// Editable copy of this milestone
    #[must_use]
    pub fn to_draft(&self) -> MilestoneDraft {
        MilestoneDraft {
            quarter: self.quarter.clone(),
            title: self.title.clone(),
            status: self.status,
            progress: self.progress,
            items: self.items.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_with_label() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(Status::default(), Status::Planned);
    }

    #[test]
    fn draft_item_editing() {
        let mut draft = MilestoneDraft::new("Q3 2026", "Scale");
        assert!(draft.add_item("Sharding"));
        assert!(!draft.add_item("   "));
        assert!(draft.add_item("Caching"));
        assert_eq!(draft.items.len(), 2);

        let removed = draft.remove_item(0).unwrap();
        assert_eq!(removed.name, "Sharding");
        assert!(draft.remove_item(5).is_none());
        assert_eq!(draft.items, vec![RoadmapItem::planned("Caching")]);
    }
}
