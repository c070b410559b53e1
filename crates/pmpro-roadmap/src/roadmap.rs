//! Milestone collection

use crate::error::{Result, RoadmapError};
use crate::milestone::{Milestone, MilestoneDraft, MilestoneId, RoadmapItem, Status, PLACEHOLDER_ITEM};
use serde::Serialize;

/// Aggregate numbers shown above the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapSummary {
    /// Number of milestones
    pub milestones: usize,
    /// Items across all milestones
    pub items: usize,
    /// Milestones currently in progress
    pub in_progress: usize,
    /// Mean progress, rounded; 0 when empty
    pub average_progress: u8,
}

/// Ordered list of milestones
#[derive(Debug, Clone, Default)]
pub struct Roadmap {
    milestones: Vec<Milestone>,
}

impl Roadmap {
    /// Create empty roadmap
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn validate(draft: &MilestoneDraft) -> Result<()> {
        if draft.quarter.trim().is_empty() {
            return Err(RoadmapError::MissingQuarter);
        }
        if draft.title.trim().is_empty() {
            return Err(RoadmapError::MissingTitle);
        }
        if draft.progress > 100 {
            return Err(RoadmapError::InvalidProgress(draft.progress));
        }
        Ok(())
    }

    fn items_or_placeholder(items: Vec<RoadmapItem>) -> Vec<RoadmapItem> {
        if items.is_empty() {
            vec![RoadmapItem::planned(PLACEHOLDER_ITEM)]
        } else {
            items
        }
    }

    /// Append a milestone built from `draft`
    ///
    /// # Errors
    /// Blank quarter or title, or progress above 100.
    pub fn add(&mut self, draft: MilestoneDraft) -> Result<MilestoneId> {
        Self::validate(&draft)?;
        let id = MilestoneId::new();
        tracing::debug!("Adding milestone {} ({})", draft.title, draft.quarter);
        self.milestones.push(Milestone {
            id,
            quarter: draft.quarter,
            title: draft.title,
            status: draft.status,
            progress: draft.progress,
            items: Self::items_or_placeholder(draft.items),
        });
        Ok(id)
    }

    /// Replace a milestone's fields in place, keeping its id and position
    ///
    /// # Errors
    /// Validation failures, or `RoadmapError::NotFound`.
    pub fn edit(&mut self, id: MilestoneId, draft: MilestoneDraft) -> Result<&Milestone> {
        Self::validate(&draft)?;
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(RoadmapError::NotFound(id))?;

        milestone.quarter = draft.quarter;
        milestone.title = draft.title;
        milestone.status = draft.status;
        milestone.progress = draft.progress;
        milestone.items = Self::items_or_placeholder(draft.items);
        Ok(milestone)
    }

    /// Remove a milestone; returns whether one was removed
    pub fn delete(&mut self, id: MilestoneId) -> bool {
        let before = self.milestones.len();
        self.milestones.retain(|m| m.id != id);
        self.milestones.len() != before
    }

    /// Milestone by id
    #[must_use]
    pub fn get(&self, id: MilestoneId) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    /// Milestones in insertion order
    #[inline]
    #[must_use]
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Number of milestones
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    /// Whether there are no milestones
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    /// Aggregate stats
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn summary(&self) -> RoadmapSummary {
        let milestones = self.milestones.len();
        let items = self.milestones.iter().map(|m| m.items.len()).sum();
        let in_progress = self
            .milestones
            .iter()
            .filter(|m| m.status == Status::InProgress)
            .count();
        let average_progress = if milestones == 0 {
            0
        } else {
            let total: u32 = self.milestones.iter().map(|m| u32::from(m.progress)).sum();
            // At most 100, so the cast is lossless
            (f64::from(total) / milestones as f64).round() as u8
        };

        RoadmapSummary {
            milestones,
            items,
            in_progress,
            average_progress,
        }
    }
}

impl<'a> IntoIterator for &'a Roadmap {
    type Item = &'a Milestone;
    type IntoIter = std::slice::Iter<'a, Milestone>;

    fn into_iter(self) -> Self::IntoIter {
        self.milestones.iter()
    }
}
