//! Seed roadmap shown on first launch

use crate::milestone::{MilestoneDraft, RoadmapItem, Status};
use crate::notifications::Notifications;
use crate::roadmap::Roadmap;

/// Drafts for the seeded roadmap
#[must_use]
pub fn sample_drafts() -> Vec<MilestoneDraft> {
    vec![
        MilestoneDraft {
            quarter: "Q1 2026".to_string(),
            title: "Platform Foundation".to_string(),
            status: Status::InProgress,
            progress: 65,
            items: vec![
                RoadmapItem::new("User Authentication System", Status::Completed),
                RoadmapItem::new("Core Dashboard", Status::InProgress),
                RoadmapItem::planned("Analytics Integration"),
            ],
        },
        MilestoneDraft {
            quarter: "Q2 2026".to_string(),
            title: "AI Features Launch".to_string(),
            status: Status::Planned,
            progress: 0,
            items: vec![
                RoadmapItem::planned("AI-Powered Search"),
                RoadmapItem::planned("Smart Recommendations"),
                RoadmapItem::planned("Automated Insights"),
            ],
        },
    ]
}

/// Roadmap seeded with [`sample_drafts`]
#[must_use]
pub fn sample_roadmap() -> Roadmap {
    let mut roadmap = Roadmap::new();
    for draft in sample_drafts() {
        // Seed drafts are always valid
        if let Err(e) = roadmap.add(draft) {
            tracing::warn!("Skipping seed milestone: {}", e);
        }
    }
    roadmap
}

/// Seed activity feed: two unread entries and one already read
#[must_use]
pub fn sample_notifications() -> Notifications {
    let mut list = Notifications::new();
    list.push("PRD Generated", "Mobile App Redesign PRD is ready", "2 hours ago");
    list.push("User Stories Created", "5 new user stories added", "5 hours ago");
    let seen = list.push("Roadmap Updated", "Q2 2026 milestones added", "1 day ago");
    list.mark_read(seen);
    list
}
