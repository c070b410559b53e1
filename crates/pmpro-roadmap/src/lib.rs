//! PM-Pro Roadmap
//!
//! Quarterly milestones, each carrying a status, a completion percentage
//! and a list of deliverables, plus the activity notifications shown
//! alongside them.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod milestone;
pub mod notifications;
pub mod roadmap;
pub mod samples;

// Re-exports
pub use error::{Result, RoadmapError};
pub use milestone::{Milestone, MilestoneDraft, MilestoneId, RoadmapItem, Status, PLACEHOLDER_ITEM};
pub use notifications::{Notification, NotificationId, Notifications};
pub use roadmap::{Roadmap, RoadmapSummary};
pub use samples::{sample_drafts, sample_notifications, sample_roadmap};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
