//! Plain-text rendering of command results

use pmpro_assist::{CompetitiveAnalysis, StoryBoard};
use pmpro_rice::FeatureRecord;
use pmpro_roadmap::{Notifications, Roadmap};
use std::fmt::Write as _;

const NAME_WIDTH: usize = 28;

/// Ranked feature table
#[must_use]
pub fn ranking_table(records: &[FeatureRecord]) -> String {
    if records.is_empty() {
        return "No features in backlog".to_string();
    }

    let mut out = format!(
        "{:<4} {:<NAME_WIDTH$} {:>6} {:>6} {:>6} {:>6} {:>8}\n",
        "#", "Feature", "Reach", "Impact", "Conf", "Effort", "RICE"
    );
    for (rank, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<NAME_WIDTH$} {:>6} {:>6} {:>6} {:>6} {:>8.2}",
            rank + 1,
            record.name(),
            record.reach(),
            record.impact(),
            record.confidence(),
            record.effort(),
            record.rice_score()
        );
    }
    out.pop();
    out
}

/// User stories with acceptance criteria
#[must_use]
pub fn story_list(board: &StoryBoard) -> String {
    let mut out = String::new();
    for (i, story) in board.stories().iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} [{:?}, {} pts, {:?}]",
            i + 1,
            story.title,
            story.priority,
            story.story_points,
            story.status
        );
        let _ = writeln!(out, "   {}", story.story);
        for criterion in &story.acceptance_criteria {
            let _ = writeln!(out, "   - {criterion}");
        }
    }
    let _ = write!(
        out,
        "{} stories, {} points",
        board.stories().len(),
        board.total_points()
    );
    out
}

/// Competitor summary and recommendations
#[must_use]
pub fn analysis_report(analysis: &CompetitiveAnalysis) -> String {
    let mut out = format!("Competitive analysis for {}\n", analysis.product);
    for competitor in &analysis.competitors {
        let share = competitor
            .market_share
            .map_or_else(|| "n/a".to_string(), |s| format!("{s}%"));
        let pricing = competitor.pricing.as_deref().unwrap_or("n/a");
        let _ = writeln!(
            out,
            "\n{} (share {share}, pricing {pricing})",
            competitor.name
        );
        let r = &competitor.ratings;
        let _ = writeln!(
            out,
            "  features {} | ux {} | performance {} | support {} | integration {}",
            r.features, r.ux, r.performance, r.support, r.integration
        );
        let _ = writeln!(out, "  + {}", competitor.strengths.join(", "));
        let _ = writeln!(out, "  - {}", competitor.weaknesses.join(", "));
    }
    out.push_str("\nRecommendations:");
    for rec in &analysis.recommendations {
        let _ = write!(out, "\n  * {rec}");
    }
    out
}

/// Milestone timeline with summary header
#[must_use]
pub fn roadmap_timeline(roadmap: &Roadmap) -> String {
    let summary = roadmap.summary();
    let mut out = format!(
        "{} milestones, {} items, {} in progress, {}% average progress\n",
        summary.milestones, summary.items, summary.in_progress, summary.average_progress
    );
    for milestone in roadmap {
        let _ = writeln!(
            out,
            "\n{} - {} [{}, {}%]",
            milestone.quarter, milestone.title, milestone.status, milestone.progress
        );
        for item in &milestone.items {
            let _ = writeln!(out, "  [{}] {}", item.status, item.name);
        }
    }
    out.pop();
    out
}

/// Activity feed with the unread badge count
#[must_use]
pub fn notification_list(feed: &Notifications) -> String {
    if feed.is_empty() {
        return "No notifications".to_string();
    }

    let mut out = format!("Notifications ({} unread)", feed.unread_count());
    for entry in feed {
        let marker = if entry.read { ' ' } else { '*' };
        let _ = write!(
            out,
            "\n{marker} {:>3}  {} - {} ({})",
            entry.id, entry.title, entry.message, entry.time
        );
    }
    out
}
