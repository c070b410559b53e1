//! Activity notifications with read tracking
//!
//! Backs the header badge: new entries arrive unread, the badge shows the
//! unread count, and entries are marked read one at a time or all at once.

use serde::Serialize;
use std::fmt;

/// Notification identifier, assigned in arrival order starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Wrap a raw id
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A single activity entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifier
    pub id: NotificationId,
    /// Short headline
    pub title: String,
    /// Detail line
    pub message: String,
    /// Human-readable age, e.g. `2 hours ago`
    pub time: String,
    /// Whether the entry has been seen
    pub read: bool,
}

/// Newest-last list of notifications
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    entries: Vec<Notification>,
    last_id: u64,
}

impl Notifications {
    /// Create empty list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unread entry
    pub fn push(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        time: impl Into<String>,
    ) -> NotificationId {
        self.last_id += 1;
        let id = NotificationId(self.last_id);
        self.entries.push(Notification {
            id,
            title: title.into(),
            message: message.into(),
            time: time.into(),
            read: false,
        });
        id
    }

    /// Mark one entry read; returns false for unknown ids
    ///
    /// Marking an already-read entry is a no-op that still returns true.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(entry) => {
                entry.read = true;
                true
            }
            None => false,
        }
    }

    /// Mark every entry read; returns how many changed
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for entry in self.entries.iter_mut().filter(|n| !n.read) {
            entry.read = true;
            changed += 1;
        }
        tracing::debug!("Marked {} notifications read", changed);
        changed
    }

    /// Entries not yet read; the badge is hidden at zero
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    /// Entries in arrival order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Notifications {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Notifications {
        let mut list = Notifications::new();
        list.push("PRD Generated", "ready", "2 hours ago");
        list.push("User Stories Created", "5 added", "5 hours ago");
        list.push("Roadmap Updated", "Q2 added", "1 day ago");
        list
    }

    #[test]
    fn ids_follow_arrival_order() {
        let list = three();
        let ids: Vec<u64> = list.entries().iter().map(|n| n.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(list.unread_count(), 3);
    }

    #[test]
    fn mark_one_read() {
        let mut list = three();
        assert!(list.mark_read(NotificationId::new(2)));
        assert!(list.mark_read(NotificationId::new(2)));
        assert_eq!(list.unread_count(), 2);
        assert!(list.entries()[1].read);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut list = three();
        assert!(!list.mark_read(NotificationId::new(9)));
        assert_eq!(list.unread_count(), 3);
    }

    #[test]
    fn mark_all_counts_changes() {
        let mut list = three();
        list.mark_read(NotificationId::new(1));
        assert_eq!(list.mark_all_read(), 2);
        assert_eq!(list.unread_count(), 0);
        assert_eq!(list.mark_all_read(), 0);
    }

    #[test]
    fn empty_list() {
        let mut list = Notifications::new();
        assert!(list.is_empty());
        assert_eq!(list.unread_count(), 0);
        assert_eq!(list.mark_all_read(), 0);
    }

    #[test]
    fn serializes_flat() {
        let mut list = Notifications::new();
        list.push("PRD Generated", "ready", "now");
        let json = serde_json::to_value(&list.entries()[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["read"], false);
        assert_eq!(json["time"], "now");
    }
}
