//! In-memory walker over the pending records shown to a moderator.
//!
//! The queue holds the records fetched when the moderation page opened, oldest
//! first. Navigation is clamped to the list bounds. After an accept or reject
//! succeeds on the server the record is removed locally and the cursor stays on
//! the same position, or moves to the new last record.

use crate::model::draft::RecordDraft;
use crate::model::record::{PendingRecord, RecordFields, float_or_null};

#[derive(Debug, Clone, PartialEq)]
pub enum QueueView<'a> {
    Empty,
    Record {
        position: usize,
        total: usize,
        record: &'a PendingRecord,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModerationQueue {
    records: Vec<PendingRecord>,
    index: usize,
}

impl ModerationQueue {
    pub fn new(mut records: Vec<PendingRecord>) -> Self {
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Self { records, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&PendingRecord> {
        self.records.get(self.index)
    }

    pub fn view(&self) -> QueueView<'_> {
        match self.current() {
            Some(record) => QueueView::Record {
                position: self.index,
                total: self.records.len(),
                record,
            },
            None => QueueView::Empty,
        }
    }

    /// Moves to `index` when it is inside the list; returns whether it moved.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.records.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.index + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.index.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.records.len()
    }

    /// Drops the record with `id` after it was accepted or rejected.
    pub fn remove(&mut self, id: &str) -> Option<PendingRecord> {
        let position = self.records.iter().position(|r| r.id == id)?;
        let removed = self.records.remove(position);
        if position < self.index {
            self.index -= 1;
        }
        if self.index >= self.records.len() {
            self.index = self.records.len().saturating_sub(1);
        }
        Some(removed)
    }

    /// A fresh draft for the record under the cursor.
    pub fn current_draft(&self) -> Option<RecordDraft> {
        self.current().map(RecordDraft::from_pending)
    }
}

/// Builds the fields published for an accepted record.
///
/// The archive-location flag is not carried over. Coordinates prefer the
/// moderator's edit and fall back to what the record held when it was loaded.
pub fn promoted_fields(edited: &RecordDraft, original: &RecordFields) -> RecordFields {
    let mut fields = RecordFields::from_draft(edited);
    fields.latitude = float_or_null(&edited.latitude).or(original.latitude);
    fields.longitude = float_or_null(&edited.longitude).or(original.longitude);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::draft::ArchiveHolding;

    fn pending(id: &str, created_at: &str) -> PendingRecord {
        PendingRecord {
            id: id.to_string(),
            created_at: created_at.to_string(),
            created_by: None,
            is_ukrainian_archive: ArchiveHolding::Ukrainian,
            fields: RecordFields {
                case_title: Some(format!("Справа {}", id)),
                latitude: Some(50.0),
                longitude: Some(30.0),
                ..Default::default()
            },
        }
    }

    fn queue() -> ModerationQueue {
        ModerationQueue::new(vec![
            pending("b", "2024-02-01T00:00:00Z"),
            pending("a", "2024-01-01T00:00:00Z"),
            pending("c", "2024-03-01T00:00:00Z"),
        ])
    }

    #[test]
    fn records_are_ordered_by_creation_time() {
        let q = queue();
        assert_eq!(q.current().map(|r| r.id.as_str()), Some("a"));
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn navigation_is_bounded_without_wraparound() {
        let mut q = queue();
        assert!(!q.previous());
        assert_eq!(q.index(), 0);
        assert!(q.next());
        assert!(q.next());
        assert!(!q.next());
        assert_eq!(q.index(), 2);
        assert!(!q.has_next());
        assert!(!q.go_to(7));
        assert_eq!(q.index(), 2);
    }

    #[test]
    fn removing_keeps_position_or_moves_to_last() {
        let mut q = queue();
        q.go_to(1);
        q.remove("b");
        assert_eq!(q.current().map(|r| r.id.as_str()), Some("c"));

        q.remove("c");
        assert_eq!(q.index(), 0);
        assert_eq!(q.current().map(|r| r.id.as_str()), Some("a"));
    }

    #[test]
    fn removing_the_sole_record_empties_the_queue() {
        let mut q = ModerationQueue::new(vec![pending("a", "2024-01-01T00:00:00Z")]);
        assert!(q.remove("a").is_some());
        assert!(q.is_empty());
        assert_eq!(q.view(), QueueView::Empty);
        assert_eq!(q.current_draft(), None);
    }

    #[test]
    fn removing_unknown_id_changes_nothing() {
        let mut q = queue();
        q.go_to(2);
        assert!(q.remove("zzz").is_none());
        assert_eq!(q.len(), 3);
        assert_eq!(q.index(), 2);
    }

    #[test]
    fn removing_before_cursor_keeps_current_record() {
        let mut q = queue();
        q.go_to(2);
        q.remove("a");
        assert_eq!(q.current().map(|r| r.id.as_str()), Some("c"));
    }

    #[test]
    fn promotion_falls_back_to_original_coordinates() {
        let original = pending("a", "2024-01-01T00:00:00Z").fields;
        let mut edited = RecordDraft::from_fields(&original);
        edited.latitude.clear();
        edited.longitude = "31.5".into();
        edited.pages_count = "12".into();

        let fields = promoted_fields(&edited, &original);
        assert_eq!(fields.latitude, Some(50.0));
        assert_eq!(fields.longitude, Some(31.5));
        assert_eq!(fields.pages_count, Some(12));
    }
}
