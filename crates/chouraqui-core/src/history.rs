use crate::model::VerseRef;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Back/forward history over visited verse positions.
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: VecDeque<VerseRef>,
    /// Index of the position being shown.
    cursor: Option<usize>,
    max_size: usize,
}

impl NavigationHistory {
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            entries: VecDeque::with_capacity(max_size),
            cursor: None,
            max_size,
        }
    }

    /// Record a fresh navigation. Drops any forward entries.
    pub fn visit(&mut self, position: VerseRef) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        if self.entries.back() == Some(&position) {
            self.cursor = Some(self.entries.len() - 1);
            return;
        }
        self.entries.push_back(position);
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    pub fn back(&mut self) -> Option<VerseRef> {
        let cursor = self.cursor?.checked_sub(1)?;
        self.cursor = Some(cursor);
        self.entries.get(cursor).copied()
    }

    pub fn forward(&mut self) -> Option<VerseRef> {
        let cursor = self.cursor? + 1;
        let position = self.entries.get(cursor).copied()?;
        self.cursor = Some(cursor);
        Some(position)
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    pub fn current(&self) -> Option<VerseRef> {
        self.entries.get(self.cursor?).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(chapter: u32) -> VerseRef {
        VerseRef::new(10, chapter, 1)
    }

    #[test]
    fn back_and_forward_walk_the_visits() {
        let mut history = NavigationHistory::new(10);
        history.visit(at(1));
        history.visit(at(2));
        history.visit(at(3));

        assert_eq!(history.back(), Some(at(2)));
        assert_eq!(history.back(), Some(at(1)));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some(at(2)));
        assert_eq!(history.forward(), Some(at(3)));
        assert_eq!(history.forward(), None);
        assert_eq!(history.current(), Some(at(3)));
    }

    #[test]
    fn visiting_after_going_back_drops_the_forward_branch() {
        let mut history = NavigationHistory::new(10);
        history.visit(at(1));
        history.visit(at(2));
        history.visit(at(3));
        history.back();
        history.visit(at(7));

        assert!(!history.can_go_forward());
        assert_eq!(history.back(), Some(at(2)));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn repeated_visit_is_recorded_once() {
        let mut history = NavigationHistory::new(10);
        history.visit(at(4));
        history.visit(at(4));
        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
    }

    #[test]
    fn oldest_entries_fall_off() {
        let mut history = NavigationHistory::new(3);
        for chapter in 1..=5 {
            history.visit(at(chapter));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.back(), Some(at(4)));
        assert_eq!(history.back(), Some(at(3)));
        assert_eq!(history.back(), None);
    }
}
