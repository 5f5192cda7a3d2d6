use super::params::ParameterState;

/// One recorded snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub sequence_index: usize,
    pub state: ParameterState,
    /// Set when undo/redo lands on this entry. Diagnostic only.
    pub was_revisited: bool,
}

/// Linear undo/redo log of parameter snapshots.
///
/// Never empty: index 0 always holds the seed state. The cursor points at the
/// active entry; entries after it are the redo future.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(ParameterState::default())
    }
}

impl History {
    pub fn new(seed: ParameterState) -> Self {
        Self {
            entries: vec![HistoryEntry {
                sequence_index: 0,
                state: seed,
                was_revisited: false,
            }],
            cursor: 0,
        }
    }

    /// Record `state` as the new active entry, dropping any redo future first.
    pub fn commit(&mut self, state: ParameterState) {
        self.entries.truncate(self.cursor + 1);
        let sequence_index = self.entries.len();
        self.entries.push(HistoryEntry {
            sequence_index,
            state,
            was_revisited: false,
        });
        self.cursor = sequence_index;
    }

    /// Step back one entry. `None` at the seed entry.
    pub fn undo(&mut self) -> Option<ParameterState> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.land_on_cursor())
    }

    /// Step forward one entry. `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<ParameterState> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.land_on_cursor())
    }

    fn land_on_cursor(&mut self) -> ParameterState {
        let entry = &mut self.entries[self.cursor];
        entry.was_revisited = true;
        entry.state
    }

    pub fn current(&self) -> &ParameterState {
        &self.entries[self.cursor].state
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub const fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::FilterField;

    fn brightness(value: f32) -> ParameterState {
        ParameterState::default().with(FilterField::Brightness, value)
    }

    #[test]
    fn starts_with_seed_entry() {
        let history = History::default();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(*history.current(), ParameterState::default());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn current_tracks_latest_commit() {
        let mut history = History::default();
        for value in [110.0, 120.0, 130.0] {
            history.commit(brightness(value));
            assert_eq!(*history.current(), brightness(value));
        }
        let indices: Vec<usize> = history.entries().iter().map(|e| e.sequence_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn undo_at_seed_is_a_noop() {
        let mut history = History::default();
        assert_eq!(history.undo(), None);
        assert_eq!(history.undo(), None);
        assert_eq!(history.cursor(), 0);
        assert!(!history.entries()[0].was_revisited);
    }

    #[test]
    fn redo_at_end_is_a_noop() {
        let mut history = History::default();
        history.commit(brightness(150.0));
        assert_eq!(history.redo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn undo_then_redo_restores_state() {
        let mut history = History::default();
        history.commit(brightness(150.0));
        history.commit(brightness(175.0));
        let before = *history.current();
        history.undo();
        assert_eq!(history.redo(), Some(before));
        assert_eq!(*history.current(), before);
    }

    #[test]
    fn commit_after_undo_drops_redo_future() {
        let mut history = History::default();
        history.commit(brightness(150.0));
        history.commit(brightness(175.0));
        history.undo();
        history.undo();
        history.commit(brightness(90.0));
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[1].sequence_index, 1);
        assert_eq!(history.redo(), None);
        assert_eq!(*history.current(), brightness(90.0));
    }

    #[test]
    fn navigation_marks_landed_entries() {
        let mut history = History::default();
        history.commit(brightness(150.0));
        history.commit(brightness(175.0));
        history.undo();
        let flags: Vec<bool> = history.entries().iter().map(|e| e.was_revisited).collect();
        assert_eq!(flags, vec![false, true, false]);
        history.redo();
        assert!(history.entries()[2].was_revisited);
    }

    #[test]
    fn load_edit_undo_redo_scenario() {
        let mut history = History::default();
        let bright = brightness(150.0);
        history.commit(bright);
        let mut rotated = bright;
        rotated.set_rotation(90);
        history.commit(rotated);

        let state = history.undo().expect("undo to brightness edit");
        assert_eq!(state.rotation(), 0);
        assert!((state.get(FilterField::Brightness) - 150.0).abs() < f32::EPSILON);

        let state = history.undo().expect("undo to seed");
        assert!((state.get(FilterField::Brightness) - 100.0).abs() < f32::EPSILON);

        let state = history.redo().expect("redo brightness edit");
        assert!((state.get(FilterField::Brightness) - 150.0).abs() < f32::EPSILON);
    }
}
