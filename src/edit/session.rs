use super::history::History;
use super::params::{FilterField, ParameterState};
use tracing::debug;

/// Editing context for one loaded image.
///
/// Holds the live parameters, their history, and which filter the slider is
/// bound to. Buttons, sliders and keyboard shortcuts all go through these
/// methods.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    params: ParameterState,
    history: History,
    active_filter: FilterField,
}

impl EditorSession {
    /// Start over for a freshly decoded image.
    pub fn begin_image(&mut self) {
        *self = Self::default();
        debug!("session reset for new image");
    }

    pub const fn params(&self) -> &ParameterState {
        &self.params
    }

    pub const fn history(&self) -> &History {
        &self.history
    }

    pub const fn active_filter(&self) -> FilterField {
        self.active_filter
    }

    pub const fn select_filter(&mut self, field: FilterField) {
        self.active_filter = field;
    }

    pub const fn active_value(&self) -> f32 {
        self.params.get(self.active_filter)
    }

    /// Slider text for the active field, e.g. `150%` or `4px`.
    pub fn slider_label(&self) -> String {
        self.active_filter.format_value(self.active_value())
    }

    /// Update the active field without recording it, for in-progress drags.
    pub fn preview_filter(&mut self, value: f32) {
        self.params.set(self.active_filter, value);
    }

    /// Record the live parameters unless they already match the active entry.
    pub fn commit(&mut self) -> bool {
        if self.params == *self.history.current() {
            return false;
        }
        self.history.commit(self.params);
        debug!(
            entry = self.history.cursor(),
            total = self.history.len(),
            "committed edit"
        );
        true
    }

    /// Set any filter field and record it.
    pub fn set_filter(&mut self, field: FilterField, value: f32) -> bool {
        self.params.set(field, value);
        self.commit()
    }

    pub fn rotate_left(&mut self) -> bool {
        self.params.rotate_left();
        self.commit()
    }

    pub fn rotate_right(&mut self) -> bool {
        self.params.rotate_right();
        self.commit()
    }

    pub fn flip_horizontal(&mut self) -> bool {
        self.params.toggle_flip_horizontal();
        self.commit()
    }

    pub fn flip_vertical(&mut self) -> bool {
        self.params.toggle_flip_vertical();
        self.commit()
    }

    /// Put every knob back to its default. Recorded, so it can be undone.
    pub fn reset(&mut self) -> bool {
        self.params.reset_to_defaults();
        self.commit()
    }

    pub fn undo(&mut self) -> bool {
        // Drop an uncommitted drag before stepping back.
        self.params = *self.history.current();
        self.history.undo().is_some_and(|state| {
            self.params = state;
            debug!(entry = self.history.cursor(), "undo");
            true
        })
    }

    pub fn redo(&mut self) -> bool {
        self.params = *self.history.current();
        self.history.redo().is_some_and(|state| {
            self.params = state;
            debug!(entry = self.history.cursor(), "redo");
            true
        })
    }

    pub const fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub const fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(session: &EditorSession, field: FilterField) -> f32 {
        session.params().get(field)
    }

    #[test]
    fn preview_does_not_record_until_commit() {
        let mut session = EditorSession::default();
        session.select_filter(FilterField::Saturation);
        session.preview_filter(40.0);
        session.preview_filter(60.0);
        assert_eq!(session.history().len(), 1);
        assert!(session.commit());
        assert_eq!(session.history().len(), 2);
        assert!((value(&session, FilterField::Saturation) - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn unchanged_commit_is_skipped() {
        let mut session = EditorSession::default();
        assert!(!session.commit());
        session.preview_filter(100.0);
        assert!(!session.commit());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn selecting_a_filter_records_nothing() {
        let mut session = EditorSession::default();
        session.select_filter(FilterField::Blur);
        assert_eq!(session.active_filter(), FilterField::Blur);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.slider_label(), "0px");
    }

    #[test]
    fn transforms_record_each_click() {
        let mut session = EditorSession::default();
        assert!(session.rotate_right());
        assert!(session.flip_horizontal());
        assert!(session.flip_vertical());
        assert!(session.rotate_left());
        assert_eq!(session.history().len(), 5);
        assert_eq!(session.params().rotation(), 0);
    }

    #[test]
    fn reset_is_undoable() {
        let mut session = EditorSession::default();
        session.set_filter(FilterField::Grayscale, 80.0);
        assert!(session.reset());
        assert!(session.params().is_identity());
        assert!(session.undo());
        assert!((value(&session, FilterField::Grayscale) - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn undo_discards_uncommitted_drag() {
        let mut session = EditorSession::default();
        session.set_filter(FilterField::Brightness, 150.0);
        session.preview_filter(30.0);
        assert!(session.undo());
        assert!((value(&session, FilterField::Brightness) - 100.0).abs() < f32::EPSILON);
        assert!(session.redo());
        assert!((value(&session, FilterField::Brightness) - 150.0).abs() < f32::EPSILON);
    }

    #[test]
    fn bounds_are_noops() {
        let mut session = EditorSession::default();
        assert!(!session.undo());
        assert!(!session.redo());
        session.rotate_right();
        assert!(!session.redo());
        assert_eq!(session.params().rotation(), 90);
    }

    #[test]
    fn commit_after_undo_clears_redo() {
        let mut session = EditorSession::default();
        session.set_filter(FilterField::Contrast, 150.0);
        session.set_filter(FilterField::Contrast, 180.0);
        session.undo();
        session.flip_vertical();
        assert!(!session.can_redo());
        assert!(!session.redo());
        assert!((value(&session, FilterField::Contrast) - 150.0).abs() < f32::EPSILON);
    }

    #[test]
    fn begin_image_starts_fresh() {
        let mut session = EditorSession::default();
        session.select_filter(FilterField::Blur);
        session.set_filter(FilterField::Blur, 3.0);
        session.begin_image();
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.active_filter(), FilterField::Brightness);
        assert!(session.params().is_identity());
    }
}
