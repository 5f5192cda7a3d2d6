//! Editing model: parameter values, the linear history over them, and the
//! session that ties both to the active filter selection.

mod history;
mod params;
mod session;

pub use history::{History, HistoryEntry};
pub use params::{FilterField, Flip, ParameterState};
pub use session::EditorSession;
