//! Unicode UI icon constants.
//!
//! Uses a BMP-only "safe" subset for broad font coverage (no emoji fonts needed).

pub const ICON_MENU: &str = "☰";
pub const ICON_INFO: &str = "ℹ";
pub const ICON_HISTORY: &str = "☷";
pub const ICON_SIDE_TOGGLE: &str = "⟷";
pub const ICON_ROTATE_CCW: &str = "↺";
pub const ICON_ROTATE_CW: &str = "↻";
pub const ICON_FLIP_H: &str = "⇆";
pub const ICON_FLIP_V: &str = "⇅";
pub const ICON_RESET: &str = "⟳";
pub const ICON_UNDO: &str = "↶";
pub const ICON_REDO: &str = "↷";
pub const ICON_SAVE: &str = "⇩";
pub const ICON_CURSOR: &str = "▶";
pub const ICON_REVISITED: &str = "↺";
