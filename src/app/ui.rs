pub mod center;
pub mod common;
pub mod dialogs;
pub mod history;
pub mod icons;
pub mod info;
pub mod side;
pub mod top;
