//! fastbuster TUI.
//!
//! The partition explorer and the screens around it (language picker, splash notices).

pub mod explorer;
pub mod language_picker;
pub mod picker;
pub mod terminal;
