//! Host file-picker dialog.
//!
//! The dialog is modal and blocking: the explorer freezes until it returns.

use fastbuster_core::Messages;
use std::path::PathBuf;

/// Something that lets the operator choose a file, or cancel.
pub trait FilePicker {
    /// `None` means cancelled.
    fn pick_file(&mut self, title: &str) -> Option<PathBuf>;
}

/// Native dialog via `rfd`. The extension filter is cosmetic.
pub struct RfdPicker {
    messages: &'static Messages,
}

impl RfdPicker {
    pub fn new(messages: &'static Messages) -> Self {
        Self { messages }
    }
}

impl FilePicker for RfdPicker {
    fn pick_file(&mut self, title: &str) -> Option<PathBuf> {
        let picked = rfd::FileDialog::new()
            .add_filter(self.messages.image_files, &["img"])
            .add_filter(self.messages.all_files, &["*"])
            .set_title(title)
            .pick_file();
        match &picked {
            Some(path) => log::info!("picked {}", path.display()),
            None => log::info!("file dialog cancelled"),
        }
        picked.filter(|path| !path.as_os_str().is_empty())
    }
}
