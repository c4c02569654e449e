//! Explorer state machine (the navigator).
//!
//! Pure: key events go in, state changes and an [`InputResult`] come out. Anything that
//! blocks (dialogs, device commands) is requested through the result and performed by
//! the caller.

use super::actions::{file_label, DeviceAction, StatusLine};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fastbuster_core::{Messages, PartitionEntry};
use std::path::PathBuf;

/// Rows taken by everything except the partition list: title, spacer, status, legend,
/// prompt.
pub const CHROME_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    EnteringName { buffer: String },
    AwaitingConfirmation { action: DeviceAction },
}

/// Which dialog the explorer wants opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRequest {
    Flash { partition: String },
    Boot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
    PickFile(FileRequest),
    Execute(DeviceAction),
}

#[derive(Debug, Clone)]
pub struct App {
    serial: String,
    messages: &'static Messages,
    items: Vec<PartitionEntry>,
    cursor: usize,
    viewport_top: usize,
    visible_rows: usize,
    mode: Mode,
    /// Inline message dismissed by the next key press.
    notice: Option<String>,
    /// Action progress/outcome, set while an action is running.
    status: Option<StatusLine>,
}

impl App {
    pub fn new(
        serial: impl Into<String>,
        items: Vec<PartitionEntry>,
        messages: &'static Messages,
        visible_rows: usize,
    ) -> Self {
        Self {
            serial: serial.into(),
            messages,
            items,
            cursor: 0,
            viewport_top: 0,
            visible_rows: visible_rows.max(1),
            mode: Mode::Browsing,
            notice: None,
            status: None,
        }
    }

    pub fn visible_rows_for_height(height: u16) -> usize {
        (height as usize).saturating_sub(CHROME_ROWS).max(1)
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    pub fn items(&self) -> &[PartitionEntry] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn viewport_top(&self) -> usize {
        self.viewport_top
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: Option<StatusLine>) {
        self.status = status;
    }

    pub fn selected(&self) -> Option<&PartitionEntry> {
        self.items.get(self.cursor)
    }

    /// Entries currently inside the viewport, with their absolute indices.
    pub fn visible_items(&self) -> impl Iterator<Item = (usize, &PartitionEntry)> {
        self.items
            .iter()
            .enumerate()
            .skip(self.viewport_top)
            .take(self.visible_rows)
    }

    /// Prompt for the bottom row, derived from the mode.
    pub fn prompt(&self) -> Option<String> {
        match &self.mode {
            Mode::Browsing => None,
            Mode::EnteringName { buffer } => Some(self.messages.go_to_partition(buffer)),
            Mode::AwaitingConfirmation { action } => Some(match action {
                DeviceAction::Flash { partition, image } => {
                    self.messages.flash_confirm(&file_label(image), partition)
                }
                DeviceAction::Wipe { partition } => self.messages.wipe_confirm(partition),
                // Boot and reboot never wait for confirmation.
                DeviceAction::Boot { .. } | DeviceAction::Reboot => String::new(),
            }),
        }
    }

    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        self.keep_cursor_visible();
    }

    /// Swap in a fresh catalog snapshot; the cursor is clamped into range.
    pub fn replace_items(&mut self, items: Vec<PartitionEntry>) {
        self.items = items;
        self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
        self.viewport_top = self.viewport_top.min(self.cursor);
        self.keep_cursor_visible();
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> InputResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputResult::Quit;
        }
        // A pending notice swallows the key that dismisses it.
        if self.notice.take().is_some() {
            return InputResult::Continue;
        }
        match self.mode {
            Mode::Browsing => self.handle_browsing_input(key),
            Mode::EnteringName { .. } => self.handle_name_input(key),
            Mode::AwaitingConfirmation { .. } => self.handle_confirmation_input(key),
        }
    }

    /// Feed back the outcome of a [`InputResult::PickFile`] request.
    pub fn file_chosen(&mut self, request: FileRequest, path: Option<PathBuf>) -> InputResult {
        let path = path.filter(|p| !p.as_os_str().is_empty());
        match (request, path) {
            (FileRequest::Flash { partition }, Some(image)) => {
                self.mode = Mode::AwaitingConfirmation {
                    action: DeviceAction::Flash { partition, image },
                };
                InputResult::Continue
            }
            (FileRequest::Flash { .. }, None) => {
                self.notice = Some(self.messages.flash_cancelled.to_string());
                InputResult::Continue
            }
            (FileRequest::Boot, Some(image)) => InputResult::Execute(DeviceAction::Boot { image }),
            (FileRequest::Boot, None) => InputResult::Continue,
        }
    }

    fn handle_browsing_input(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Down => {
                self.move_down();
                InputResult::Continue
            }
            KeyCode::Up => {
                self.move_up();
                InputResult::Continue
            }
            KeyCode::Enter => {
                if let Some(entry) = self.selected() {
                    self.notice = Some(self.messages.partition_details(&entry.name, &entry.details));
                }
                InputResult::Continue
            }
            KeyCode::Char('u') => match self.selected() {
                Some(entry) => InputResult::PickFile(FileRequest::Flash {
                    partition: entry.name.clone(),
                }),
                None => InputResult::Continue,
            },
            KeyCode::Char('o') => {
                if let Some(entry) = self.selected() {
                    self.mode = Mode::AwaitingConfirmation {
                        action: DeviceAction::Wipe {
                            partition: entry.name.clone(),
                        },
                    };
                }
                InputResult::Continue
            }
            KeyCode::Char('b') => InputResult::PickFile(FileRequest::Boot),
            KeyCode::Char('R') => InputResult::Execute(DeviceAction::Reboot),
            KeyCode::Char('r') => {
                self.mode = Mode::EnteringName {
                    buffer: String::new(),
                };
                InputResult::Continue
            }
            KeyCode::Char('q') => InputResult::Quit,
            _ => InputResult::Continue,
        }
    }

    fn handle_name_input(&mut self, key: KeyEvent) -> InputResult {
        let Mode::EnteringName { buffer } = &mut self.mode else {
            return InputResult::Continue;
        };
        match key.code {
            KeyCode::Enter => {
                let name = buffer.trim().to_string();
                self.mode = Mode::Browsing;
                self.go_to(&name);
            }
            KeyCode::Esc => self.mode = Mode::Browsing,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if (' '..='~').contains(&c) => buffer.push(c),
            _ => {}
        }
        InputResult::Continue
    }

    fn handle_confirmation_input(&mut self, key: KeyEvent) -> InputResult {
        let Mode::AwaitingConfirmation { action } =
            std::mem::replace(&mut self.mode, Mode::Browsing)
        else {
            return InputResult::Continue;
        };
        let affirmative = self.messages.language.affirmative_key();
        if key.code == KeyCode::Char(affirmative) && !key.modifiers.contains(KeyModifiers::CONTROL) {
            InputResult::Execute(action)
        } else {
            log::info!("{:?} not confirmed", action);
            InputResult::Continue
        }
    }

    fn go_to(&mut self, name: &str) {
        let wanted = name.to_lowercase();
        match self
            .items
            .iter()
            .position(|entry| entry.name.to_lowercase() == wanted)
        {
            Some(index) => {
                self.cursor = index;
                self.viewport_top = index.saturating_sub(self.visible_rows / 2);
            }
            None => self.notice = Some(self.messages.partition_not_found(name)),
        }
    }

    fn move_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1).min(self.items.len() - 1);
        self.keep_cursor_visible();
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.keep_cursor_visible();
    }

    /// Scroll the minimum amount so `viewport_top <= cursor < viewport_top + rows`.
    fn keep_cursor_visible(&mut self) {
        if self.cursor < self.viewport_top {
            self.viewport_top = self.cursor;
        } else if self.cursor >= self.viewport_top + self.visible_rows {
            self.viewport_top = self.cursor + 1 - self.visible_rows;
        }
    }
}
