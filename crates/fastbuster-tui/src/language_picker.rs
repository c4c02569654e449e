//! Start-up language picker (shown when no language is configured).
//!
//! The picker is bilingual, so it always renders from the Spanish table.

use crate::terminal::{read_key, Tui};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fastbuster_core::{locale::SPANISH, Language};
use ratatui::{
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerResult {
    Pending,
    Chosen(Language),
    Aborted,
}

#[derive(Debug, Default, Clone)]
pub struct LanguagePicker {
    choice: Option<char>,
    invalid: bool,
}

impl LanguagePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choice(&self) -> Option<char> {
        self.choice
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> PickerResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return PickerResult::Aborted;
        }
        match key.code {
            KeyCode::Char(c @ ('1' | '2')) => {
                self.choice = Some(c);
                self.invalid = false;
                PickerResult::Pending
            }
            KeyCode::Enter => match self.choice {
                Some('1') => PickerResult::Chosen(Language::Es),
                Some('2') => PickerResult::Chosen(Language::En),
                _ => {
                    self.invalid = true;
                    PickerResult::Pending
                }
            },
            KeyCode::Esc => PickerResult::Chosen(Language::Es),
            KeyCode::Backspace => {
                self.choice = None;
                PickerResult::Pending
            }
            _ => PickerResult::Pending,
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let t = &SPANISH;
        let mut lines = vec![
            Line::styled(t.select_language, Style::default().add_modifier(Modifier::BOLD)),
            Line::raw(t.language_option_1),
            Line::raw(t.language_option_2),
            Line::raw(""),
            Line::raw(format!(
                "{}{}",
                t.select_language_prompt,
                self.choice.map(String::from).unwrap_or_default()
            )),
        ];
        if self.invalid {
            lines.push(Line::raw(""));
            lines.push(Line::raw(t.invalid_language));
        }
        f.render_widget(Paragraph::new(lines), f.area());
    }
}

/// Run the picker until a language is chosen. `None` if the operator aborted.
pub fn run(terminal: &mut Tui) -> Result<Option<Language>> {
    let mut picker = LanguagePicker::new();
    loop {
        terminal.draw(|f| picker.draw(f))?;
        match picker.handle_input(read_key()?) {
            PickerResult::Pending => {}
            PickerResult::Chosen(language) => {
                log::info!("language: {}", language);
                return Ok(Some(language));
            }
            PickerResult::Aborted => return Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_pick_english() {
        let mut picker = LanguagePicker::new();
        assert_eq!(picker.handle_input(key(KeyCode::Char('1'))), PickerResult::Pending);
        assert_eq!(picker.handle_input(key(KeyCode::Char('2'))), PickerResult::Pending);
        assert_eq!(picker.choice(), Some('2'));
        assert_eq!(
            picker.handle_input(key(KeyCode::Enter)),
            PickerResult::Chosen(Language::En)
        );
    }

    #[test]
    fn test_enter_without_choice_is_invalid() {
        let mut picker = LanguagePicker::new();
        picker.handle_input(key(KeyCode::Char('1')));
        picker.handle_input(key(KeyCode::Backspace));
        assert_eq!(picker.handle_input(key(KeyCode::Enter)), PickerResult::Pending);
        assert!(picker.invalid);

        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();
        terminal.draw(|f| picker.draw(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let row: String = (0..80).map(|x| buffer[(x, 6)].symbol().to_string()).collect();
        assert!(row.starts_with("¡Opción no válida!"));
    }

    #[test]
    fn test_escape_defaults_to_spanish() {
        let mut picker = LanguagePicker::new();
        assert_eq!(
            picker.handle_input(key(KeyCode::Esc)),
            PickerResult::Chosen(Language::Es)
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut picker = LanguagePicker::new();
        picker.handle_input(key(KeyCode::Char('3')));
        assert_eq!(picker.choice(), None);
    }
}
