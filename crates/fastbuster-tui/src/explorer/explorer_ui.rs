//! Explorer rendering. A pure function of [`App`]; redrawing never changes state.

use super::actions::StatusKind;
use super::explorer_app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    // Title | spacer | partitions | status | legend | prompt
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let messages = app.messages();
    let title = Paragraph::new(Line::styled(
        messages.browsing_partitions(app.serial()),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(title, chunks[0]);

    let rows = app
        .visible_items()
        .map(|(index, entry)| {
            let style = if index == app.cursor() {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(Line::styled(
                format!("[PART] {}: {}", entry.name, entry.details),
                style,
            ))
        })
        .collect::<Vec<_>>();
    f.render_widget(List::new(rows), chunks[2]);

    if let Some(line) = status_line(app) {
        f.render_widget(Paragraph::new(line), chunks[3]);
    }

    let legend = Paragraph::new(Line::styled(
        messages.actions,
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(legend, chunks[4]);

    if let Some(prompt) = app.prompt() {
        f.render_widget(Paragraph::new(prompt), chunks[5]);
    }
}

/// Action status wins over a notice. Multi-line diagnostics are folded onto one row.
fn status_line(app: &App) -> Option<Line<'static>> {
    if let Some(status) = app.status() {
        let color = match status.kind {
            StatusKind::InProgress => Color::Yellow,
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::Red,
        };
        return Some(Line::styled(
            single_row(&status.text),
            Style::default().fg(color),
        ));
    }
    app.notice().map(|notice| Line::raw(single_row(notice)))
}

fn single_row(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Centered one-line message on an otherwise blank screen (splash and start-up notices).
pub fn draw_message(f: &mut Frame, text: &str, emphasis: bool) {
    let style = if emphasis {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let area = f.area();
    let row = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area)[0];
    f.render_widget(Paragraph::new(Line::styled(single_row(text), style)), row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::actions::StatusLine;
    use fastbuster_core::{Language, PartitionEntry};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn render(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn sample_app(rows: usize) -> App {
        App::new(
            "SER123",
            vec![
                PartitionEntry::new("boot_a", "active"),
                PartitionEntry::new("boot_b", "inactive"),
                PartitionEntry::new("userdata", "ext4"),
            ],
            Language::En.messages(),
            rows,
        )
    }

    #[test]
    fn renders_title_rows_and_legend() {
        let app = sample_app(App::visible_rows_for_height(10));
        let buffer = render(&app, 120, 10);
        assert_eq!(
            row_text(&buffer, 0),
            "Browsing partitions in Fastboot mode: SER123"
        );
        assert_eq!(row_text(&buffer, 2), "[PART] boot_a: active");
        assert_eq!(row_text(&buffer, 3), "[PART] boot_b: inactive");
        assert_eq!(row_text(&buffer, 4), "[PART] userdata: ext4");
        assert!(row_text(&buffer, 8).starts_with("Actions: [q] Quit"));
        assert!(buffer[(0, 2)].modifier.contains(Modifier::REVERSED));
        assert!(!buffer[(0, 3)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn renders_only_the_viewport() {
        let app = sample_app(1);
        let buffer = render(&app, 80, 6);
        assert_eq!(row_text(&buffer, 2), "[PART] boot_a: active");
        assert_eq!(row_text(&buffer, 3), "");
    }

    #[test]
    fn status_takes_the_status_row_and_folds_lines() {
        let mut app = sample_app(3);
        app.set_status(Some(StatusLine::error(
            "Error wiping 'userdata': FAILED\nremote: locked",
        )));
        let buffer = render(&app, 80, 8);
        assert_eq!(
            row_text(&buffer, 5),
            "Error wiping 'userdata': FAILED remote: locked"
        );
        assert_eq!(buffer[(0, 5)].fg, Color::Red);
    }

    #[test]
    fn redraw_is_idempotent() {
        let app = sample_app(3);
        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        let first = terminal.backend().buffer().clone();
        terminal.draw(|f| draw(f, &app)).unwrap();
        assert_eq!(&first, terminal.backend().buffer());
    }
}
