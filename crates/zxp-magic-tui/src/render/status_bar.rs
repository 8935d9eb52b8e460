use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, Mode, Tab};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(note) = app.notifications().current() {
        let (icon, style) = if note.is_error() {
            ("✗", Style::default().fg(Color::Red))
        } else {
            ("✓", Style::default().fg(Color::Green))
        };
        Line::from(Span::styled(format!(" {icon} {}", note.text), style))
    } else {
        Line::from(hints(app))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn hints(app: &App) -> Vec<Span<'static>> {
    let pairs: &[(&str, &str)] = if app.mode != Mode::Normal {
        &[]
    } else if app.show_settings {
        &[("d", "debug"), ("o", "open folder"), ("Esc", "back"), ("q", "quit")]
    } else if app.selection().current().is_some() {
        &[("x", "uninstall"), ("Esc", "close"), ("q", "quit")]
    } else {
        match app.tab {
            Tab::Install if app.install_state().settled().is_some() => &[
                ("l", "library"),
                ("n", "another"),
                ("Tab", "switch"),
                ("s", "settings"),
                ("q", "quit"),
            ],
            Tab::Install => &[
                ("o", "browse"),
                ("Tab", "switch"),
                ("s", "settings"),
                ("q", "quit"),
            ],
            Tab::Library => &[
                ("\u{2191}\u{2193}", "navigate"),
                ("\u{23ce}", "details"),
                ("x", "uninstall"),
                ("r", "refresh"),
                ("Tab", "switch"),
                ("s", "settings"),
                ("q", "quit"),
            ],
        }
    };

    let hint_style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    for (key, label) in pairs {
        spans.push(Span::styled(format!(" {key}"), hint_style));
        spans.push(Span::styled(format!(" {label} "), hint_style));
    }
    spans
}
