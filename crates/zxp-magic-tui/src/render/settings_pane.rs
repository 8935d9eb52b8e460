use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Settings ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let settings = app.settings();
    let label_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let key_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);

    let debug_value = match settings.debug_mode() {
        None => Span::styled(format!("{} checking", super::spinner(app.spinner_frame)), dim),
        Some(true) => Span::styled(
            "ON",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Some(false) => Span::styled("OFF", Style::default().fg(Color::Gray)),
    };
    let mut debug_line = vec![Span::styled(" Debug mode      ", label_style), debug_value];
    if settings.is_toggling() {
        debug_line.push(Span::styled("  saving...", dim));
    }

    let folder = settings
        .extensions_folder()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "unknown".to_owned());

    let lines = vec![
        Line::from(""),
        Line::from(debug_line),
        Line::from(Span::styled(
            "   Lets unsigned extensions load in host applications.",
            dim,
        )),
        Line::from(vec![
            Span::styled("   d", key_style),
            Span::styled(" toggle", dim),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Extensions dir  ", label_style),
            Span::raw(folder),
        ]),
        Line::from(vec![
            Span::styled("   o", key_style),
            Span::styled(" open in file manager", dim),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
