use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use zxp_magic::PackageKind;

use crate::app::App;

/// Render the file explorer overlay for choosing a package.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(explorer) = &app.file_explorer else {
        return;
    };

    let popup_area = super::centered_rect_percent(60, 70, area);
    frame.render_widget(Clear, popup_area);

    // Explorer, selection preview, hint bar.
    let chunks = Layout::default()
        .constraints([
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Choose a .zxp or .zxpinstall ");
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    frame.render_widget(&explorer.widget(), inner);

    let preview_style = Style::default().fg(Color::DarkGray);
    let current = explorer.current();
    let preview = if current.is_dir() {
        Line::from(Span::styled(" Enter opens the folder", preview_style))
    } else if PackageKind::from_path(current.path()).is_some() {
        Line::from(vec![
            Span::styled(" Will install: ", preview_style),
            Span::styled(current.name().to_owned(), Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(Span::styled(
            " Not an extension package",
            Style::default().fg(Color::Red),
        ))
    };
    frame.render_widget(Paragraph::new(preview), chunks[1]);

    let hint_style = Style::default().fg(Color::DarkGray);
    let key_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);

    let hints = Line::from(vec![
        Span::styled(" j/k", key_style),
        Span::styled(" nav  ", hint_style),
        Span::styled("h/l", key_style),
        Span::styled(" up/into  ", hint_style),
        Span::styled("Enter", key_style),
        Span::styled(" install  ", hint_style),
        Span::styled("Esc", key_style),
        Span::styled(" cancel", hint_style),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[2]);
}
