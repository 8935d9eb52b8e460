use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(record) = app.pending_uninstall() else {
        return;
    };

    let width = 56u16.min(area.width.saturating_sub(4));
    let popup_area = super::centered_rect_fixed(width, 9, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Uninstall ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .margin(1)
        .split(inner);

    let question = Paragraph::new(Line::from(vec![
        Span::raw("Remove "),
        Span::styled(
            record.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("?"),
    ]));
    frame.render_widget(question, chunks[0]);

    let id = Paragraph::new(Line::from(Span::styled(
        record.id.to_string(),
        Style::default().fg(Color::DarkGray),
    )))
    .wrap(Wrap { trim: false });
    frame.render_widget(id, chunks[1]);

    let hint_style = Style::default().fg(Color::DarkGray);
    let hints = Line::from(vec![
        Span::styled(
            " Enter/y",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" remove  ", hint_style),
        Span::styled(
            "Esc/n",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" keep", hint_style),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[2]);
}
