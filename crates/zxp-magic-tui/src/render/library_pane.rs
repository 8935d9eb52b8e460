use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::app::App;

// Rows per record: name line, details line.
const ROW_HEIGHT: usize = 2;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let library = app.library();

    let mut title = vec![Span::raw(" Library ")];
    if library.is_stale() {
        title.push(Span::styled(
            "(out of date, r to retry) ",
            Style::default().fg(Color::Yellow),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if library.is_loading() {
        render_skeleton(frame, inner, app);
        return;
    }

    if library.is_empty() {
        let lines = vec![
            Line::from(Span::styled(
                "No extensions installed",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Add one from the Install tab",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let top = inner.height.saturating_sub(2) / 2;
        let content = Rect {
            y: inner.y + top,
            height: inner.height.saturating_sub(top),
            ..inner
        };
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), content);
        return;
    }

    let visible_rows = (inner.height as usize / ROW_HEIGHT).max(1);
    let offset = library.cursor().saturating_sub(visible_rows - 1);

    let dim = Style::default().fg(Color::DarkGray);
    let mut lines: Vec<Line> = Vec::new();
    for (idx, record) in library
        .records()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
    {
        let is_cursor = idx == library.cursor();
        let name_style = if is_cursor {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let marker = if app.uninstalling() == Some(&record.id) {
            format!(" {} ", super::spinner(app.spinner_frame))
        } else {
            "   ".to_owned()
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!(" {} ", record.name), name_style),
            Span::styled(format!("  v{}", record.version), dim),
        ]));

        let mut details = vec![Span::raw("    ")];
        details.extend(super::host_badges(record));
        details.push(Span::styled(record.id.to_string(), dim));
        lines.push(Line::from(details));
    }

    frame.render_widget(Paragraph::new(lines), inner);

    let total = library.len();
    if total > visible_rows {
        let mut scrollbar_state = ScrollbarState::new(total)
            .position(offset)
            .viewport_content_length(visible_rows);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
    }
}

fn render_skeleton(frame: &mut Frame, area: Rect, app: &App) {
    let placeholder = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();
    if app.library().is_stale() {
        lines.push(Line::from(Span::styled(
            " Could not load extensions. Press r to retry.",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!(" {} Loading extensions...", super::spinner(app.spinner_frame)),
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::from(""));
    for width in [18usize, 24, 14, 20] {
        lines.push(Line::from(Span::styled(format!("    {}", "░".repeat(width)), placeholder)));
        lines.push(Line::from(Span::styled(format!("    {}", "░".repeat(width / 2)), placeholder)));
    }
    frame.render_widget(Paragraph::new(lines), area);
}
