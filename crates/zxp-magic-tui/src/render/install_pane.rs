use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::install::InstallState;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Install ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match app.install_state() {
        InstallState::Idle => drop_zone(),
        InstallState::Installing { package } => installing(
            app,
            package
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| package.display().to_string()),
        ),
        InstallState::Finalizing { record, .. } => installing(app, record.name.clone()),
        InstallState::Settled(record) => success_card(record),
    };

    // Vertically center the content.
    let height = lines.len() as u16;
    let top = inner.height.saturating_sub(height) / 2;
    let content = Rect {
        y: inner.y + top,
        height: inner.height.saturating_sub(top),
        ..inner
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, content);
}

fn drop_zone() -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let key_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    vec![
        Line::from(Span::styled(
            "Drop a .zxp or .zxpinstall file here",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("or press ", dim),
            Span::styled("o", key_style),
            Span::styled(" to browse", dim),
        ]),
    ]
}

fn installing(app: &App, name: String) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("{} Installing {name}", super::spinner(app.spinner_frame)),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Extracting and copying files...",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn success_card(record: &zxp_magic::ExtensionRecord) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let key_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            "✓ Installed",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            record.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("v{}  {}", record.version, record.id), dim)),
    ];
    if !record.host_compatibility.is_empty() {
        lines.push(Line::from(super::host_badges(record)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("l", key_style),
        Span::styled(" view in library  ", dim),
        Span::styled("n", key_style),
        Span::styled(" install another", dim),
    ]));
    lines
}
