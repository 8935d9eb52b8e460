use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::app::App;

/// Detail overlay for the selected extension.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(record) = app.selection().current() else {
        return;
    };

    let popup_area = super::centered_rect_percent(70, 80, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", record.name));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [body, hints] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let label_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(Color::White);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Version:  ", label_style),
        Span::styled(record.version.clone(), value_style),
    ]));

    if let Some(author) = &record.author {
        lines.push(Line::from(vec![
            Span::styled("Author:   ", label_style),
            Span::styled(author.clone(), value_style),
        ]));
    }

    if let Some(cep) = &record.cep_runtime_version {
        lines.push(Line::from(vec![
            Span::styled("CEP:      ", label_style),
            Span::styled(cep.clone(), value_style),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("ID:       ", label_style),
        Span::styled(record.id.to_string(), dim_style),
    ]));

    if let Some(path) = &record.install_path {
        lines.push(Line::from(vec![
            Span::styled("Path:     ", label_style),
            Span::styled(path.display().to_string(), dim_style),
        ]));
    }

    if !record.host_compatibility.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Hosts", label_style)));
        for host in &record.host_compatibility {
            let (abbr, color) = super::host_badge(&host.host_name);
            let version = if host.is_unconstrained() {
                "all versions".to_owned()
            } else {
                host.host_version.clone()
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  [{abbr}] "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(host.host_name.clone(), value_style),
                Span::styled(format!("  {version}"), dim_style),
            ]));
        }
    }

    if let Some(description) = &record.description {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "\u{2500}".repeat(body.width as usize),
            dim_style,
        )));
        for line in description.lines() {
            lines.push(Line::from(line.to_owned()));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);

    let hint_style = Style::default().fg(Color::DarkGray);
    let key_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    let hint = Line::from(vec![
        Span::styled(" x", key_style),
        Span::styled(" uninstall  ", hint_style),
        Span::styled("o", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled(" open folder  ", hint_style),
        Span::styled("Esc", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled(" close", hint_style),
    ]);
    frame.render_widget(Paragraph::new(hint), hints);
}
