mod detail_pane;
mod drag_overlay;
mod file_picker;
mod install_pane;
mod library_pane;
mod settings_pane;
mod status_bar;
mod uninstall_confirm;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, Mode, Tab};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Outer layout: header (1), main content, bottom bar (1).
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(frame, outer[0], app);

    if app.show_settings {
        settings_pane::render(frame, outer[1], app);
    } else {
        match app.tab {
            Tab::Install => install_pane::render(frame, outer[1], app),
            Tab::Library => library_pane::render(frame, outer[1], app),
        }
    }

    status_bar::render(frame, outer[2], app);

    // Overlays (rendered on top).
    if !app.show_settings && app.selection().current().is_some() {
        detail_pane::render(frame, outer[1], app);
    }
    match app.mode {
        Mode::FilePicker => file_picker::render(frame, size, app),
        Mode::UninstallConfirm => uninstall_confirm::render(frame, size, app),
        Mode::Normal => {}
    }
    if app.drag().is_active() {
        drag_overlay::render(frame, size);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let active_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let idle_style = Style::default().fg(Color::Gray);
    let label_style = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(" ZXP Magic", title_style), Span::raw("  ")];

    for (i, tab) in Tab::ALL.iter().enumerate() {
        let style = if *tab == app.tab && !app.show_settings {
            active_style
        } else {
            idle_style
        };
        let label = match tab {
            Tab::Library if !app.library().is_loading() => {
                format!(" {} {} ({}) ", i + 1, tab.title(), app.library().len())
            }
            _ => format!(" {} {} ", i + 1, tab.title()),
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let settings_style = if app.show_settings {
        active_style
    } else {
        idle_style
    };
    spans.push(Span::styled(" s Settings ", settings_style));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(format!("[{}]", app.backend_label), label_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub(crate) fn spinner(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

/// Two-letter badge and colour for a host application name.
pub(crate) fn host_badge(name: &str) -> (String, Color) {
    let known = match name {
        "Premiere Pro" => Some(("Pr", Color::Magenta)),
        "After Effects" => Some(("Ae", Color::Blue)),
        "Photoshop" => Some(("Ps", Color::LightBlue)),
        "Illustrator" => Some(("Ai", Color::LightRed)),
        "InDesign" => Some(("Id", Color::LightMagenta)),
        "Audition" => Some(("Au", Color::LightGreen)),
        "Animate" => Some(("An", Color::Yellow)),
        "Premiere Rush" => Some(("Ru", Color::Magenta)),
        "Character Animator" => Some(("Ch", Color::Cyan)),
        _ => None,
    };
    match known {
        Some((abbr, color)) => (abbr.to_owned(), color),
        None => (name.chars().take(2).collect(), Color::Gray),
    }
}

pub(crate) fn host_badges(record: &zxp_magic::ExtensionRecord) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for host in &record.host_compatibility {
        let (abbr, color) = host_badge(&host.host_name);
        spans.push(Span::styled(
            format!("[{abbr}]"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Helper to create a centered rectangle with fixed dimensions.
pub(crate) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);

    let [vertical_area] = vertical.areas(area);
    let [centered] = horizontal.areas(vertical_area);
    centered
}

/// Helper to create a centered rectangle with percentage dimensions.
pub(crate) fn centered_rect_percent(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use zxp_magic::test_support::sample_record;

    use super::*;
    use crate::action::Action;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn known_hosts_get_abbreviations() {
        assert_eq!(host_badge("Photoshop").0, "Ps");
        assert_eq!(host_badge("After Effects").0, "Ae");
        assert_eq!(host_badge("Dreamweaver"), ("Dr".to_owned(), Color::Gray));
    }

    #[test]
    fn library_shows_empty_state_after_load() {
        let mut app = App::new("fake".into());
        app.tab = Tab::Library;
        let crate::action::AppCommand::RefreshLibrary(ticket) = app.refresh() else {
            panic!("expected refresh");
        };
        app.handle_action(Action::LibraryRefreshed {
            ticket,
            result: Ok(vec![]),
        });
        let screen = draw(&app);
        assert!(screen.contains("No extensions installed"));
        assert!(screen.contains("Library (0)"));
    }

    #[test]
    fn library_lists_records() {
        let mut app = App::new("fake".into());
        app.tab = Tab::Library;
        let crate::action::AppCommand::RefreshLibrary(ticket) = app.refresh() else {
            panic!("expected refresh");
        };
        app.handle_action(Action::LibraryRefreshed {
            ticket,
            result: Ok(vec![sample_record("com.example.panel")]),
        });
        let screen = draw(&app);
        assert!(screen.contains("panel"));
        assert!(screen.contains("[Ps]"));
    }

    #[test]
    fn drop_zone_is_shown_when_idle() {
        let app = App::new("fake".into());
        let screen = draw(&app);
        assert!(screen.contains(".zxp"));
    }
}
