//! Detail overlay rendering.
//!
//! Displays a modal overlay for the focused card or chip, with the full
//! card body and the state of every query behind it.

use std::time::Duration;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::card;
use crate::app::App;
use crate::data::format;
use crate::query::QueryKey;
use crate::source::catalog::ChipColumn;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Centred overlay bounds, or `None` when the terminal is too small.
fn overlay_rect(area: Rect) -> Option<Rect> {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return None;
    }

    let percent = |len: u16, pct: u32| (u32::from(len) * pct / 100) as u16;
    let width = percent(area.width, 95).clamp(MIN_OVERLAY_WIDTH, 100);
    let height = percent(area.height, 90).clamp(MIN_OVERLAY_HEIGHT, 50);

    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Some(Rect::new(x, y, width, height))
}

/// Render the focused card or chip as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(overlay_area) = overlay_rect(area) else {
        return;
    };

    frame.render_widget(Clear, overlay_area);

    let sources = source_lines(app);
    let link = app
        .focused_card()
        .and_then(|c| c.link.clone())
        .or_else(|| app.focused_chip().and_then(|c| c.chip.url.clone()));
    let mut footer_lines = vec![Line::from(vec![
        Span::raw(" Link: "),
        match link {
            Some(url) => Span::styled(url, app.theme.link_style()),
            None => Span::styled("none", Style::default().add_modifier(Modifier::DIM)),
        },
    ])];
    footer_lines.push(Line::from(""));
    footer_lines.extend(sources);

    let sources_height = (footer_lines.len() as u16 + 2).min(overlay_area.height / 2);
    let chunks = Layout::vertical([
        Constraint::Min(6),                 // Card body or chip summary
        Constraint::Length(sources_height), // Link and query state
        Constraint::Length(1),              // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    if let Some(view) = app.focused_card() {
        card::render(frame, &app.theme, view, true, chunks[0]);
    } else if let Some(view) = app.focused_chip() {
        let column = match view.column {
            ChipColumn::Pihole => "Pi-hole",
            ChipColumn::Primary => "Primary",
        };
        let mut chip_spans = vec![Span::raw(" ")];
        chip_spans.extend(view.chip.line(&app.theme).spans);
        let lines = vec![
            Line::from(""),
            Line::from(chip_spans),
            Line::from(""),
            Line::from(vec![
                Span::raw(" Status: "),
                Span::styled(
                    view.chip.status.to_string(),
                    app.theme.status_style(view.chip.status).add_modifier(Modifier::BOLD),
                ),
                Span::raw("    Column: "),
                Span::styled(column, Style::default().add_modifier(Modifier::BOLD)),
            ]),
        ];
        let block = Block::default()
            .title(" Service Detail ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.highlight));
        frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);
    }

    // ===== SOURCES SECTION =====
    let block = Block::default()
        .title(format!(" Sources ({}) ", app.focused_sources().len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let paragraph = Paragraph::new(footer_lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, chunks[1]);

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}

fn source_lines(app: &App) -> Vec<Line<'static>> {
    let keys = app.focused_sources();
    if keys.is_empty() {
        return vec![Line::from(Span::styled(
            " Status is fixed; nothing is fetched",
            Style::default().add_modifier(Modifier::DIM),
        ))];
    }
    keys.iter().flat_map(|key| query_lines(app, key)).collect()
}

fn query_lines(app: &App, key: &QueryKey) -> Vec<Line<'static>> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let dashboard = &app.dashboard;

    let mut title = vec![Span::styled(
        format!(" {}", key),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(interval) = dashboard.interval(key) {
        title.push(Span::styled(format!("  every {}", every(interval)), dim));
    }
    let mut lines = vec![Line::from(title)];

    if let Some(describe) = dashboard.describe(key) {
        lines.push(Line::from(Span::styled(format!("   {}", describe), dim)));
    }

    let Some(info) = dashboard.info(key) else {
        return lines;
    };
    let updated = match info.age() {
        Some(age) => format!("updated {}", format::age(age)),
        None => "never fetched".to_string(),
    };
    let mut state = format!("   {} | {}", info.status, updated);
    if info.consecutive_failures > 0 {
        state.push_str(&format!(" | {} failed in a row", info.consecutive_failures));
    }
    if info.fetching {
        state.push_str(" | fetching");
    }
    lines.push(Line::from(state));

    if let Some(error) = info.error {
        lines.push(Line::from(Span::styled(
            format!("   {}", error),
            Style::default().fg(app.theme.critical),
        )));
    }
    lines
}

/// Poll interval as `"30s"` or `"5m"`.
fn every(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::runtime::Handle;

    use super::*;
    use crate::config::Settings;
    use crate::dashboard::Dashboard;
    use crate::ui::Theme;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| render_overlay(frame, app, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        let settings = Settings::for_tests("http://127.0.0.1:9");
        let dashboard = Dashboard::new(&settings, Handle::current()).unwrap();
        App::new(dashboard, Theme::dark())
    }

    #[test]
    fn test_every() {
        assert_eq!(every(Duration::from_secs(5)), "5s");
        assert_eq!(every(Duration::from_secs(60)), "1m");
        assert_eq!(every(Duration::from_secs(90)), "90s");
    }

    #[test]
    fn test_overlay_rect_on_wide_terminals() {
        assert_eq!(overlay_rect(Rect::new(0, 0, 49, 40)), None);
        assert_eq!(overlay_rect(Rect::new(0, 0, 60, 20)), Some(Rect::new(1, 1, 57, 18)));
        assert_eq!(
            overlay_rect(Rect::new(0, 0, 1000, 300)),
            Some(Rect::new(450, 125, 100, 50))
        );
    }

    #[tokio::test]
    async fn test_card_detail_lists_sources() {
        let mut app = app();
        app.selected_card = 1;
        let text = screen(&app);

        assert!(text.contains("DNS Queries"));
        assert!(text.contains("Sources (1)"));
        assert!(text.contains("pihole:summary"));
        assert!(text.contains("never fetched"));
        assert!(text.contains("Press Esc to close"));
    }

    #[tokio::test]
    async fn test_fixed_chip_has_no_sources() {
        let mut app = app();
        app.toggle_focus();
        app.select_last();
        let text = screen(&app);

        assert!(text.contains("Service Detail"));
        assert!(text.contains("Dashboard"));
        assert!(text.contains("Status is fixed"));
    }
}
