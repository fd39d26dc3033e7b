//! Common UI components shared across views.
//!
//! This module contains the header bar, status bar, and help overlay.

use homelab_types::ServiceStatus;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Focus};
use crate::data::format;

/// Render the header bar with overall service health.
///
/// Displays: worst-status dot, chip counts by status, cards still loading.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let counts = app.view.status_counts();
    let overall = app.view.overall();
    let loading = app.view.cards_loading();

    let count = |n: usize, status: ServiceStatus| {
        if n > 0 {
            Span::styled(n.to_string(), app.theme.status_style(status))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let mut spans = vec![
        Span::styled(" ● ", app.theme.status_style(overall)),
        Span::styled("HOMELAB ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        count(counts.ok, ServiceStatus::Ok),
        Span::raw(" ok "),
        count(counts.warning, ServiceStatus::Warning),
        Span::raw(" warn "),
        count(counts.error, ServiceStatus::Error),
        Span::raw(" err │ "),
    ];
    if loading > 0 {
        spans.push(Span::styled(
            format!("{}", loading),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" cards loading"));
    } else {
        spans.push(Span::raw("all cards loaded"));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows: focused item, time since its data last arrived, available
/// controls. Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let updated = match app.focused_age() {
        Some(age) => format!("Updated {}", format::age(age)),
        None if app.focused_sources().is_empty() => "Static".to_string(),
        None => "Waiting for data".to_string(),
    };

    let controls = match app.focus {
        Focus::Cards => "←↓↑→:move Tab:chips Enter:detail r:refetch e:export ?:help q:quit",
        Focus::Status => "↑↓:move Tab:cards Enter:detail r:refetch e:export ?:help q:quit",
    };

    let status = format!(" {} | {} | {}", app.focus_label(), updated, controls);
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Previous/next card"),
        Line::from("  ↑/↓ j/k     Row up/down"),
        Line::from("  Home/End    First/last"),
        Line::from("  Tab         Chips / cards"),
        Line::from("  Enter       View detail"),
        Line::from("  Esc         Go back"),
        Line::from("  Mouse       Click to focus"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Refetch everything"),
        Line::from("  e         Export to JSON"),
        Line::from("  ?         Toggle help"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 21u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
