//! Main screen: chip columns beside a scrolling grid of cards.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::card;
use super::chip::{self, StatusChip};
use super::layout::{self, StatusArea};
use crate::app::{App, Focus};
use crate::source::catalog::ChipColumn;

/// Card columns for a content area, matching what [`render`] draws.
pub fn columns_for_area(area: Rect) -> usize {
    let (_, grid) = layout::split_content(area);
    layout::columns_for_width(grid.width)
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (status, grid) = layout::split_content(area);
    render_chips(frame, app, status);
    render_cards(frame, app, grid);
}

fn render_chips(frame: &mut Frame, app: &App, area: StatusArea) {
    let focused = (app.focus == Focus::Status).then_some(app.selected_chip);

    match area {
        StatusArea::Column(rect) => {
            let pihole_rows = app.view.column(ChipColumn::Pihole).count() as u16;
            let [top, bottom] =
                Layout::vertical([Constraint::Length(pihole_rows + 2), Constraint::Min(0)])
                    .areas(rect);
            for (column, title, rect) in [
                (ChipColumn::Pihole, "Pi-hole", top),
                (ChipColumn::Primary, "Primary", bottom),
            ] {
                let entries: Vec<_> = app.view.column(column).collect();
                let chips: Vec<&StatusChip> = entries.iter().map(|(_, c)| &c.chip).collect();
                let focus = focused.and_then(|f| entries.iter().position(|(i, _)| *i == f));
                chip::render_column(frame, &app.theme, title, &chips, focus, rect);
            }
        }
        StatusArea::Strip(rect) => {
            let mut spans: Vec<Span> = Vec::new();
            for (i, view) in app.view.chips.iter().enumerate() {
                let mut line = view.chip.line(&app.theme);
                if focused == Some(i) {
                    line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
                }
                spans.extend(line.spans);
                spans.push(Span::raw("  "));
            }
            let block = Block::default()
                .title(Span::styled(" Services ", app.theme.header))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border));
            let paragraph = Paragraph::new(Line::from(spans))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, rect);
        }
    }
}

/// Where each card lands for the current scroll position.
fn card_grid(app: &App, area: Rect) -> layout::Grid {
    let columns = layout::columns_for_width(area.width);
    let width = layout::column_width(area, columns);
    let heights: Vec<u16> = app.view.cards.iter().map(|c| c.height(width)).collect();

    let rows = layout::row_heights(&heights, columns);
    let first_row = layout::scroll_for(&rows, app.selected_card / columns, area.height);
    layout::grid(area, &heights, columns, first_row)
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let grid = card_grid(app, area);
    for (i, (view, cell)) in app.view.cards.iter().zip(&grid.cells).enumerate() {
        if let Some(rect) = cell {
            let focused = app.focus == Focus::Cards && i == app.selected_card;
            card::render(frame, &app.theme, view, focused, *rect);
        }
    }
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Index into the view's chips.
    Chip(usize),
    /// Index into the view's cards.
    Card(usize),
}

/// Find the chip or card under `(column, row)` in the content area last
/// drawn.
pub fn hit(app: &App, column: u16, row: u16) -> Option<Hit> {
    let inside = |r: Rect| {
        column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
    };
    let (status, grid) = layout::split_content(app.content_area);

    if let StatusArea::Column(rect) = status {
        if inside(rect) {
            let pihole_rows = app.view.column(ChipColumn::Pihole).count() as u16;
            let [top, bottom] =
                Layout::vertical([Constraint::Length(pihole_rows + 2), Constraint::Min(0)])
                    .areas(rect);
            for (column, rect) in [(ChipColumn::Pihole, top), (ChipColumn::Primary, bottom)] {
                // Skip the border row.
                if row > rect.y && row < rect.y + rect.height {
                    let offset = (row - rect.y - 1) as usize;
                    return app.view.column(column).nth(offset).map(|(i, _)| Hit::Chip(i));
                }
            }
            return None;
        }
    }

    card_grid(app, grid)
        .cells
        .iter()
        .position(|cell| cell.is_some_and(inside))
        .map(Hit::Card)
}
