//! Dashboard layout: chip columns on the left, card grid on the right.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the status column.
pub const STATUS_COLUMN_WIDTH: u16 = 26;

/// Below this width the chips move to a strip above the grid.
const NARROW_WIDTH: u16 = 90;

/// Height of the chip strip, borders included.
pub const STATUS_STRIP_HEIGHT: u16 = 4;

/// Card columns for a grid area of `width` cells.
pub fn columns_for_width(width: u16) -> usize {
    match width {
        0..=79 => 1,
        80..=139 => 2,
        _ => 3,
    }
}

/// Where the chips go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArea {
    /// Two stacked columns left of the grid.
    Column(Rect),
    /// One wrapped line above the grid.
    Strip(Rect),
}

/// Split the content area into the chip area and the card grid.
pub fn split_content(area: Rect) -> (StatusArea, Rect) {
    if area.width < NARROW_WIDTH {
        let chunks =
            Layout::vertical([Constraint::Length(STATUS_STRIP_HEIGHT), Constraint::Min(0)]).split(area);
        return (StatusArea::Strip(chunks[0]), chunks[1]);
    }
    let chunks =
        Layout::horizontal([Constraint::Length(STATUS_COLUMN_WIDTH), Constraint::Min(0)]).split(area);
    (StatusArea::Column(chunks[0]), chunks[1])
}

/// Positions of cards in a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub columns: usize,
    /// One rect per card, in card order; `None` when scrolled out of view.
    pub cells: Vec<Option<Rect>>,
}

/// Lay out cards row by row. Each row is as tall as its tallest card; rows
/// before `first_row` are skipped and rows that do not fit are dropped.
pub fn grid(area: Rect, heights: &[u16], columns: usize, first_row: usize) -> Grid {
    let columns = columns.max(1);
    let col_rects = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(area);

    let mut cells = vec![None; heights.len()];
    let mut y = area.y;
    for (row, chunk) in heights.chunks(columns).enumerate() {
        if row < first_row {
            continue;
        }
        let mut row_height = chunk.iter().copied().max().unwrap_or(0);
        if y + row_height > area.bottom() {
            if y > area.y {
                break;
            }
            // A single row taller than the area is clipped, not hidden.
            row_height = area.height;
        }
        for (col, _) in chunk.iter().enumerate() {
            let c = col_rects[col];
            cells[row * columns + col] = Some(Rect::new(c.x, y, c.width, row_height));
        }
        y += row_height;
    }
    Grid { columns, cells }
}

/// Width each card gets for `area` split into `columns`.
pub fn column_width(area: Rect, columns: usize) -> u16 {
    area.width / columns.max(1) as u16
}

/// First row to draw so that `focused_row` is visible.
pub fn scroll_for(heights_by_row: &[u16], focused_row: usize, available: u16) -> usize {
    let mut first = 0;
    loop {
        let used: u16 = heights_by_row
            .iter()
            .skip(first)
            .take(focused_row + 1 - first)
            .sum();
        if used <= available || first >= focused_row {
            return first;
        }
        first += 1;
    }
}

/// Row heights for `heights` laid out in `columns`.
pub fn row_heights(heights: &[u16], columns: usize) -> Vec<u16> {
    heights
        .chunks(columns.max(1))
        .map(|row| row.iter().copied().max().unwrap_or(0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_follow_width() {
        assert_eq!(columns_for_width(60), 1);
        assert_eq!(columns_for_width(80), 2);
        assert_eq!(columns_for_width(200), 3);
    }

    #[test]
    fn test_status_strip_when_narrow() {
        let (status, grid) = split_content(Rect::new(0, 0, 70, 20));
        assert_eq!(status, StatusArea::Strip(Rect::new(0, 0, 70, STATUS_STRIP_HEIGHT)));
        assert_eq!(grid, Rect::new(0, STATUS_STRIP_HEIGHT, 70, 20 - STATUS_STRIP_HEIGHT));

        let (status, grid) = split_content(Rect::new(0, 0, 120, 20));
        assert_eq!(status, StatusArea::Column(Rect::new(0, 0, STATUS_COLUMN_WIDTH, 20)));
        assert_eq!(grid.x, STATUS_COLUMN_WIDTH);
    }

    #[test]
    fn test_grid_rows_use_tallest_card() {
        let g = grid(Rect::new(0, 0, 100, 30), &[4, 6, 5], 2, 0);
        assert_eq!(g.cells[0], Some(Rect::new(0, 0, 50, 6)));
        assert_eq!(g.cells[1], Some(Rect::new(50, 0, 50, 6)));
        assert_eq!(g.cells[2], Some(Rect::new(0, 6, 50, 5)));
    }

    #[test]
    fn test_grid_drops_rows_that_do_not_fit() {
        let g = grid(Rect::new(0, 0, 40, 10), &[6, 6, 6], 1, 1);
        assert_eq!(g.cells[0], None);
        assert_eq!(g.cells[1], Some(Rect::new(0, 0, 40, 6)));
        assert_eq!(g.cells[2], None);
    }

    #[test]
    fn test_scroll_keeps_focus_visible() {
        let rows = [6, 6, 6, 6];
        assert_eq!(scroll_for(&rows, 0, 10), 0);
        assert_eq!(scroll_for(&rows, 1, 12), 0);
        assert_eq!(scroll_for(&rows, 3, 12), 2);
        // A row taller than the area still becomes the first row.
        assert_eq!(scroll_for(&[30], 0, 10), 0);
    }
}
