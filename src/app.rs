//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};
use ratatui::layout::Rect;

use crate::dashboard::{ChipView, Dashboard, DashboardView};
use crate::query::QueryKey;
use crate::ui::card::CardView;
use crate::ui::Theme;

/// How long a status bar message stays up.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Which part of the screen arrow keys move through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The chip columns (or strip) of service health.
    Status,
    /// The card grid.
    Cards,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    pub dashboard: Dashboard,
    /// Rebuilt from the cache on every [`App::refresh`].
    pub view: DashboardView,

    // Navigation state
    pub focus: Focus,
    pub selected_chip: usize,
    pub selected_card: usize,
    /// Card columns at the last draw; vertical moves step by this.
    pub columns: usize,
    /// Area below the header and above the status bar at the last draw.
    pub content_area: Rect,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(dashboard: Dashboard, theme: Theme) -> Self {
        let view = dashboard.view(Utc::now());
        Self {
            running: true,
            show_help: false,
            show_detail_overlay: false,
            dashboard,
            view,
            focus: Focus::Cards,
            selected_chip: 0,
            selected_card: 0,
            columns: 1,
            content_area: Rect::default(),
            theme,
            status_message: None,
        }
    }

    /// Pull the latest query states into the view.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.dashboard.record_history();
        self.view = self.dashboard.view(now);

        // Clamp selection indices
        self.selected_card = self.selected_card.min(self.view.cards.len().saturating_sub(1));
        self.selected_chip = self.selected_chip.min(self.view.chips.len().saturating_sub(1));
    }

    /// Record the layout of the frame just drawn.
    pub fn set_layout(&mut self, content_area: Rect, columns: usize) {
        self.content_area = content_area;
        self.columns = columns.max(1);
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    pub fn focused_card(&self) -> Option<&CardView> {
        match self.focus {
            Focus::Cards => self.view.cards.get(self.selected_card),
            Focus::Status => None,
        }
    }

    pub fn focused_chip(&self) -> Option<&ChipView> {
        match self.focus {
            Focus::Status => self.view.chips.get(self.selected_chip),
            Focus::Cards => None,
        }
    }

    /// Queries behind whatever has focus.
    pub fn focused_sources(&self) -> Vec<QueryKey> {
        if let Some(card) = self.focused_card() {
            card.sources.clone()
        } else if let Some(chip) = self.focused_chip() {
            chip.source.iter().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Title of the focused card or label of the focused chip.
    pub fn focus_label(&self) -> &str {
        if let Some(card) = self.focused_card() {
            &card.title
        } else if let Some(chip) = self.focused_chip() {
            &chip.chip.label
        } else {
            ""
        }
    }

    /// Time since the freshest completed fetch behind the focus.
    pub fn focused_age(&self) -> Option<Duration> {
        self.focused_sources()
            .iter()
            .filter_map(|key| self.dashboard.info(key)?.age())
            .min()
    }

    /// Move focus down: one chip, or one row of cards.
    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Status => {
                let max = self.view.chips.len().saturating_sub(1);
                self.selected_chip = (self.selected_chip + 1).min(max);
            }
            Focus::Cards => {
                let max = self.view.cards.len().saturating_sub(1);
                self.selected_card = (self.selected_card + self.columns).min(max);
            }
        }
    }

    /// Move focus up: one chip, or one row of cards.
    pub fn select_prev(&mut self) {
        match self.focus {
            Focus::Status => self.selected_chip = self.selected_chip.saturating_sub(1),
            Focus::Cards => {
                if self.selected_card >= self.columns {
                    self.selected_card -= self.columns;
                }
            }
        }
    }

    /// Previous card; from the first column, over to the chips.
    pub fn select_left(&mut self) {
        if self.focus != Focus::Cards {
            return;
        }
        if self.selected_card % self.columns == 0 {
            self.focus = Focus::Status;
        } else {
            self.selected_card -= 1;
        }
    }

    /// Next card; from the chips, over to the grid.
    pub fn select_right(&mut self) {
        match self.focus {
            Focus::Status => self.focus = Focus::Cards,
            Focus::Cards => {
                let max = self.view.cards.len().saturating_sub(1);
                self.selected_card = (self.selected_card + 1).min(max);
            }
        }
    }

    /// Jump to the first item in the focused area.
    pub fn select_first(&mut self) {
        match self.focus {
            Focus::Status => self.selected_chip = 0,
            Focus::Cards => self.selected_card = 0,
        }
    }

    /// Jump to the last item in the focused area.
    pub fn select_last(&mut self) {
        match self.focus {
            Focus::Status => self.selected_chip = self.view.chips.len().saturating_sub(1),
            Focus::Cards => self.selected_card = self.view.cards.len().saturating_sub(1),
        }
    }

    /// Switch between the chip columns and the card grid.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Status => Focus::Cards,
            Focus::Cards => Focus::Status,
        };
    }

    /// Open the detail overlay for whatever has focus.
    pub fn enter_detail(&mut self) {
        self.show_detail_overlay = true;
    }

    /// Navigate back: close overlays first, then return to the grid.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
        } else if self.focus == Focus::Status {
            self.focus = Focus::Cards;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Invalidate every query; pollers fetch again right away.
    pub fn refetch(&mut self) {
        self.dashboard.refetch_all();
        self.set_status_message("Refetching all queries".to_string());
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current view and cache to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let export = self.dashboard.export(Utc::now());
        let json = serde_json::to_string_pretty(&export)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
