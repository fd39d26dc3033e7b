use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Focus};
use crate::ui::grid::{self, Hit};

/// File written by the `e` key, relative to the working directory.
pub const EXPORT_FILE: &str = "dashboard_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Keep the overlay open while moving through items
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Right | KeyCode::Char('l') if app.focus == Focus::Cards => {
                app.select_right()
            }
            KeyCode::Left | KeyCode::Char('h') if app.focus == Focus::Cards => {
                app.select_left()
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),

        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),

        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.select_left(),
        KeyCode::Right | KeyCode::Char('l') => app.select_right(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Enter => app.enter_detail(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('r') => app.refetch(),
        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Click to focus; clicking the focused item opens its detail
        MouseEventKind::Down(MouseButton::Left) => {
            if app.show_detail_overlay {
                return;
            }
            let (focus, index) = match grid::hit(app, mouse.column, mouse.row) {
                Some(Hit::Chip(i)) => (Focus::Status, i),
                Some(Hit::Card(i)) => (Focus::Cards, i),
                None => return,
            };
            let current = match focus {
                Focus::Status => app.selected_chip,
                Focus::Cards => app.selected_card,
            };
            if app.focus == focus && current == index {
                app.enter_detail();
                return;
            }
            app.focus = focus;
            match focus {
                Focus::Status => app.selected_chip = index,
                Focus::Cards => app.selected_card = index,
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}
