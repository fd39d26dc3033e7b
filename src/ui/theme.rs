//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use homelab_types::ServiceStatus;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::Tone;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights, links and the focused card.
    pub highlight: Color,
    pub warning: Color,
    pub critical: Color,
    pub healthy: Color,
    /// Neutral informational values.
    pub info: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for card titles and table headers.
    pub header: Style,
    /// Placeholder blocks while a query is pending.
    pub skeleton: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            info: Color::LightBlue,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            skeleton: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            info: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            skeleton: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a service status
    pub fn status_style(&self, status: ServiceStatus) -> Style {
        match status {
            ServiceStatus::Ok => Style::default().fg(self.healthy),
            ServiceStatus::Warning => Style::default().fg(self.warning),
            ServiceStatus::Error => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
            ServiceStatus::Loading => Style::default().add_modifier(Modifier::DIM),
        }
    }

    pub fn tone_style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Success => Style::default().fg(self.healthy),
            Tone::Warning => Style::default().fg(self.warning),
            Tone::Error => Style::default().fg(self.critical),
            Tone::Info => Style::default().fg(self.info),
        }
    }

    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::UNDERLINED)
    }
}
