//! Service-health chips.

use homelab_types::ServiceStatus;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Theme;

/// Visual class of a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipVariant {
    Success,
    Alert,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChip {
    pub label: String,
    pub status: ServiceStatus,
    pub url: Option<String>,
}

impl StatusChip {
    pub fn new(label: impl Into<String>, status: ServiceStatus) -> Self {
        Self {
            label: label.into(),
            status,
            url: None,
        }
    }

    /// Attach a link; an empty URL leaves the chip unlinked.
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url.filter(|u| !u.is_empty());
        self
    }

    pub fn variant(&self) -> ChipVariant {
        match self.status {
            ServiceStatus::Ok => ChipVariant::Success,
            ServiceStatus::Warning | ServiceStatus::Error => ChipVariant::Alert,
            ServiceStatus::Loading => ChipVariant::Neutral,
        }
    }

    /// Check mark, error mark or an empty circle while loading.
    pub fn icon(&self) -> &'static str {
        match self.variant() {
            ChipVariant::Success => "✔",
            ChipVariant::Alert => "✖",
            ChipVariant::Neutral => "○",
        }
    }

    pub fn is_link(&self) -> bool {
        self.url.is_some()
    }

    fn style(&self, theme: &Theme) -> Style {
        match self.variant() {
            ChipVariant::Success => Style::default().fg(theme.healthy),
            // Warning and error share the alert styling; the colour still
            // tells them apart.
            ChipVariant::Alert => theme.status_style(self.status),
            ChipVariant::Neutral => Style::default().add_modifier(Modifier::DIM),
        }
    }

    pub fn line(&self, theme: &Theme) -> Line<'_> {
        let style = self.style(theme);
        let mut spans = vec![Span::styled(format!("{} ", self.icon()), style)];
        if self.is_link() {
            spans.push(Span::styled(
                self.label.as_str(),
                style.add_modifier(Modifier::UNDERLINED),
            ));
            spans.push(Span::styled(" ↗", Style::default().fg(theme.highlight)));
        } else {
            spans.push(Span::styled(self.label.as_str(), style));
        }
        Line::from(spans)
    }
}

/// Draw a titled column of chips; `focused` is the index within `chips`.
pub fn render_column(
    frame: &mut Frame,
    theme: &Theme,
    title: &str,
    chips: &[&StatusChip],
    focused: Option<usize>,
    area: Rect,
) {
    let lines: Vec<Line> = chips
        .iter()
        .enumerate()
        .map(|(i, chip)| {
            let line = chip.line(theme);
            if focused == Some(i) {
                line.patch_style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                line
            }
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), theme.header))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_for_every_status() {
        let cases = [
            (ServiceStatus::Ok, ChipVariant::Success, "✔"),
            (ServiceStatus::Warning, ChipVariant::Alert, "✖"),
            (ServiceStatus::Error, ChipVariant::Alert, "✖"),
            (ServiceStatus::Loading, ChipVariant::Neutral, "○"),
        ];
        for (status, variant, icon) in cases {
            let chip = StatusChip::new("Cache", status);
            assert_eq!(chip.variant(), variant, "{status}");
            assert_eq!(chip.icon(), icon, "{status}");
        }
    }

    #[test]
    fn test_link_only_when_url_given() {
        let plain = StatusChip::new("Cache", ServiceStatus::Ok);
        assert!(!plain.is_link());

        let empty = StatusChip::new("Traefik", ServiceStatus::Ok).with_url(Some(String::new()));
        assert!(!empty.is_link());

        let linked = StatusChip::new("Pi-hole", ServiceStatus::Ok)
            .with_url(Some("http://192.168.1.10/admin/".into()));
        assert!(linked.is_link());

        let theme = Theme::dark();
        let text: String = linked
            .line(&theme)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "✔ Pi-hole ↗");
        assert!(linked.line(&theme).spans[1]
            .style
            .add_modifier
            .contains(Modifier::UNDERLINED));
    }
}
