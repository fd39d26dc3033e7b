//! The card model shared by every data source, and its rendering.
//!
//! A card builder turns query states into a [`CardView`]; [`render`] draws
//! it. Builders never touch the terminal, so they are tested on their own.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Theme;
use crate::data::Tone;
use crate::error::GENERIC_ERROR;
use crate::query::{QueryKey, QueryState};

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Width of an inline gauge bar, in cells.
const GAUGE_WIDTH: usize = 20;

/// A run of text with an optional emphasis.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub tone: Option<Tone>,
    pub strong: bool,
    pub dim: bool,
}

impl Fragment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
            strong: false,
            dim: false,
        }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            strong: true,
            ..Self::plain(text)
        }
    }

    pub fn dim(text: impl Into<String>) -> Self {
        Self {
            dim: true,
            ..Self::plain(text)
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            tone: Some(tone),
            ..Self::plain(text)
        }
    }
}

/// One line of card content.
#[derive(Debug, Clone, PartialEq)]
pub enum CardLine {
    Text(Vec<Fragment>),
    /// Horizontal bar filled to `ratio` (0.0..=1.0).
    Gauge { ratio: f64, label: String, tone: Tone },
    /// Inline bar chart, oldest value first.
    Sparkline { label: String, values: Vec<u64> },
    Blank,
}

impl CardLine {
    pub fn text(text: impl Into<String>) -> Self {
        CardLine::Text(vec![Fragment::plain(text)])
    }

    /// `label` followed by a bold `value`.
    pub fn pair(label: impl Into<String>, value: impl Into<String>) -> Self {
        CardLine::Text(vec![
            Fragment::plain(format!("{} ", label.into())),
            Fragment::strong(value),
        ])
    }

    pub fn headline(text: impl Into<String>) -> Self {
        CardLine::Text(vec![Fragment::strong(text)])
    }

    /// Plain text of the line, as used by tests and the export.
    pub fn plain_text(&self) -> String {
        match self {
            CardLine::Text(fragments) => fragments.iter().map(|f| f.text.as_str()).collect(),
            CardLine::Gauge { ratio, label, .. } => format!("{} {}", gauge_bar(*ratio), label),
            CardLine::Sparkline { label, values } => {
                format!("{} {}", label, sparkline_chars(values))
            }
            CardLine::Blank => String::new(),
        }
    }
}

/// What a card shows: exactly one of placeholder, error or content.
#[derive(Debug, Clone, PartialEq)]
pub enum CardBody {
    /// Query still pending; the number of placeholder rows.
    Skeleton(u16),
    Error { headline: String, detail: String },
    Content(Vec<CardLine>),
}

/// Everything needed to draw one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: String,
    pub icon: &'static str,
    pub link: Option<String>,
    /// Short value next to the title, e.g. the number of active streams.
    pub badge: Option<String>,
    pub body: CardBody,
    /// Queries that feed this card, for the detail overlay.
    pub sources: Vec<QueryKey>,
}

impl CardView {
    pub fn new(title: impl Into<String>, icon: &'static str) -> Self {
        Self {
            title: title.into(),
            icon,
            link: None,
            badge: None,
            body: CardBody::Skeleton(1),
            sources: Vec::new(),
        }
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    pub fn badge(mut self, badge: Option<String>) -> Self {
        self.badge = badge;
        self
    }

    pub fn source(mut self, key: &QueryKey) -> Self {
        self.sources.push(key.clone());
        self
    }

    pub fn body(mut self, body: CardBody) -> Self {
        self.body = body;
        self
    }

    /// Body from a single query: pending shows `skeleton_rows` placeholders,
    /// an error shows the generic headline with the message, a success is
    /// passed to `content`.
    pub fn from_state<T>(
        self,
        state: &QueryState<T>,
        skeleton_rows: u16,
        content: impl FnOnce(&T) -> Vec<CardLine>,
    ) -> Self {
        let body = match state {
            QueryState::Pending => CardBody::Skeleton(skeleton_rows),
            QueryState::Error(message) => error_body(message),
            QueryState::Success(data) => CardBody::Content(content(data)),
        };
        self.body(body)
    }

    /// Rows the body needs, not counting the border.
    pub fn body_height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(2).max(1) as usize;
        match &self.body {
            CardBody::Skeleton(rows) => *rows,
            CardBody::Error { detail, .. } => wrapped_rows(detail, inner).saturating_add(1),
            CardBody::Content(lines) => lines
                .iter()
                .map(|l| wrapped_rows(&l.plain_text(), inner))
                .fold(0u16, u16::saturating_add)
                .max(1),
        }
    }

    /// Full height including borders.
    pub fn height(&self, width: u16) -> u16 {
        self.body_height(width).saturating_add(2)
    }

    /// All body text, one entry per line.
    pub fn body_text(&self) -> Vec<String> {
        match &self.body {
            CardBody::Skeleton(rows) => vec![String::new(); *rows as usize],
            CardBody::Error { headline, detail } => vec![headline.clone(), detail.clone()],
            CardBody::Content(lines) => lines.iter().map(CardLine::plain_text).collect(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.body, CardBody::Skeleton(_))
    }
}

pub fn error_body(message: &str) -> CardBody {
    CardBody::Error {
        headline: GENERIC_ERROR.to_string(),
        detail: message.to_string(),
    }
}

fn wrapped_rows(text: &str, width: usize) -> u16 {
    let rows = text.chars().count().div_ceil(width).max(1);
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn gauge_bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * GAUGE_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(GAUGE_WIDTH - filled))
}

/// Scale values to the eight bar heights; the tallest value gets the full
/// bar.
fn sparkline_chars(values: &[u64]) -> String {
    let max = values.iter().copied().max().unwrap_or(0).max(1);
    values
        .iter()
        .map(|&v| {
            let level = (v as f64 / max as f64 * 7.0).round() as usize;
            SPARKLINE_CHARS[level.min(7)]
        })
        .collect()
}

fn fragment_style(theme: &Theme, fragment: &Fragment) -> Style {
    let mut style = fragment
        .tone
        .map(|t| theme.tone_style(t))
        .unwrap_or_default();
    if fragment.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if fragment.dim {
        style = style.add_modifier(Modifier::DIM);
    }
    style
}

fn to_line<'a>(theme: &Theme, line: &'a CardLine) -> Line<'a> {
    match line {
        CardLine::Text(fragments) => Line::from(
            fragments
                .iter()
                .map(|f| Span::styled(f.text.as_str(), fragment_style(theme, f)))
                .collect::<Vec<_>>(),
        ),
        CardLine::Gauge { ratio, label, tone } => Line::from(vec![
            Span::styled(gauge_bar(*ratio), theme.tone_style(*tone)),
            Span::raw(" "),
            Span::raw(label.as_str()),
        ]),
        CardLine::Sparkline { label, values } => Line::from(vec![
            Span::styled(format!("{} ", label), Style::default().add_modifier(Modifier::DIM)),
            Span::styled(sparkline_chars(values), Style::default().fg(theme.highlight)),
        ]),
        CardLine::Blank => Line::from(""),
    }
}

/// Title line: icon, title (underlined with a marker when linked), badge.
fn title_line<'a>(theme: &Theme, card: &'a CardView) -> Line<'a> {
    let mut spans = vec![Span::raw(format!(" {} ", card.icon))];
    if card.link.is_some() {
        spans.push(Span::styled(card.title.as_str(), theme.header.patch(theme.link_style())));
        spans.push(Span::styled(" ↗", Style::default().fg(theme.highlight)));
    } else {
        spans.push(Span::styled(card.title.as_str(), theme.header));
    }
    if let Some(badge) = &card.badge {
        spans.push(Span::styled(
            format!(" [{}]", badge),
            Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

/// Draw `card` into `area`; a focused card gets a highlighted border.
pub fn render(frame: &mut Frame, theme: &Theme, card: &CardView, focused: bool, area: Rect) {
    let border_style = if focused {
        Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border)
    };

    let block = Block::default()
        .title(title_line(theme, card))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(border_style);

    let lines: Vec<Line> = match &card.body {
        CardBody::Skeleton(rows) => {
            let width = area.width.saturating_sub(2) as usize;
            (0..*rows)
                .map(|_| Line::from(Span::styled("░".repeat(width), theme.skeleton)))
                .collect()
        }
        CardBody::Error { headline, detail } => vec![
            Line::from(Span::styled(
                headline.as_str(),
                Style::default().fg(theme.critical).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(detail.as_str(), Style::default().add_modifier(Modifier::DIM))),
        ],
        CardBody::Content(lines) => lines.iter().map(|l| to_line(theme, l)).collect(),
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
