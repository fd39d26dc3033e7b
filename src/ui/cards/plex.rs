//! Plex active streams and library counts.

use homelab_types::{PlexLibrary, PlexSession, PlexSessions};

use crate::data::format::{clock_duration, thousands};
use crate::data::Tone;
use crate::query::QueryState;
use crate::ui::card::{CardLine, CardView, Fragment};

pub const PLEX_URL: &str = "https://app.plex.tv/desktop";

fn session_lines(s: &PlexSession) -> Vec<CardLine> {
    let (icon, tone) = if s.is_playing() {
        ("▶ ", Tone::Success)
    } else {
        ("‖ ", Tone::Warning)
    };
    vec![
        CardLine::Text(vec![
            Fragment::toned(icon, tone),
            Fragment::strong(s.display_title()),
        ]),
        CardLine::Text(vec![
            Fragment::plain(format!("  {}", s.username)),
            Fragment::dim(format!(" on {} ({})", s.player.title, s.player.platform)),
        ]),
        CardLine::Gauge {
            ratio: s.progress_percent / 100.0,
            label: format!(
                "{} / {}",
                clock_duration(s.view_offset_ms),
                clock_duration(s.duration_ms)
            ),
            tone: Tone::Info,
        },
    ]
}

/// One block per session; the stream count goes in the title badge.
pub fn sessions(state: &QueryState<PlexSessions>) -> CardView {
    let badge = state
        .data()
        .filter(|s| s.count > 0)
        .map(|s| s.count.to_string());
    CardView::new("Active Streams", "▷")
        .link(PLEX_URL)
        .badge(badge)
        .from_state(state, 3, |plex| {
            if plex.count == 0 || plex.sessions.is_empty() {
                return vec![CardLine::Text(vec![Fragment::dim("No active streams")])];
            }
            let mut lines = Vec::new();
            for (i, session) in plex.sessions.iter().enumerate() {
                if i > 0 {
                    lines.push(CardLine::Blank);
                }
                lines.extend(session_lines(session));
            }
            lines
        })
}

pub fn library(state: &QueryState<PlexLibrary>) -> CardView {
    CardView::new("Media Library", "▦")
        .link(PLEX_URL)
        .from_state(state, 3, |lib| {
            let mut lines: Vec<CardLine> = lib
                .sections
                .iter()
                .map(|s| CardLine::pair(format!("{:<16}", s.title), thousands(s.count)))
                .collect();
            lines.push(CardLine::Text(vec![Fragment::dim(format!(
                "{} items in total",
                thousands(lib.total_items)
            ))]));
            lines
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn sessions_state(json: serde_json::Value) -> QueryState<PlexSessions> {
        QueryState::Success(Arc::new(serde_json::from_value(json).unwrap()))
    }

    #[test]
    fn test_no_active_streams() {
        let card = sessions(&sessions_state(serde_json::json!({"count": 0, "sessions": []})));
        assert_eq!(card.body_text(), vec!["No active streams"]);
        assert_eq!(card.badge, None);
        assert_eq!(card.link.as_deref(), Some(PLEX_URL));
    }

    #[test]
    fn test_episode_session() {
        let card = sessions(&sessions_state(serde_json::json!({
            "count": 1,
            "sessions": [{
                "username": "noah", "title": "Pilot", "media_type": "episode",
                "grandparent_title": "Severance",
                "player": {"title": "Living Room", "platform": "tvOS",
                           "product": "Plex for Apple TV", "state": "paused"},
                "progress_percent": 12.5, "duration_ms": 3_723_000u64, "view_offset_ms": 465_000u64
            }]
        })));
        assert_eq!(card.badge.as_deref(), Some("1"));
        let text = card.body_text();
        assert_eq!(text[0], "‖ Severance - Pilot");
        assert_eq!(text[1], "  noah on Living Room (tvOS)");
        assert!(text[2].ends_with("7:45 / 1:02:03"));
    }

    #[test]
    fn test_library_sections_and_total() {
        let lib: PlexLibrary = serde_json::from_value(serde_json::json!({
            "total_items": 2400,
            "sections": [
                {"key": "1", "title": "Movies", "type": "movie", "count": 800},
                {"key": "2", "title": "TV Shows", "type": "show", "count": 1600}
            ]
        }))
        .unwrap();
        let card = library(&QueryState::Success(Arc::new(lib)));
        let text = card.body_text();
        assert_eq!(text[0].split_whitespace().collect::<Vec<_>>(), ["Movies", "800"]);
        assert_eq!(text[2], "2,400 items in total");
    }

    #[test]
    fn test_pending_has_no_badge() {
        let card = sessions(&QueryState::Pending);
        assert!(card.is_loading());
        assert_eq!(card.badge, None);
    }
}
