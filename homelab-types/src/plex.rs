//! Plex media server sessions and library counts.

use serde::{Deserialize, Serialize};

use crate::{check_percent, SchemaError, Validate};

/// Currently active streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlexSessions {
    pub count: u32,
    pub sessions: Vec<PlexSession>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlexSession {
    pub username: String,
    pub title: String,
    pub media_type: MediaType,
    /// Show name, for episodes.
    #[serde(default)]
    pub grandparent_title: Option<String>,
    /// Season name, for episodes.
    #[serde(default)]
    pub parent_title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub thumb: Option<String>,
    pub player: PlexPlayer,
    pub progress_percent: f64,
    pub duration_ms: u64,
    pub view_offset_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Episode,
    Track,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlexPlayer {
    pub title: String,
    pub platform: String,
    pub product: String,
    pub state: PlayerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Playing,
    Paused,
    Buffering,
    #[serde(other)]
    Other,
}

impl PlexSession {
    /// "Show - Episode" for episodes with a known show, otherwise the title.
    pub fn display_title(&self) -> String {
        match (&self.media_type, &self.grandparent_title) {
            (MediaType::Episode, Some(show)) => format!("{} - {}", show, self.title),
            _ => self.title.clone(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.player.state == PlayerState::Playing
    }
}

impl Validate for PlexSessions {
    fn validate(&self) -> Result<(), SchemaError> {
        for s in &self.sessions {
            check_percent("sessions.progress_percent", s.progress_percent)?;
        }
        Ok(())
    }
}

/// Item counts per library section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlexLibrary {
    pub total_items: u64,
    pub sections: Vec<LibrarySection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibrarySection {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Movie,
    Show,
    Artist,
    Photo,
    #[serde(other)]
    Other,
}

impl Validate for PlexLibrary {
    fn validate(&self) -> Result<(), SchemaError> {
        Ok(())
    }
}
