//! Recent public GitHub activity for one user.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{check_url, SchemaError, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubEventSummary {
    pub events: Vec<GithubEvent>,
    /// Event type to number of occurrences.
    pub events_seen: BTreeMap<String, u32>,
    pub repos_seen: Vec<GithubRepo>,
    pub contributions: Contributions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub commits: u32,
    pub repo: GithubRepo,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GithubRepo {
    pub id: u64,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributions {
    #[serde(default)]
    pub own_projects: u32,
    #[serde(default)]
    pub oss_projects: u32,
}

impl GithubEventSummary {
    pub fn total_commits(&self) -> u32 {
        self.events.iter().map(|e| e.commits).sum()
    }
}

impl Validate for GithubEventSummary {
    fn validate(&self) -> Result<(), SchemaError> {
        for repo in self.repos_seen.iter().chain(self.events.iter().map(|e| &e.repo)) {
            check_url("repo.url", &repo.url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_event_summary() {
        let body = r#"{
            "events": [
                {"id": "1", "type": "PushEvent", "commits": 3,
                 "repo": {"id": 7, "name": "me/dash", "url": "https://api.github.com/repos/me/dash"},
                 "created_at": "2024-05-01T10:00:00Z"},
                {"id": "2", "type": "WatchEvent",
                 "repo": {"id": 8, "name": "rust-lang/rust", "url": "https://api.github.com/repos/rust-lang/rust"},
                 "created_at": "2024-05-01T11:00:00Z"}
            ],
            "events_seen": {"PushEvent": 1, "WatchEvent": 1},
            "repos_seen": [],
            "contributions": {"own_projects": 1}
        }"#;
        let s: GithubEventSummary = serde_json::from_str(body).unwrap();
        s.validate().unwrap();
        assert_eq!(s.total_commits(), 3);
        assert_eq!(s.contributions.oss_projects, 0);
        assert_eq!(s.events_seen["PushEvent"], 1);
    }
}
