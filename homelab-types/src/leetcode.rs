//! LeetCode solved-problem statistics.

use serde::{Deserialize, Serialize};

use crate::{check_percent, SchemaError, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeetCodeSolvedSummary {
    pub all: DifficultyStats,
    pub easy: DifficultyStats,
    pub medium: DifficultyStats,
    pub hard: DifficultyStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub total: u32,
    pub solved: u32,
    pub solved_percent: f64,
    /// Share of users this account beats; not reported for `all`.
    #[serde(default)]
    pub beats_percent: Option<f64>,
}

impl LeetCodeSolvedSummary {
    /// Easy, medium and hard with their labels, in display order.
    pub fn by_difficulty(&self) -> [(&'static str, &DifficultyStats); 3] {
        [
            ("Easy", &self.easy),
            ("Medium", &self.medium),
            ("Hard", &self.hard),
        ]
    }
}

impl Validate for LeetCodeSolvedSummary {
    fn validate(&self) -> Result<(), SchemaError> {
        for stats in [&self.all, &self.easy, &self.medium, &self.hard] {
            check_percent("solved_percent", stats.solved_percent)?;
            if let Some(beats) = stats.beats_percent {
                check_percent("beats_percent", beats)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeetCodeLanguages {
    pub languages: Vec<LanguageStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStat {
    pub language_name: String,
    pub problems_solved: u32,
}

impl Validate for LeetCodeLanguages {
    fn validate(&self) -> Result<(), SchemaError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str = r#"{
        "all": {"total": 3000, "solved": 300, "solved_percent": 10.0},
        "easy": {"total": 800, "solved": 150, "solved_percent": 18.75, "beats_percent": 70.1},
        "medium": {"total": 1600, "solved": 130, "solved_percent": 8.1, "beats_percent": 80.2},
        "hard": {"total": 600, "solved": 20, "solved_percent": 3.3, "beats_percent": null}
    }"#;

    #[test]
    fn beats_percent_is_optional() {
        let s: LeetCodeSolvedSummary = serde_json::from_str(SOLVED).unwrap();
        s.validate().unwrap();
        assert_eq!(s.all.beats_percent, None);
        assert_eq!(s.hard.beats_percent, None);
        assert_eq!(s.by_difficulty()[1].1.solved, 130);
    }

    #[test]
    fn rejects_out_of_range_beats() {
        let body = SOLVED.replace("70.1", "170.1");
        let s: LeetCodeSolvedSummary = serde_json::from_str(&body).unwrap();
        assert!(s.validate().is_err());
    }

    #[test]
    fn decodes_camel_case_languages() {
        let l: LeetCodeLanguages = serde_json::from_str(
            r#"{"languages": [{"languageName": "Rust", "problemsSolved": 42}]}"#,
        )
        .unwrap();
        assert_eq!(l.languages[0].language_name, "Rust");
        assert_eq!(l.languages[0].problems_solved, 42);
    }
}
