//! Daily active users from the site analytics service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{SchemaError, Validate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveUsersPerDay {
    /// Oldest first.
    #[serde(default)]
    pub per_day: Vec<ActiveUsersDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveUsersDay {
    pub active_users: u64,
    pub date: NaiveDate,
}

impl ActiveUsersPerDay {
    /// Sum over the most recent `days` entries.
    pub fn last_days(&self, days: usize) -> u64 {
        let skip = self.per_day.len().saturating_sub(days);
        self.per_day[skip..].iter().map(|d| d.active_users).sum()
    }

    pub fn today(&self) -> Option<u64> {
        self.per_day.last().map(|d| d.active_users)
    }

    pub fn total(&self) -> u64 {
        self.last_days(self.per_day.len())
    }
}

impl Validate for ActiveUsersPerDay {
    fn validate(&self) -> Result<(), SchemaError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[u64]) -> ActiveUsersPerDay {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ActiveUsersPerDay {
            per_day: values
                .iter()
                .enumerate()
                .map(|(i, v)| ActiveUsersDay {
                    active_users: *v,
                    date: start + chrono::Duration::days(i as i64),
                })
                .collect(),
        }
    }

    #[test]
    fn windows_sum_most_recent_days() {
        let s = series(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 5]);
        assert_eq!(s.today(), Some(5));
        assert_eq!(s.last_days(7), 11);
        assert_eq!(s.last_days(30), 14);
        assert_eq!(s.total(), 14);
    }

    #[test]
    fn empty_series() {
        let s: ActiveUsersPerDay = serde_json::from_str("{}").unwrap();
        assert_eq!(s.today(), None);
        assert_eq!(s.last_days(7), 0);
    }

    #[test]
    fn decodes_iso_dates() {
        let s: ActiveUsersPerDay = serde_json::from_str(
            r#"{"per_day": [{"active_users": 3, "date": "2024-02-29"}]}"#,
        )
        .unwrap();
        assert_eq!(s.per_day[0].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
