//! Site analytics: active users over several windows.

use homelab_types::ActiveUsersPerDay;

use crate::data::format::thousands;
use crate::query::QueryState;
use crate::ui::card::{CardLine, CardView, Fragment};

pub fn card(state: &QueryState<ActiveUsersPerDay>, site_url: Option<&str>) -> CardView {
    let mut view = CardView::new("Active Users", "☺");
    if let Some(url) = site_url {
        view = view.link(url);
    }
    view.from_state(state, 3, |users| {
        let windows = [
            ("Today", users.today().unwrap_or(0)),
            ("This Week", users.last_days(7)),
            ("Last 30 Days", users.last_days(30)),
            ("This Year", users.total()),
        ];
        let mut lines: Vec<CardLine> = windows
            .iter()
            .map(|(label, n)| CardLine::pair(format!("{:<12}", label), thousands(*n)))
            .collect();
        if users.per_day.len() >= 2 {
            lines.push(CardLine::Sparkline {
                label: "Daily".to_string(),
                values: users.per_day.iter().map(|d| d.active_users).collect(),
            });
        } else if users.per_day.is_empty() {
            lines.push(CardLine::Text(vec![Fragment::dim("No visits recorded")]));
        }
        lines
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_windows_sum_latest_days() {
        let per_day: Vec<_> = (1..=40)
            .map(|d| {
                serde_json::json!({
                    "active_users": d,
                    "date": chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
                        .unwrap()
                        .checked_add_days(chrono::Days::new(d - 1))
                        .unwrap()
                })
            })
            .collect();
        let users: ActiveUsersPerDay =
            serde_json::from_value(serde_json::json!({"per_day": per_day})).unwrap();
        let card = card(&QueryState::Success(Arc::new(users)), Some("https://example.dev"));
        let values: Vec<String> = card
            .body_text()
            .iter()
            .take(4)
            .map(|l| l.split_whitespace().last().unwrap_or_default().to_string())
            .collect();
        // 34..=40, 11..=40, 1..=40
        assert_eq!(values, ["40", "259", "765", "820"]);
        assert!(card.body_text()[4].starts_with("Daily "));
    }

    #[test]
    fn test_empty_series() {
        let card = card(&QueryState::Success(Arc::new(ActiveUsersPerDay::default())), None);
        assert_eq!(card.body_text()[0].split_whitespace().last(), Some("0"));
        assert_eq!(card.body_text()[4], "No visits recorded");
        assert_eq!(card.link, None);
    }
}
