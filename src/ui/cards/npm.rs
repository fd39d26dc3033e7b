//! npm package downloads and metadata.

use homelab_types::NpmPackageInfo;

use crate::data::format::thousands;
use crate::data::Tone;
use crate::query::QueryState;
use crate::ui::card::{CardLine, CardView, Fragment};

/// A link chip reads as its label; the URL itself is in the detail overlay.
fn chips(info: &NpmPackageInfo) -> CardLine {
    let mut fragments = vec![
        Fragment::plain("Version "),
        Fragment::strong(format!("({})", info.version)),
    ];
    for (label, url) in [("Issues", &info.issues), ("Pulls", &info.pulls)] {
        if url.is_some() {
            fragments.push(Fragment::plain("  "));
            fragments.push(Fragment::toned(format!("{} ↗", label), Tone::Info));
        }
    }
    CardLine::Text(fragments)
}

pub fn card(state: &QueryState<NpmPackageInfo>, package: &str, url: String) -> CardView {
    CardView::new(package, "⬢").link(url).from_state(state, 3, |info| {
        let mut lines = vec![CardLine::Text(vec![
            Fragment::strong(thousands(info.downloads.total_or_sum())),
            Fragment::plain(" / month"),
        ])];
        if info.downloads.per_day.len() >= 2 {
            lines.push(CardLine::Sparkline {
                label: "Daily".to_string(),
                values: info.downloads.per_day.iter().map(|d| d.downloads).collect(),
            });
        }
        lines.push(chips(info));
        if !info.description.is_empty() {
            lines.push(CardLine::Text(vec![Fragment::dim(info.description.clone())]));
        }
        lines
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn info(total: Option<u64>, issues: Option<&str>) -> QueryState<NpmPackageInfo> {
        let json = serde_json::json!({
            "name": "validate-env-vars", "version": "1.4.2",
            "description": "Validate environment variables", "license": "MIT",
            "homepage": "https://github.com/coder/validate-env-vars",
            "repository": "github.com/coder/validate-env-vars",
            "issues": issues, "pulls": null,
            "downloads": {"total": total, "per_day": [
                {"downloads": 100, "day": "2024-01-01"},
                {"downloads": 1150, "day": "2024-01-02"}
            ]}
        });
        QueryState::Success(Arc::new(serde_json::from_value(json).unwrap()))
    }

    #[test]
    fn test_monthly_total_sparkline_and_chips() {
        let card = card(
            &info(Some(4321), Some("https://github.com/coder/validate-env-vars/issues")),
            "validate-env-vars",
            "https://www.npmjs.com/package/validate-env-vars".into(),
        );
        let text = card.body_text();
        assert_eq!(card.title, "validate-env-vars");
        assert_eq!(text[0], "4,321 / month");
        assert!(text[1].starts_with("Daily "));
        assert_eq!(text[2], "Version (1.4.2)  Issues ↗");
        assert_eq!(text[3], "Validate environment variables");
    }

    #[test]
    fn test_missing_total_sums_days() {
        let card = card(&info(None, None), "validate-env-vars", String::new());
        assert_eq!(card.body_text()[0], "1,250 / month");
        assert_eq!(card.body_text()[2], "Version (1.4.2)");
    }
}
