//! Recent GitHub activity.

use homelab_types::GithubEventSummary;

use crate::query::QueryState;
use crate::ui::card::{CardLine, CardView, Fragment};

fn chip(label: &str, value: u32) -> Vec<Fragment> {
    vec![
        Fragment::plain(format!("{} ", label)),
        Fragment::strong(format!("({})", value)),
    ]
}

pub fn card(state: &QueryState<GithubEventSummary>, profile_url: String) -> CardView {
    CardView::new("GitHub", "⌥").link(profile_url).from_state(state, 3, |gh| {
        let mut lines = vec![
            CardLine::Text(chip("OSS Project Contributions", gh.contributions.oss_projects)),
            CardLine::Text(chip("Own Project Contributions", gh.contributions.own_projects)),
            CardLine::Text(vec![
                Fragment::strong(gh.total_commits().to_string()),
                Fragment::dim(format!(" commits across {} repos", gh.repos_seen.len())),
            ]),
        ];
        if !gh.events_seen.is_empty() {
            let mut fragments = Vec::new();
            for (i, (kind, count)) in gh.events_seen.iter().enumerate() {
                if i > 0 {
                    fragments.push(Fragment::plain("  "));
                }
                fragments.extend(chip(kind.trim_end_matches("Event"), *count));
            }
            lines.push(CardLine::Text(fragments));
        }
        lines
    })
}
