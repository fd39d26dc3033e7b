//! LeetCode progress: solved counts, per-difficulty bars, languages.

use homelab_types::{DifficultyStats, LeetCodeLanguages, LeetCodeSolvedSummary};

use crate::data::Tone;
use crate::query::QueryState;
use crate::ui::card::{error_body, CardBody, CardLine, CardView, Fragment};

fn difficulty_tone(label: &str) -> Tone {
    match label {
        "Easy" => Tone::Success,
        "Medium" => Tone::Warning,
        _ => Tone::Error,
    }
}

fn difficulty_lines(label: &str, stats: &DifficultyStats) -> Vec<CardLine> {
    let mut head = vec![
        Fragment::toned(format!("{:<7}", label), difficulty_tone(label)),
        Fragment::strong(format!("{} / {}", stats.solved, stats.total)),
    ];
    if let Some(beats) = stats.beats_percent {
        head.push(Fragment::dim(format!("  Beats {:.2}%", beats)));
    }
    vec![
        CardLine::Text(head),
        CardLine::Gauge {
            ratio: stats.solved_percent / 100.0,
            label: format!("{:.1}%", stats.solved_percent),
            tone: difficulty_tone(label),
        },
    ]
}

/// Language usage as `name (count)` chips, wrapped by the card.
fn language_line(languages: &LeetCodeLanguages) -> CardLine {
    let mut fragments = Vec::new();
    for (i, lang) in languages.languages.iter().enumerate() {
        if i > 0 {
            fragments.push(Fragment::plain("  "));
        }
        fragments.push(Fragment::plain(format!("{} ", lang.language_name)));
        fragments.push(Fragment::strong(format!("({})", lang.problems_solved)));
    }
    CardLine::Text(fragments)
}

/// The solved summary drives the card; languages are appended once they
/// arrive and a language failure only drops that line.
pub fn card(
    solved: &QueryState<LeetCodeSolvedSummary>,
    languages: &QueryState<LeetCodeLanguages>,
    profile_url: String,
) -> CardView {
    let view = CardView::new("LeetCode", "λ").link(profile_url);
    let summary = match solved {
        QueryState::Pending => return view.body(CardBody::Skeleton(7)),
        QueryState::Error(message) => return view.body(error_body(message)),
        QueryState::Success(summary) => summary,
    };

    let mut lines = vec![CardLine::Text(vec![
        Fragment::strong(format!("{} / {}", summary.all.solved, summary.all.total)),
        Fragment::dim(" solved"),
    ])];
    for (label, stats) in summary.by_difficulty() {
        lines.extend(difficulty_lines(label, stats));
    }
    match languages {
        QueryState::Success(langs) if !langs.languages.is_empty() => {
            lines.push(language_line(langs));
        }
        QueryState::Pending => lines.push(CardLine::Text(vec![Fragment::dim("░".repeat(12))])),
        _ => {}
    }
    view.body(CardBody::Content(lines))
}
