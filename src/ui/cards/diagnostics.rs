//! Per-server CPU, memory, disk and temperature table.

use homelab_types::DiagnosticsSnapshot;

use crate::data::units::celsius_to_fahrenheit;
use crate::data::Tone;
use crate::error::GENERIC_ERROR;
use crate::query::QueryState;
use crate::ui::card::{CardBody, CardLine, CardView, Fragment};

/// One row of the table.
pub struct ServerRow<'a> {
    pub name: &'a str,
    pub state: &'a QueryState<DiagnosticsSnapshot>,
    /// Average CPU history, oldest first.
    pub trend: Vec<u64>,
}

fn columns(server: &str, max: &str, avg: &str, mem: &str, disk: &str, temp: &str) -> String {
    format!(
        "{:<8}{:>9}{:>9}{:>8}{:>8}{:>8}",
        server, max, avg, mem, disk, temp
    )
}

fn value_row(name: &str, d: &DiagnosticsSnapshot) -> CardLine {
    let pct = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.2}%", v));
    let temp = d
        .cpu
        .temp
        .map(|c| format!("{:.1}°F", celsius_to_fahrenheit(c)))
        .unwrap_or_default();
    CardLine::text(columns(
        name,
        &pct(d.cpu_max()),
        &pct(d.cpu_avg()),
        &format!("{:.1}%", d.memory.percent),
        &format!("{:.1}%", d.disk.percent),
        &temp,
    ))
}

/// Each server row fails or loads on its own; the card only shows a
/// skeleton while every row is still pending.
pub fn card(rows: &[ServerRow]) -> CardView {
    let view = CardView::new("Diagnostics", "▦");
    if rows.iter().all(|r| r.state.is_pending()) {
        return view.body(CardBody::Skeleton(rows.len() as u16 + 1));
    }

    let mut lines = vec![CardLine::Text(vec![Fragment::strong(columns(
        "Server",
        "CPU max",
        "CPU avg",
        "Memory",
        "Disk",
        "Temp",
    ))])];

    for row in rows {
        lines.push(match row.state {
            QueryState::Pending => CardLine::Text(vec![
                Fragment::plain(format!("{:<8}", row.name)),
                Fragment::dim("░".repeat(24)),
            ]),
            QueryState::Error(_) => CardLine::Text(vec![
                Fragment::plain(format!("{:<8}", row.name)),
                Fragment::toned(GENERIC_ERROR, Tone::Error),
            ]),
            QueryState::Success(d) => value_row(row.name, d),
        });
    }

    for row in rows.iter().filter(|r| !r.trend.is_empty()) {
        lines.push(CardLine::Sparkline {
            label: format!("{:<8}CPU", row.name),
            values: row.trend.clone(),
        });
    }

    view.body(CardBody::Content(lines))
}
