//! Pi-hole query, block list and gravity cards.

use homelab_types::PiholeSummary;

use crate::data::format::{percent, thousands};
use crate::query::QueryState;
use crate::ui::card::{CardLine, CardView, Fragment};

pub fn dns_queries(state: &QueryState<PiholeSummary>) -> CardView {
    CardView::new("DNS Queries", "◎").from_state(state, 2, |s| {
        vec![
            CardLine::headline(thousands(s.sum_queries)),
            CardLine::Text(vec![Fragment::dim(format!(
                "{} total clients",
                s.total_clients
            ))]),
        ]
    })
}

pub fn ads_blocked(state: &QueryState<PiholeSummary>) -> CardView {
    CardView::new("Ads Blocked", "⊘").from_state(state, 2, |s| {
        vec![
            CardLine::headline(thousands(s.sum_blocked)),
            CardLine::Text(vec![Fragment::dim(format!(
                "{} of all queries",
                percent(s.percent_blocked, 2)
            ))]),
        ]
    })
}

pub fn gravity(state: &QueryState<PiholeSummary>) -> CardView {
    CardView::new("Gravity", "☰").from_state(state, 2, |s| {
        vec![
            CardLine::Text(vec![
                Fragment::strong(thousands(s.gravity)),
                Fragment::plain(" domains on block list"),
            ]),
            CardLine::Text(vec![Fragment::dim(format!("{:.2} queries / sec", s.qps))]),
        ]
    })
}
