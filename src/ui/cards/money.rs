//! Portfolio, net worth and home equity cards.

use homelab_types::{InvestmentSummary, MoneyAccounts};

use crate::data::format::usd;
use crate::data::money::{Equity, GroupTotal, NetWorth};
use crate::data::Tone;
use crate::query::QueryState;
use crate::ui::card::{CardLine, CardView, Fragment};

pub const ACCOUNTS_URL: &str = "https://app.monarchmoney.com/accounts";

pub fn portfolio(state: &QueryState<InvestmentSummary>) -> CardView {
    CardView::new("Portfolio", "$")
        .link(ACCOUNTS_URL)
        .from_state(state, 2, |p| {
            let (arrow, tone) = if p.is_trending_up() {
                ("▲", Tone::Success)
            } else {
                ("▼", Tone::Error)
            };
            let change = match p.change_percent() {
                Some(pct) => format!("{} ({:.1}%)", usd(p.one_day_change_dollars), pct),
                None => usd(p.one_day_change_dollars),
            };
            vec![
                CardLine::Text(vec![
                    Fragment::strong(usd(p.total_value)),
                    Fragment::plain(" "),
                    Fragment::toned(arrow, tone),
                ]),
                CardLine::Text(vec![Fragment::toned(change, tone), Fragment::dim(" Today")]),
            ]
        })
}

fn group_lines(group: &GroupTotal) -> Vec<CardLine> {
    let mut lines = vec![CardLine::pair(format!("{:<14}", group.label()), usd(group.total))];
    lines.extend(group.types.iter().map(|t| {
        CardLine::Text(vec![Fragment::dim(format!(
            "  {:<12} {}",
            t.display,
            usd(t.balance)
        ))])
    }));
    lines
}

/// Assets minus liabilities, with each account type listed under its side.
pub fn net_worth(state: &QueryState<MoneyAccounts>) -> CardView {
    CardView::new("Net Worth", "Σ")
        .link(ACCOUNTS_URL)
        .from_state(state, 3, |accounts| {
            let nw = NetWorth::from_accounts(accounts);
            let tone = if nw.net < 0.0 { Tone::Error } else { Tone::Success };
            let mut lines = vec![CardLine::Text(vec![Fragment {
                strong: true,
                ..Fragment::toned(usd(nw.net), tone)
            }])];
            lines.extend(group_lines(&nw.assets));
            lines.extend(group_lines(&nw.liabilities));
            lines
        })
}

pub fn equity(state: &QueryState<MoneyAccounts>) -> CardView {
    CardView::new("Equity", "⌂")
        .link(ACCOUNTS_URL)
        .from_state(state, 3, |accounts| {
            let e = Equity::from_accounts(accounts);
            let mut lines = vec![
                CardLine::headline(usd(e.equity())),
                CardLine::pair(format!("{:<12}", "Home Value"), usd(e.home_value)),
                CardLine::pair(format!("{:<12}", "Mortgage"), usd(e.mortgage)),
            ];
            if e.home_value > 0.0 {
                let owned = (e.equity() / e.home_value).clamp(0.0, 1.0);
                lines.push(CardLine::Gauge {
                    ratio: owned,
                    label: format!("{:.0}% owned", owned * 100.0),
                    tone: Tone::Success,
                });
            }
            lines
        })
}
