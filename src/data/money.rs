//! Derived figures for the money cards.

use homelab_types::{AccountGroup, MoneyAccounts};

/// One account type and its balance.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTotal {
    pub display: String,
    pub balance: f64,
}

/// Totals for one side of the balance sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub group: AccountGroup,
    pub total: f64,
    pub types: Vec<TypeTotal>,
}

impl GroupTotal {
    pub fn label(&self) -> &'static str {
        match self.group {
            AccountGroup::Asset => "Assets",
            AccountGroup::Liability => "Liabilities",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetWorth {
    pub net: f64,
    pub assets: GroupTotal,
    pub liabilities: GroupTotal,
}

impl NetWorth {
    pub fn from_accounts(accounts: &MoneyAccounts) -> Self {
        let assets = group_total(accounts, AccountGroup::Asset);
        let liabilities = group_total(accounts, AccountGroup::Liability);
        Self {
            net: assets.total - liabilities.total,
            assets,
            liabilities,
        }
    }
}

fn group_total(accounts: &MoneyAccounts, group: AccountGroup) -> GroupTotal {
    let types: Vec<TypeTotal> = accounts
        .group(group)
        .map(|s| TypeTotal {
            display: s.kind.display.clone(),
            balance: s.total_display_balance,
        })
        .collect();
    GroupTotal {
        group,
        total: types.iter().map(|t| t.balance).sum(),
        types,
    }
}

/// Home value against the mortgage balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equity {
    pub home_value: f64,
    pub mortgage: f64,
}

impl Equity {
    /// Real-estate total and the loans that look like a mortgage. Missing
    /// account types count as zero.
    pub fn from_accounts(accounts: &MoneyAccounts) -> Self {
        let home_value = accounts
            .by_type_name("real_estate")
            .map_or(0.0, |s| s.total_display_balance);
        let mortgage = accounts
            .by_type_name("loan")
            .map(|s| {
                s.accounts
                    .iter()
                    .filter(|a| a.is_mortgage())
                    .map(|a| a.display_balance)
                    .sum()
            })
            .unwrap_or(0.0);
        Self {
            home_value,
            mortgage,
        }
    }

    pub fn equity(&self) -> f64 {
        self.home_value - self.mortgage
    }
}
