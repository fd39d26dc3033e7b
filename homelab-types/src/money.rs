//! Account aggregation: net worth by account type and portfolio performance.

use serde::{Deserialize, Serialize};

use crate::{check_url, SchemaError, Validate};

/// `{"data": {"accountTypeSummaries": [...]}}` from the accounts endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyAccounts {
    pub data: MoneyAccountsData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyAccountsData {
    pub account_type_summaries: Vec<AccountTypeSummary>,
}

/// All accounts of one type (checking, brokerage, loan, ...) with their total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTypeSummary {
    #[serde(rename = "type")]
    pub kind: AccountSummaryType,
    pub accounts: Vec<Account>,
    pub total_display_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummaryType {
    pub display: String,
    pub group: AccountGroup,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountGroup {
    Asset,
    Liability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub sync_disabled: bool,
    pub is_hidden: bool,
    pub is_asset: bool,
    pub include_in_net_worth: bool,
    #[serde(rename = "type")]
    pub kind: AccountType,
    pub display_name: String,
    pub display_balance: f64,
    pub signed_balance: f64,
    pub updated_at: String,
    pub icon: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub include_balance_in_net_worth: bool,
    #[serde(default)]
    pub institution: Option<Institution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountType {
    pub name: String,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub id: String,
    pub name: String,
}

impl MoneyAccounts {
    pub fn summaries(&self) -> &[AccountTypeSummary] {
        &self.data.account_type_summaries
    }

    /// Summaries in `group`, in response order.
    pub fn group(&self, group: AccountGroup) -> impl Iterator<Item = &AccountTypeSummary> {
        self.summaries().iter().filter(move |s| s.kind.group == group)
    }

    /// Summary whose type name matches, e.g. `"real_estate"` or `"loan"`.
    pub fn by_type_name(&self, name: &str) -> Option<&AccountTypeSummary> {
        self.summaries().iter().find(|s| s.kind.name == name)
    }
}

impl Account {
    /// Loan accounts that look like a mortgage, by name or institution.
    pub fn is_mortgage(&self) -> bool {
        let needle = "mortgage";
        self.display_name.to_lowercase().contains(needle)
            || self
                .institution
                .as_ref()
                .is_some_and(|i| i.name.to_lowercase().contains(needle))
    }
}

impl Validate for MoneyAccounts {
    fn validate(&self) -> Result<(), SchemaError> {
        for account in self.summaries().iter().flat_map(|s| &s.accounts) {
            if let Some(logo) = account.logo_url.as_deref().filter(|l| !l.is_empty()) {
                check_url("accounts.logoUrl", logo)?;
            }
        }
        Ok(())
    }
}

/// Portfolio value and its change since the previous close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSummary {
    pub total_value: f64,
    pub one_day_change_dollars: f64,
}

impl InvestmentSummary {
    /// Day change as a percentage of the current total, `None` for an empty
    /// portfolio.
    pub fn change_percent(&self) -> Option<f64> {
        if self.total_value == 0.0 {
            None
        } else {
            Some(self.one_day_change_dollars / self.total_value * 100.0)
        }
    }

    pub fn is_trending_up(&self) -> bool {
        self.one_day_change_dollars >= 0.0
    }
}

impl Validate for InvestmentSummary {
    fn validate(&self) -> Result<(), SchemaError> {
        Ok(())
    }
}
