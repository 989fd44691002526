//! Core data models for bookkeeping reports

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{AccountSubtype, AccountType, NonCurrentGroup, Side};

/// Chart-of-accounts entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Stable key within a company, dotted by hierarchy (e.g. "1.1.01")
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub subtype: Option<AccountSubtype>,
    /// Only for non-current assets
    pub subtype2: Option<NonCurrentGroup>,
}

impl Account {
    /// Enforce the subtype rules: a subtype is required exactly for assets and
    /// liabilities, and a second subtype only for non-current assets.
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |reason: &str| CoreError::InvalidSubtype {
            code: self.code.clone(),
            reason: reason.to_string(),
        };

        match (self.account_type.requires_subtype(), self.subtype) {
            (true, None) => return Err(invalid("assets and liabilities require a subtype")),
            (false, Some(_)) => {
                return Err(invalid(&format!(
                    "{} accounts take no subtype",
                    self.account_type
                )))
            }
            _ => {}
        }

        if self.subtype2.is_some()
            && !(self.account_type == AccountType::Asset
                && self.subtype == Some(AccountSubtype::NonCurrent))
        {
            return Err(invalid("a second subtype is only allowed on non-current assets"));
        }

        Ok(())
    }

    /// Parent code in the dotted hierarchy ("1.1.02" -> "1.1")
    pub fn parent_code(&self) -> Option<&str> {
        parent_code(&self.code)
    }

    /// Depth level (0 = root)
    pub fn depth(&self) -> usize {
        self.code.matches('.').count()
    }
}

/// Parent of a dotted account code
pub fn parent_code(code: &str) -> Option<&str> {
    code.rfind('.').map(|pos| &code[..pos])
}

/// A company's chart of accounts, indexed by code
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartOfAccounts {
    accounts: Vec<Account>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ChartOfAccounts {
    /// Build a chart; every account must pass [`Account::validate`].
    ///
    /// A repeated code keeps its first definition.
    pub fn new(accounts: Vec<Account>) -> CoreResult<Self> {
        let mut chart = Self::default();
        for account in accounts {
            account.validate()?;
            if chart.index.contains_key(&account.code) {
                log::warn!(target: "bookview::data", "duplicate account code {} ignored", account.code);
                continue;
            }
            chart.index.insert(account.code.clone(), chart.accounts.len());
            chart.accounts.push(account);
        }
        Ok(chart)
    }

    pub fn get(&self, code: &str) -> Option<&Account> {
        self.index.get(code).map(|&i| &self.accounts[i])
    }

    pub fn account_type(&self, code: &str) -> Option<AccountType> {
        self.get(code).map(|a| a.account_type)
    }

    /// Direct children of an account, in chart order
    pub fn children(&self, code: &str) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|a| a.parent_code() == Some(code))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Journal entry; yields one debit and one credit posting of the same amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub description: String,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: Decimal,
}

impl JournalEntry {
    /// The debit and credit postings with the account each one hits
    pub fn postings(&self) -> [(&str, Posting); 2] {
        [
            (self.debit_account.as_str(), self.posting(Side::Debit)),
            (self.credit_account.as_str(), self.posting(Side::Credit)),
        ]
    }

    fn posting(&self, side: Side) -> Posting {
        Posting {
            date: self.date,
            description: self.description.clone(),
            side,
            amount: self.amount,
        }
    }
}

/// One side of a journal entry, as seen by a single account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub date: NaiveDate,
    pub description: String,
    pub side: Side,
    pub amount: Decimal,
}

/// Ledger line with the balance after applying it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerLine {
    pub date: NaiveDate,
    pub description: String,
    pub side: Side,
    pub amount: Decimal,
    pub running_balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    pub final_balance: Decimal,
}

/// Ledger of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountLedger {
    pub account_type: AccountType,
    pub lines: Vec<LedgerLine>,
    pub totals: LedgerTotals,
}

/// Statement tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedAccountNode {
    pub code: Option<String>,
    pub name: String,
    pub value: Decimal,
    #[serde(default)]
    pub children: Vec<ValuedAccountNode>,
}

impl ValuedAccountNode {
    pub fn new(code: Option<&str>, name: &str, value: Decimal) -> Self {
        Self {
            code: code.map(str::to_string),
            name: name.to_string(),
            value,
            children: vec![],
        }
    }

    pub fn with_children(mut self, children: Vec<ValuedAccountNode>) -> Self {
        self.children = children;
        self
    }

    /// Matching key across snapshots: the code when present, else the name
    pub fn key(&self) -> &str {
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => code,
            _ => &self.name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }
}

/// Node carrying two values side by side; either may be absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedNode {
    pub code: Option<String>,
    pub name: String,
    pub value_a: Option<Decimal>,
    pub value_b: Option<Decimal>,
    #[serde(default)]
    pub children: Vec<MergedNode>,
}

impl MergedNode {
    pub fn value_b_or_zero(&self) -> Decimal {
        self.value_b.unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Flatten pre-order into display rows
    pub fn rows(&self) -> Vec<UnifiedRow> {
        let mut rows = Vec::new();
        self.collect_rows(0, &mut rows);
        rows
    }

    fn collect_rows(&self, depth: usize, rows: &mut Vec<UnifiedRow>) {
        rows.push(UnifiedRow {
            depth,
            code: self.code.clone(),
            name: self.name.clone(),
            value_a: self.value_a,
            value_b: self.value_b,
        });
        for child in &self.children {
            child.collect_rows(depth + 1, rows);
        }
    }
}

/// Flat row of a merged tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRow {
    pub depth: usize,
    pub code: Option<String>,
    pub name: String,
    pub value_a: Option<Decimal>,
    pub value_b: Option<Decimal>,
}

/// Liquidity, solvency and return indicators.
///
/// Absent when the collaborator cannot compute one (e.g. a zero denominator).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialIndicators {
    pub immediate_liquidity: Option<Decimal>,
    pub quick_liquidity: Option<Decimal>,
    pub current_liquidity: Option<Decimal>,
    pub general_liquidity: Option<Decimal>,
    pub general_solvency: Option<Decimal>,
    pub roa: Option<Decimal>,
    pub roe: Option<Decimal>,
    pub roi: Option<Decimal>,
}
