//! Trial balance over a company's journal

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ChartOfAccounts, JournalEntry};
use crate::sign::net_balance;
use crate::types::{AccountType, Side};

/// Activity of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    /// Signed by the account's normal side
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    pub is_balanced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub totals: TrialBalanceTotals,
}

/// Build the trial balance of every account that has postings.
///
/// Rows are ordered by account code. A posting to an account missing from
/// the chart is left out and logged, so it shows up as an imbalance.
pub fn compute_trial_balance(chart: &ChartOfAccounts, entries: &[JournalEntry]) -> TrialBalance {
    let mut sums: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();

    for entry in entries {
        for (code, posting) in entry.postings() {
            if chart.get(code).is_none() {
                log::warn!(
                    target: "bookview::data",
                    "posting on {} to unknown account {} counted as zero",
                    entry.date,
                    code
                );
                continue;
            }
            let slot = sums.entry(code).or_default();
            match posting.side {
                Side::Debit => slot.0 += posting.amount,
                Side::Credit => slot.1 += posting.amount,
            }
        }
    }

    let rows: Vec<TrialBalanceRow> = sums
        .into_iter()
        .filter_map(|(code, (total_debits, total_credits))| {
            let account = chart.get(code)?;
            Some(TrialBalanceRow {
                code: account.code.clone(),
                name: account.name.clone(),
                account_type: account.account_type,
                total_debits,
                total_credits,
                balance: net_balance(account.account_type, total_debits, total_credits),
            })
        })
        .collect();

    let totals = calculate_totals(&rows);
    TrialBalance { rows, totals }
}

fn calculate_totals(rows: &[TrialBalanceRow]) -> TrialBalanceTotals {
    let total_debits: Decimal = rows.iter().map(|r| r.total_debits).sum();
    let total_credits: Decimal = rows.iter().map(|r| r.total_credits).sum();

    TrialBalanceTotals {
        total_debits,
        total_credits,
        is_balanced: total_debits == total_credits,
    }
}

impl TrialBalance {
    /// Balances keyed by account code, for building statement trees
    pub fn balances(&self) -> std::collections::HashMap<String, Decimal> {
        self.rows
            .iter()
            .map(|r| (r.code.clone(), r.balance))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;
    use crate::types::AccountSubtype;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn account(code: &str, name: &str, account_type: AccountType) -> Account {
        Account {
            code: code.to_string(),
            name: name.to_string(),
            account_type,
            subtype: account_type
                .requires_subtype()
                .then_some(AccountSubtype::Current),
            subtype2: None,
        }
    }

    fn chart() -> ChartOfAccounts {
        ChartOfAccounts::new(vec![
            account("1.1.01", "Cash", AccountType::Asset),
            account("2.1.01", "Suppliers", AccountType::Liability),
            account("3.1", "Sales", AccountType::Revenue),
            account("4.1", "Rent", AccountType::Expense),
        ])
        .unwrap()
    }

    fn entry(debit: &str, credit: &str, amount: Decimal) -> JournalEntry {
        JournalEntry {
            date: NaiveDate::from_ymd_opt(2025, 9, 23).unwrap(),
            description: format!("{} / {}", debit, credit),
            debit_account: debit.to_string(),
            credit_account: credit.to_string(),
            amount,
        }
    }

    #[test]
    fn test_balanced_journal() {
        let entries = vec![
            entry("1.1.01", "3.1", dec!(1000)),
            entry("4.1", "1.1.01", dec!(300)),
            entry("4.1", "2.1.01", dec!(50)),
        ];

        let trial = compute_trial_balance(&chart(), &entries);
        let codes: Vec<&str> = trial.rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["1.1.01", "2.1.01", "3.1", "4.1"]);

        assert_eq!(trial.rows[0].balance, dec!(700));
        assert_eq!(trial.rows[1].balance, dec!(50));
        assert_eq!(trial.rows[2].balance, dec!(1000));
        assert_eq!(trial.rows[3].balance, dec!(350));

        assert_eq!(trial.totals.total_debits, dec!(1350));
        assert_eq!(trial.totals.total_credits, dec!(1350));
        assert!(trial.totals.is_balanced);
    }

    #[test]
    fn test_unknown_account_contributes_zero() {
        let entries = vec![entry("1.1.01", "9.9", dec!(80))];

        let trial = compute_trial_balance(&chart(), &entries);
        assert_eq!(trial.rows.len(), 1);
        assert_eq!(trial.totals.total_debits, dec!(80));
        assert_eq!(trial.totals.total_credits, dec!(0));
        assert!(!trial.totals.is_balanced);
    }

    #[test]
    fn test_empty_journal_is_balanced() {
        let trial = compute_trial_balance(&chart(), &[]);
        assert!(trial.rows.is_empty());
        assert!(trial.totals.is_balanced);
        assert!(trial.balances().is_empty());
    }
}
