//! Running balance per account and general journal helpers

use rust_decimal::Decimal;

use crate::models::{AccountLedger, JournalEntry, LedgerLine, LedgerTotals, Posting};
use crate::sign::{net_balance, resolve_contribution};
use crate::types::{AccountType, Side};

/// Running balance over one account's postings.
///
/// Lines come out in input order; callers supply chronological order. The
/// final balance equals the last running balance (zero with no postings).
pub fn compute_ledger(postings: &[Posting], account_type: AccountType) -> AccountLedger {
    let mut running = Decimal::ZERO;
    let mut total_debits = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;

    let lines = postings
        .iter()
        .map(|posting| {
            running += resolve_contribution(account_type, posting.side, posting.amount);
            match posting.side {
                Side::Debit => total_debits += posting.amount,
                Side::Credit => total_credits += posting.amount,
            }
            LedgerLine {
                date: posting.date,
                description: posting.description.clone(),
                side: posting.side,
                amount: posting.amount,
                running_balance: running,
            }
        })
        .collect();

    AccountLedger {
        account_type,
        lines,
        totals: LedgerTotals {
            total_debits,
            total_credits,
            final_balance: net_balance(account_type, total_debits, total_credits),
        },
    }
}

/// Postings that hit one account, in the order of `entries`
pub fn postings_for_account(entries: &[JournalEntry], account_code: &str) -> Vec<Posting> {
    entries
        .iter()
        .flat_map(|entry| entry.postings())
        .filter(|(code, _)| *code == account_code)
        .map(|(_, posting)| posting)
        .collect()
}

/// Stable sort by date; entries on the same day keep their insertion order
pub fn sort_chronologically(entries: &mut [JournalEntry]) {
    entries.sort_by_key(|entry| entry.date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn posting(d: u32, side: Side, amount: Decimal) -> Posting {
        Posting {
            date: day(d),
            description: format!("{} {}", side, amount),
            side,
            amount,
        }
    }

    fn entry(d: u32, debit: &str, credit: &str, amount: Decimal, description: &str) -> JournalEntry {
        JournalEntry {
            date: day(d),
            description: description.to_string(),
            debit_account: debit.to_string(),
            credit_account: credit.to_string(),
            amount,
        }
    }

    #[test]
    fn test_asset_running_balance() {
        let postings = vec![
            posting(1, Side::Debit, dec!(100)),
            posting(2, Side::Credit, dec!(30)),
            posting(3, Side::Debit, dec!(20)),
        ];

        let ledger = compute_ledger(&postings, AccountType::Asset);
        let balances: Vec<Decimal> = ledger.lines.iter().map(|l| l.running_balance).collect();

        assert_eq!(balances, vec![dec!(100), dec!(70), dec!(90)]);
        assert_eq!(ledger.totals.total_debits, dec!(120));
        assert_eq!(ledger.totals.total_credits, dec!(30));
        assert_eq!(ledger.totals.final_balance, dec!(90));
    }

    #[test]
    fn test_revenue_running_balance() {
        let postings = vec![
            posting(1, Side::Credit, dec!(500)),
            posting(2, Side::Debit, dec!(50)),
        ];

        let ledger = compute_ledger(&postings, AccountType::Revenue);
        assert_eq!(ledger.lines[0].running_balance, dec!(500));
        assert_eq!(ledger.lines[1].running_balance, dec!(450));
        assert_eq!(ledger.totals.final_balance, dec!(450));
    }

    #[test]
    fn test_running_balance_is_prefix_sum() {
        let postings = vec![
            posting(1, Side::Credit, dec!(10)),
            posting(2, Side::Debit, dec!(35.5)),
            posting(3, Side::Credit, dec!(7.25)),
            posting(4, Side::Debit, dec!(1)),
        ];

        for account_type in AccountType::ALL {
            let ledger = compute_ledger(&postings, account_type);
            for n in 0..postings.len() {
                let expected: Decimal = postings[..=n]
                    .iter()
                    .map(|p| resolve_contribution(account_type, p.side, p.amount))
                    .sum();
                assert_eq!(ledger.lines[n].running_balance, expected);
            }
            assert_eq!(
                ledger.totals.final_balance,
                ledger.lines.last().unwrap().running_balance
            );
        }
    }

    #[test]
    fn test_order_sensitive_and_idempotent() {
        let forward = vec![
            posting(1, Side::Debit, dec!(100)),
            posting(2, Side::Credit, dec!(30)),
        ];
        let reversed: Vec<Posting> = forward.iter().rev().cloned().collect();

        let a = compute_ledger(&forward, AccountType::Asset);
        let b = compute_ledger(&reversed, AccountType::Asset);

        assert_ne!(a.lines[0].running_balance, b.lines[0].running_balance);
        assert_eq!(a.totals.final_balance, b.totals.final_balance);
        assert_eq!(a, compute_ledger(&forward, AccountType::Asset));
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = compute_ledger(&[], AccountType::Expense);
        assert!(ledger.lines.is_empty());
        assert_eq!(ledger.totals, LedgerTotals::default());
    }

    #[test]
    fn test_postings_for_account_keeps_order() {
        let entries = vec![
            entry(23, "Cash", "Revenue", dec!(100), "Sale"),
            entry(23, "Expense", "Cash", dec!(50), "Supplier"),
            entry(24, "Bank", "Revenue", dec!(70), "Sale by transfer"),
        ];

        let cash = postings_for_account(&entries, "Cash");
        assert_eq!(cash.len(), 2);
        assert_eq!(cash[0].side, Side::Debit);
        assert_eq!(cash[1].side, Side::Credit);
        assert_eq!(cash[1].description, "Supplier");

        let ledger = compute_ledger(&cash, AccountType::Asset);
        assert_eq!(ledger.totals.final_balance, dec!(50));

        assert!(postings_for_account(&entries, "Loans").is_empty());
    }

    #[test]
    fn test_sort_chronologically_is_stable() {
        let mut entries = vec![
            entry(24, "A", "B", dec!(1), "third"),
            entry(23, "A", "B", dec!(2), "first"),
            entry(23, "A", "B", dec!(3), "second"),
        ];

        sort_chronologically(&mut entries);
        let order: Vec<&str> = entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }
}
