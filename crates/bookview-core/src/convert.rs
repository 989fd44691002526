//! Conversion of collaborator payloads into domain models.
//!
//! Enumerations that fall outside the known set (account type, subtype,
//! posting side) are configuration errors and fail the whole conversion.
//! Values that merely have the wrong shape are logged under
//! `bookview::data` and read as zero; records whose date cannot be read are
//! skipped the same way.

use rust_decimal::Decimal;

use bookview_parser::{
    decode_amount, AmountValue, RawAccount, RawIncomeInputs, RawIndicators, RawJournalEntry,
    RawPosting, RawTreeNode,
};

use crate::error::{CoreError, CoreResult};
use crate::income::{ExpenseLine, IncomeStatementInputs};
use crate::models::{
    Account, ChartOfAccounts, FinancialIndicators, JournalEntry, Posting, ValuedAccountNode,
};
use crate::time::parse_reference_date;
use crate::types::{AccountSubtype, AccountType, NonCurrentGroup, Side};

/// Decode an amount field, reading anything non-numeric as zero
fn amount_or_zero(value: &serde_json::Value, field: &str, record: &str) -> Decimal {
    let amount = decode_amount(value);
    if let AmountValue::Invalid(raw) = &amount {
        log::warn!(
            target: "bookview::data",
            "non-numeric {} {:?} in {} read as zero",
            field,
            raw,
            record
        );
    }
    amount.or_zero()
}

fn optional_field(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn account_from_raw(raw: &RawAccount) -> CoreResult<Account> {
    let account_type: AccountType = raw.account_type.parse()?;
    let invalid = |reason: String| CoreError::InvalidSubtype {
        code: raw.code.clone(),
        reason,
    };

    let subtype = optional_field(&raw.subtype)
        .map(|s| s.parse::<AccountSubtype>())
        .transpose()
        .map_err(invalid)?;
    let subtype2 = optional_field(&raw.subtype2)
        .map(|s| s.parse::<NonCurrentGroup>())
        .transpose()
        .map_err(invalid)?;

    Ok(Account {
        code: raw.code.trim().to_string(),
        name: raw.name.clone(),
        account_type,
        subtype,
        subtype2,
    })
}

/// Build a validated chart from raw entries
pub fn chart_from_raw(raw: &[RawAccount]) -> CoreResult<ChartOfAccounts> {
    let accounts = raw.iter().map(account_from_raw).collect::<CoreResult<Vec<_>>>()?;
    ChartOfAccounts::new(accounts)
}

/// Journal entries in input order; entries with an unreadable date are skipped
pub fn journal_from_raw(raw: &[RawJournalEntry]) -> Vec<JournalEntry> {
    raw.iter()
        .filter_map(|entry| {
            let date = match parse_reference_date(&entry.date) {
                Ok(date) => date,
                Err(e) => {
                    log::warn!(target: "bookview::data", "journal entry {:?} skipped: {}", entry.description, e);
                    return None;
                }
            };
            Some(JournalEntry {
                date,
                description: entry.description.clone(),
                debit_account: entry.debit_account.clone(),
                credit_account: entry.credit_account.clone(),
                amount: amount_or_zero(&entry.amount, "amount", &entry.description),
            })
        })
        .collect()
}

/// Postings in input order; an unknown side fails, an unreadable date skips
pub fn postings_from_raw(raw: &[RawPosting]) -> CoreResult<Vec<Posting>> {
    let mut postings = Vec::with_capacity(raw.len());
    for posting in raw {
        let side: Side = posting.side.parse()?;
        let date = match parse_reference_date(&posting.date) {
            Ok(date) => date,
            Err(e) => {
                log::warn!(target: "bookview::data", "posting {:?} skipped: {}", posting.description, e);
                continue;
            }
        };
        postings.push(Posting {
            date,
            description: posting.description.clone(),
            side,
            amount: amount_or_zero(&posting.amount, "amount", &posting.description),
        });
    }
    Ok(postings)
}

/// Statement tree as served; values are taken as they are, not re-aggregated
pub fn tree_from_raw(raw: &RawTreeNode) -> ValuedAccountNode {
    let code = optional_field(&raw.code);
    let name = match (raw.name.trim(), code) {
        ("", Some(code)) => code,
        (name, _) => name,
    };

    ValuedAccountNode::new(code, name, amount_or_zero(&raw.value, "value", name))
        .with_children(raw.children.iter().map(tree_from_raw).collect())
}

pub fn income_inputs_from_raw(raw: &RawIncomeInputs) -> IncomeStatementInputs {
    let scalar = |value: &serde_json::Value, field: &str| amount_or_zero(value, field, "income statement");

    let operating_expense_lines = raw
        .operating_expense_lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let name = optional_field(&line.name)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Expense {}", i + 1));
            let amount = amount_or_zero(&line.value, "value", &name);
            ExpenseLine { name, amount }
        })
        .collect();

    IncomeStatementInputs {
        gross_revenue: scalar(&raw.gross_revenue, "grossRevenue"),
        sales_taxes: scalar(&raw.sales_taxes, "salesTaxes"),
        returns: scalar(&raw.returns, "returns"),
        cost_of_goods: scalar(&raw.cost_of_goods, "costOfGoods"),
        operating_expense_lines,
        financial_revenue: scalar(&raw.financial_revenue, "financialRevenue"),
        financial_expense: scalar(&raw.financial_expense, "financialExpense"),
    }
}

/// Indicators keep absence; a non-numeric value is logged and left absent
pub fn indicators_from_raw(raw: &RawIndicators) -> FinancialIndicators {
    let ratio = |value: &serde_json::Value, field: &str| match decode_amount(value) {
        AmountValue::Number(n) => Some(n),
        AmountValue::Missing => None,
        AmountValue::Invalid(text) => {
            log::warn!(target: "bookview::data", "non-numeric indicator {} {:?} ignored", field, text);
            None
        }
    };

    FinancialIndicators {
        immediate_liquidity: ratio(&raw.immediate_liquidity, "immediateLiquidity"),
        quick_liquidity: ratio(&raw.quick_liquidity, "quickLiquidity"),
        current_liquidity: ratio(&raw.current_liquidity, "currentLiquidity"),
        general_liquidity: ratio(&raw.general_liquidity, "generalLiquidity"),
        general_solvency: ratio(&raw.general_solvency, "generalSolvency"),
        roa: ratio(&raw.roa, "roa"),
        roe: ratio(&raw.roe, "roe"),
        roi: ratio(&raw.roi, "roi"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookview_parser::RawExpenseLine;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn raw_account(code: &str, account_type: &str, subtype: Option<&str>) -> RawAccount {
        RawAccount {
            code: code.to_string(),
            name: format!("Account {}", code),
            account_type: account_type.to_string(),
            subtype: subtype.map(str::to_string),
            subtype2: None,
        }
    }

    #[test]
    fn test_account_from_raw() {
        let account = account_from_raw(&raw_account("1.1.01", "ASSET", Some("CURRENT"))).unwrap();
        assert_eq!(account.account_type, AccountType::Asset);
        assert_eq!(account.subtype, Some(AccountSubtype::Current));

        let blank = account_from_raw(&raw_account("3.1", "REVENUE", Some(" "))).unwrap();
        assert_eq!(blank.subtype, None);
    }

    #[test]
    fn test_unknown_enumerations_fail_fast() {
        let result = chart_from_raw(&[
            raw_account("1.1.01", "ASSET", Some("CURRENT")),
            raw_account("9", "CONTRA", None),
        ]);
        assert!(matches!(result, Err(CoreError::UnknownAccountType { .. })));

        let result = account_from_raw(&raw_account("1.1.01", "ASSET", Some("SHORT")));
        assert!(matches!(result, Err(CoreError::InvalidSubtype { .. })));

        let posting = RawPosting {
            date: "2025-09-23".to_string(),
            description: "Sale".to_string(),
            side: "SIDEWAYS".to_string(),
            amount: json!(10),
        };
        assert!(matches!(postings_from_raw(&[posting]), Err(CoreError::UnknownSide { .. })));
    }

    #[test]
    fn test_journal_tolerates_bad_records() {
        let raw = vec![
            RawJournalEntry {
                date: "23-09-2025".to_string(),
                description: "Sale".to_string(),
                debit_account: "1.1.01".to_string(),
                credit_account: "3.1".to_string(),
                amount: json!("1.234,56"),
            },
            RawJournalEntry {
                date: "2025-09-24".to_string(),
                description: "Typo".to_string(),
                debit_account: "1.1.01".to_string(),
                credit_account: "3.1".to_string(),
                amount: json!("abc"),
            },
            RawJournalEntry {
                date: "sometime".to_string(),
                description: "Undated".to_string(),
                debit_account: "1.1.01".to_string(),
                credit_account: "3.1".to_string(),
                amount: json!(5),
            },
        ];

        let entries = journal_from_raw(&raw);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].amount, dec!(1234.56));
        assert_eq!(entries[1].amount, dec!(0));
    }

    #[test]
    fn test_tree_from_raw() {
        let raw = RawTreeNode {
            code: None,
            name: "ASSETS".to_string(),
            value: json!("1500.00"),
            children: vec![
                RawTreeNode {
                    code: Some("1.1".to_string()),
                    name: String::new(),
                    value: json!(500),
                    children: vec![],
                },
                RawTreeNode {
                    code: Some("".to_string()),
                    name: "Broken".to_string(),
                    value: json!({"amount": 3}),
                    children: vec![],
                },
            ],
        };

        let tree = tree_from_raw(&raw);
        assert_eq!(tree.value, dec!(1500));
        assert_eq!(tree.children[0].name, "1.1");
        assert_eq!(tree.children[1].code, None);
        assert_eq!(tree.children[1].value, dec!(0));
    }

    #[test]
    fn test_income_inputs_from_raw() {
        let raw = RawIncomeInputs {
            gross_revenue: json!(1000),
            sales_taxes: json!("100"),
            returns: serde_json::Value::Null,
            operating_expense_lines: vec![
                RawExpenseLine {
                    name: Some("Salaries".to_string()),
                    value: json!(200),
                },
                RawExpenseLine {
                    name: None,
                    value: json!("n/a"),
                },
            ],
            ..Default::default()
        };

        let inputs = income_inputs_from_raw(&raw);
        assert_eq!(inputs.gross_revenue, dec!(1000));
        assert_eq!(inputs.sales_taxes, dec!(100));
        assert_eq!(inputs.returns, dec!(0));
        assert_eq!(inputs.operating_expense_lines[1].name, "Expense 2");
        assert_eq!(inputs.operating_expense_lines[1].amount, dec!(0));
    }

    #[test]
    fn test_indicators_from_raw() {
        let raw = RawIndicators {
            current_liquidity: json!(1.85),
            roe: json!("0,12"),
            roa: json!("NaN%"),
            ..Default::default()
        };

        let indicators = indicators_from_raw(&raw);
        assert_eq!(indicators.current_liquidity, Some(dec!(1.85)));
        assert_eq!(indicators.roe, Some(dec!(0.12)));
        assert_eq!(indicators.roa, None);
        assert_eq!(indicators.roi, None);
    }
}
