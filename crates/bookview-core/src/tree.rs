//! Statement tree roll-up

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{ChartOfAccounts, ValuedAccountNode};

/// Roll values up a statement tree.
///
/// Post-order: each internal node's value becomes the sum of its children's
/// aggregated values; leaves keep their own value. Running it on an already
/// aggregated tree changes nothing.
pub fn aggregate_tree(node: &ValuedAccountNode) -> ValuedAccountNode {
    if node.is_leaf() {
        return node.clone();
    }

    let children: Vec<ValuedAccountNode> = node.children.iter().map(aggregate_tree).collect();
    let value = children.iter().map(|c| c.value).sum();

    ValuedAccountNode {
        code: node.code.clone(),
        name: node.name.clone(),
        value,
        children,
    }
}

/// Build a statement tree under `root_code` from the dotted chart hierarchy.
///
/// Leaves take their value from `balances` (missing codes are zero). An
/// account with children and a balance of its own gets an extra leaf holding
/// that balance, so the aggregated parent equals own postings plus children.
/// `None` when the root is not in the chart.
pub fn build_statement_tree(
    chart: &ChartOfAccounts,
    balances: &HashMap<String, Decimal>,
    root_code: &str,
) -> Option<ValuedAccountNode> {
    chart.get(root_code)?;
    Some(aggregate_tree(&build_node(chart, balances, root_code)))
}

fn build_node(
    chart: &ChartOfAccounts,
    balances: &HashMap<String, Decimal>,
    code: &str,
) -> ValuedAccountNode {
    let name = chart.get(code).map(|a| a.name.as_str()).unwrap_or(code);
    let own = balances.get(code).copied().unwrap_or_default();
    let mut children: Vec<ValuedAccountNode> = chart
        .children(code)
        .into_iter()
        .map(|child| build_node(chart, balances, &child.code))
        .collect();

    if !children.is_empty() && !own.is_zero() {
        log::debug!(target: "bookview::data", "account {} holds {} directly", code, own);
        children.insert(
            0,
            ValuedAccountNode::new(None, &format!("{} (own postings)", name), own),
        );
    }

    ValuedAccountNode::new(Some(code), name, own).with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, JournalEntry};
    use crate::trial_balance::compute_trial_balance;
    use crate::types::{AccountSubtype, AccountType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn leaf(name: &str, value: Decimal) -> ValuedAccountNode {
        ValuedAccountNode::new(None, name, value)
    }

    fn sample() -> ValuedAccountNode {
        ValuedAccountNode::new(Some("1"), "ASSETS", dec!(999)).with_children(vec![
            ValuedAccountNode::new(Some("1.1"), "Current", dec!(0)).with_children(vec![
                leaf("Cash", dec!(100)),
                leaf("Bank", dec!(250.50)),
            ]),
            ValuedAccountNode::new(Some("1.2"), "Non-current", dec!(5)).with_children(vec![
                leaf("Equipment", dec!(1200)),
            ]),
            leaf("Other", dec!(-10)),
        ])
    }

    fn assert_parent_sums(node: &ValuedAccountNode) {
        if node.is_leaf() {
            return;
        }
        let sum: Decimal = node.children.iter().map(|c| c.value).sum();
        assert_eq!(node.value, sum, "node {}", node.name);
        node.children.iter().for_each(assert_parent_sums);
    }

    #[test]
    fn test_aggregate_sums_children() {
        let aggregated = aggregate_tree(&sample());

        assert_eq!(aggregated.children[0].value, dec!(350.50));
        assert_eq!(aggregated.children[1].value, dec!(1200));
        assert_eq!(aggregated.value, dec!(1540.50));
        assert_parent_sums(&aggregated);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let once = aggregate_tree(&sample());
        let twice = aggregate_tree(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_leaf_root_keeps_value() {
        let root = leaf("Cash", dec!(12));
        assert_eq!(aggregate_tree(&root), root);
    }

    fn asset(code: &str, name: &str) -> Account {
        Account {
            code: code.to_string(),
            name: name.to_string(),
            account_type: AccountType::Asset,
            subtype: Some(AccountSubtype::Current),
            subtype2: None,
        }
    }

    #[test]
    fn test_build_statement_tree_from_chart() {
        let chart = ChartOfAccounts::new(vec![
            asset("1", "ASSETS"),
            asset("1.1", "Current"),
            asset("1.1.01", "Cash"),
            asset("1.1.02", "Bank"),
            asset("1.1.02.1", "Checking"),
        ])
        .unwrap();

        let balances = HashMap::from([
            ("1.1.01".to_string(), dec!(100)),
            ("1.1.02.1".to_string(), dec!(40)),
        ]);

        let tree = build_statement_tree(&chart, &balances, "1").unwrap();
        assert_eq!(tree.value, dec!(140));
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.children[0].children[1].value, dec!(40));
        assert_parent_sums(&tree);

        assert!(build_statement_tree(&chart, &balances, "2").is_none());
    }

    #[test]
    fn test_parent_postings_kept_in_chart_tree() {
        let chart = ChartOfAccounts::new(vec![
            asset("1", "ASSETS"),
            asset("1.1", "Current"),
            Account {
                code: "3".to_string(),
                name: "Capital".to_string(),
                account_type: AccountType::Equity,
                subtype: None,
                subtype2: None,
            },
        ])
        .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 9, 23).unwrap();
        let entry = |debit: &str, amount: Decimal| JournalEntry {
            date: day,
            description: "Capital".to_string(),
            debit_account: debit.to_string(),
            credit_account: "3".to_string(),
            amount,
        };
        let trial = compute_trial_balance(&chart, &[entry("1", dec!(40)), entry("1.1", dec!(60))]);

        let tree = build_statement_tree(&chart, &trial.balances(), "1").unwrap();
        let branch_total: Decimal = trial
            .rows
            .iter()
            .filter(|r| r.code == "1" || r.code.starts_with("1."))
            .map(|r| r.balance)
            .sum();

        assert_eq!(branch_total, dec!(100));
        assert_eq!(tree.value, branch_total);
        assert_eq!(tree.children[0].name, "ASSETS (own postings)");
        assert_eq!(tree.children[0].value, dec!(40));
        assert_eq!(tree.children[1].value, dec!(60));
        assert_parent_sums(&tree);
        assert_eq!(aggregate_tree(&tree), tree);
    }
}
