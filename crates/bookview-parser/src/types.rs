//! Raw payload shapes as delivered by the storage/reporting collaborator.
//!
//! Values stay loosely typed here (`serde_json::Value` for amounts, strings
//! for enumerations) so one malformed record does not reject a whole payload.
//! The core crate turns these into domain models.

use serde::{Deserialize, Serialize};

/// Chart-of-accounts entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccount {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub subtype2: Option<String>,
}

/// Journal entry: one debit and one credit of the same amount
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJournalEntry {
    pub date: String,
    #[serde(default)]
    pub description: String,
    pub debit_account: String,
    pub credit_account: String,
    #[serde(default)]
    pub amount: serde_json::Value,
}

/// One side of a journal entry as listed for a single account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosting {
    pub date: String,
    #[serde(default)]
    pub description: String,
    pub side: String,
    #[serde(default)]
    pub amount: serde_json::Value,
}

/// Statement tree node with a possibly non-numeric value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTreeNode {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub children: Vec<RawTreeNode>,
}

/// Operating expense line of the income statement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExpenseLine {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Scalar inputs of the income statement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIncomeInputs {
    #[serde(default)]
    pub gross_revenue: serde_json::Value,
    #[serde(default)]
    pub sales_taxes: serde_json::Value,
    #[serde(default)]
    pub returns: serde_json::Value,
    #[serde(default)]
    pub cost_of_goods: serde_json::Value,
    #[serde(default)]
    pub operating_expense_lines: Vec<RawExpenseLine>,
    #[serde(default)]
    pub financial_revenue: serde_json::Value,
    #[serde(default)]
    pub financial_expense: serde_json::Value,
}

/// Financial indicators as computed by the collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIndicators {
    #[serde(default)]
    pub immediate_liquidity: serde_json::Value,
    #[serde(default)]
    pub quick_liquidity: serde_json::Value,
    #[serde(default)]
    pub current_liquidity: serde_json::Value,
    #[serde(default)]
    pub general_liquidity: serde_json::Value,
    #[serde(default)]
    pub general_solvency: serde_json::Value,
    #[serde(default)]
    pub roa: serde_json::Value,
    #[serde(default)]
    pub roe: serde_json::Value,
    #[serde(default)]
    pub roi: serde_json::Value,
}

/// Statement branch served as a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementKind {
    Assets,
    LiabilitiesEquity,
    Equity,
}

impl std::str::FromStr for StatementKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assets" => Ok(StatementKind::Assets),
            "liabilities-equity" | "liabilities" => Ok(StatementKind::LiabilitiesEquity),
            "equity" => Ok(StatementKind::Equity),
            _ => Err(format!("Invalid statement kind: {}", s)),
        }
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementKind::Assets => write!(f, "assets"),
            StatementKind::LiabilitiesEquity => write!(f, "liabilities-equity"),
            StatementKind::Equity => write!(f, "equity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_account_uses_type_key() {
        let account: RawAccount = serde_json::from_value(json!({
            "code": "1.1.01",
            "name": "Cash",
            "type": "ASSET",
            "subtype": "CURRENT"
        }))
        .unwrap();
        assert_eq!(account.account_type, "ASSET");
        assert_eq!(account.subtype.as_deref(), Some("CURRENT"));
        assert!(account.subtype2.is_none());
    }

    #[test]
    fn test_raw_tree_defaults() {
        let node: RawTreeNode = serde_json::from_value(json!({
            "name": "ASSETS",
            "children": [{ "code": "1.1", "name": "Current", "value": "12,50" }]
        }))
        .unwrap();
        assert!(node.code.is_none());
        assert!(node.value.is_null());
        assert_eq!(node.children[0].code.as_deref(), Some("1.1"));
    }

    #[test]
    fn test_raw_income_camel_case() {
        let inputs: RawIncomeInputs = serde_json::from_value(json!({
            "grossRevenue": 1000,
            "operatingExpenseLines": [{ "value": 200 }]
        }))
        .unwrap();
        assert_eq!(inputs.gross_revenue, json!(1000));
        assert!(inputs.sales_taxes.is_null());
        assert_eq!(inputs.operating_expense_lines.len(), 1);
    }

    #[test]
    fn test_statement_kind_round_trip_names() {
        assert_eq!("assets".parse::<StatementKind>().unwrap(), StatementKind::Assets);
        assert_eq!(
            "liabilities-equity".parse::<StatementKind>().unwrap(),
            StatementKind::LiabilitiesEquity
        );
        assert_eq!(StatementKind::Equity.to_string(), "equity");
        assert!("cash".parse::<StatementKind>().is_err());
    }
}
