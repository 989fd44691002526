//! Balance sheet summary

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ValuedAccountNode;

/// Both sides of the balance sheet as served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub assets: ValuedAccountNode,
    pub liabilities_and_equity: ValuedAccountNode,
    pub total_assets: Decimal,
    pub total_liabilities_and_equity: Decimal,
    /// Assets minus liabilities and equity
    pub difference: Decimal,
    pub is_balanced: bool,
}

/// Compare the root totals of both sides.
///
/// Root values are taken as given; a parent that holds postings of its own is
/// already worth more than its children.
pub fn summarize_balance_sheet(
    assets: &ValuedAccountNode,
    liabilities_and_equity: &ValuedAccountNode,
) -> BalanceSheet {
    let assets = assets.clone();
    let liabilities_and_equity = liabilities_and_equity.clone();
    let total_assets = assets.value;
    let total_liabilities_and_equity = liabilities_and_equity.value;
    let difference = total_assets - total_liabilities_and_equity;

    BalanceSheet {
        assets,
        liabilities_and_equity,
        total_assets,
        total_liabilities_and_equity,
        difference,
        is_balanced: difference.is_zero(),
    }
}
