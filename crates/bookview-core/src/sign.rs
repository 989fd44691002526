//! Normal-balance sign convention.
//!
//! The single place that decides whether a posting raises or lowers an
//! account's balance. Every balance computed in this crate goes through
//! [`resolve_contribution`].

use rust_decimal::Decimal;

use crate::types::{AccountType, Side};

/// Signed effect of a posting on an account's balance.
///
/// Assets and expenses grow with debits; liabilities, equity and revenue grow
/// with credits. A posting on the other side subtracts.
pub fn resolve_contribution(account_type: AccountType, side: Side, amount: Decimal) -> Decimal {
    if side == account_type.normal_side() {
        amount
    } else {
        -amount
    }
}

/// Signed balance of total debits and credits of one account
pub fn net_balance(account_type: AccountType, total_debits: Decimal, total_credits: Decimal) -> Decimal {
    resolve_contribution(account_type, Side::Debit, total_debits)
        + resolve_contribution(account_type, Side::Credit, total_credits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_all_types_and_sides() {
        let amount = dec!(42.10);
        for account_type in AccountType::ALL {
            let debit = resolve_contribution(account_type, Side::Debit, amount);
            let credit = resolve_contribution(account_type, Side::Credit, amount);
            match account_type {
                AccountType::Asset | AccountType::Expense => {
                    assert_eq!(debit, amount, "{} debit", account_type);
                    assert_eq!(credit, -amount, "{} credit", account_type);
                }
                AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                    assert_eq!(debit, -amount, "{} debit", account_type);
                    assert_eq!(credit, amount, "{} credit", account_type);
                }
            }
        }
    }

    #[test]
    fn test_net_balance() {
        assert_eq!(net_balance(AccountType::Asset, dec!(120), dec!(30)), dec!(90));
        assert_eq!(net_balance(AccountType::Revenue, dec!(30), dec!(120)), dec!(90));
        assert_eq!(net_balance(AccountType::Liability, dec!(50), dec!(0)), dec!(-50));
    }
}
