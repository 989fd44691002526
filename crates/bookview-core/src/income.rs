//! Income statement roll-up

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bookview_config::{TaxConfig, CORPORATE_INCOME_TAX_RATE, SOCIAL_CONTRIBUTION_TAX_RATE};

/// Named operating expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub name: String,
    pub amount: Decimal,
}

/// Already-resolved scalar inputs of the income statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementInputs {
    pub gross_revenue: Decimal,
    pub sales_taxes: Decimal,
    pub returns: Decimal,
    pub cost_of_goods: Decimal,
    pub operating_expense_lines: Vec<ExpenseLine>,
    pub financial_revenue: Decimal,
    pub financial_expense: Decimal,
}

/// Rates applied to a positive pre-tax result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxRates {
    pub corporate_income: Decimal,
    pub social_contribution: Decimal,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            corporate_income: CORPORATE_INCOME_TAX_RATE,
            social_contribution: SOCIAL_CONTRIBUTION_TAX_RATE,
        }
    }
}

impl From<&TaxConfig> for TaxRates {
    fn from(config: &TaxConfig) -> Self {
        Self {
            corporate_income: config.corporate_income_rate,
            social_contribution: config.social_contribution_rate,
        }
    }
}

/// Income statement with every intermediate result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub gross_revenue: Decimal,
    pub sales_taxes: Decimal,
    pub returns: Decimal,
    pub net_revenue: Decimal,
    pub cost_of_goods: Decimal,
    pub gross_profit: Decimal,
    pub operating_expense_lines: Vec<ExpenseLine>,
    pub total_operating_expenses: Decimal,
    pub operating_result: Decimal,
    pub financial_revenue: Decimal,
    pub financial_expense: Decimal,
    pub financial_result: Decimal,
    pub pre_tax_result: Decimal,
    pub corporate_income_tax: Decimal,
    pub social_contribution_tax: Decimal,
    pub net_income: Decimal,
}

/// Roll up an income statement at the statutory rates (15% and 9%)
pub fn compute_income_statement(inputs: &IncomeStatementInputs) -> IncomeStatement {
    compute_income_statement_with_rates(inputs, TaxRates::default())
}

/// Roll up an income statement.
///
/// Taxes are only charged on a positive pre-tax result; a loss is never
/// taxed, so net income equals the pre-tax result whenever that is not
/// positive.
pub fn compute_income_statement_with_rates(
    inputs: &IncomeStatementInputs,
    rates: TaxRates,
) -> IncomeStatement {
    let net_revenue = inputs.gross_revenue - inputs.sales_taxes - inputs.returns;
    let gross_profit = net_revenue - inputs.cost_of_goods;
    let total_operating_expenses: Decimal =
        inputs.operating_expense_lines.iter().map(|l| l.amount).sum();
    let operating_result = gross_profit - total_operating_expenses;
    let financial_result = inputs.financial_revenue - inputs.financial_expense;
    let pre_tax_result = operating_result + financial_result;

    let (corporate_income_tax, social_contribution_tax) = if pre_tax_result > Decimal::ZERO {
        (
            pre_tax_result * rates.corporate_income,
            pre_tax_result * rates.social_contribution,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    IncomeStatement {
        gross_revenue: inputs.gross_revenue,
        sales_taxes: inputs.sales_taxes,
        returns: inputs.returns,
        net_revenue,
        cost_of_goods: inputs.cost_of_goods,
        gross_profit,
        operating_expense_lines: inputs.operating_expense_lines.clone(),
        total_operating_expenses,
        operating_result,
        financial_revenue: inputs.financial_revenue,
        financial_expense: inputs.financial_expense,
        financial_result,
        pre_tax_result,
        corporate_income_tax,
        social_contribution_tax,
        net_income: pre_tax_result - corporate_income_tax - social_contribution_tax,
    }
}
