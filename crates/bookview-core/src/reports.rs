//! Display-ready report structures.
//!
//! Every amount is rendered with the configured currency style; an absent
//! value on either side of a comparison is rendered as "—".

use serde::{Deserialize, Serialize};

use bookview_config::{CurrencyConfig, SymbolPosition};
use bookview_utils::{format_amount, format_indicator, format_number, format_optional, NumberStyle};

use crate::balance_sheet::BalanceSheet;
use crate::income::IncomeStatement;
use crate::models::{AccountLedger, FinancialIndicators, MergedNode};
use crate::trial_balance::TrialBalance;

/// Number style for a currency section of the configuration
pub fn number_style(currency: &CurrencyConfig) -> NumberStyle {
    NumberStyle {
        decimal_places: currency.decimal_places,
        thousands_separator: currency.thousands_separator.clone(),
        decimal_separator: currency.decimal_separator.clone(),
        symbol: Some(currency.symbol.clone()).filter(|s| !s.is_empty()),
        symbol_before: currency.symbol_position == SymbolPosition::Before,
    }
}

/// Row of a two-column statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub depth: usize,
    pub code: Option<String>,
    pub name: String,
    pub value_a: String,
    pub value_b: String,
}

/// Two statements side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub label_a: String,
    pub label_b: String,
    pub rows: Vec<StatementRow>,
}

pub fn comparison_report(
    tree: &MergedNode,
    label_a: &str,
    label_b: &str,
    style: &NumberStyle,
) -> ComparisonReport {
    let rows = tree
        .rows()
        .into_iter()
        .map(|row| StatementRow {
            depth: row.depth,
            code: row.code,
            name: row.name,
            value_a: format_optional(row.value_a, style),
            value_b: format_optional(row.value_b, style),
        })
        .collect();

    ComparisonReport {
        label_a: label_a.to_string(),
        label_b: label_b.to_string(),
        rows,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerLineView {
    pub date: String,
    pub description: String,
    pub debit: String,
    pub credit: String,
    pub balance: String,
}

/// Account ledger with debit and credit columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub account_code: String,
    pub account_name: String,
    pub lines: Vec<LedgerLineView>,
    pub total_debits: String,
    pub total_credits: String,
    pub final_balance: String,
}

pub fn ledger_report(
    account_code: &str,
    account_name: &str,
    ledger: &AccountLedger,
    style: &NumberStyle,
) -> LedgerReport {
    use crate::types::Side;

    let lines = ledger
        .lines
        .iter()
        .map(|line| {
            let amount = format_amount(line.amount, style);
            let (debit, credit) = match line.side {
                Side::Debit => (amount, String::new()),
                Side::Credit => (String::new(), amount),
            };
            LedgerLineView {
                date: line.date.format("%d/%m/%Y").to_string(),
                description: line.description.clone(),
                debit,
                credit,
                balance: format_amount(line.running_balance, style),
            }
        })
        .collect();

    LedgerReport {
        account_code: account_code.to_string(),
        account_name: account_name.to_string(),
        lines,
        total_debits: format_amount(ledger.totals.total_debits, style),
        total_credits: format_amount(ledger.totals.total_credits, style),
        final_balance: format_amount(ledger.totals.final_balance, style),
    }
}

/// Labelled line of a single-column report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
    /// Subtotal lines are emphasised when displayed
    pub subtotal: bool,
}

impl ReportLine {
    fn item(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            subtotal: false,
        }
    }

    fn subtotal(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            subtotal: true,
        }
    }
}

/// Income statement laid out top to bottom
pub fn income_statement_lines(statement: &IncomeStatement, style: &NumberStyle) -> Vec<ReportLine> {
    let fmt = |v| format_amount(v, style);

    let mut lines = vec![
        ReportLine::item("Gross revenue", fmt(statement.gross_revenue)),
        ReportLine::item("(-) Sales taxes", fmt(statement.sales_taxes)),
        ReportLine::item("(-) Returns", fmt(statement.returns)),
        ReportLine::subtotal("Net revenue", fmt(statement.net_revenue)),
        ReportLine::item("(-) Cost of goods sold", fmt(statement.cost_of_goods)),
        ReportLine::subtotal("Gross profit", fmt(statement.gross_profit)),
    ];
    lines.extend(
        statement
            .operating_expense_lines
            .iter()
            .map(|line| ReportLine::item(&format!("(-) {}", line.name), fmt(line.amount))),
    );
    lines.extend([
        ReportLine::subtotal("Operating result", fmt(statement.operating_result)),
        ReportLine::item("(+) Financial revenue", fmt(statement.financial_revenue)),
        ReportLine::item("(-) Financial expense", fmt(statement.financial_expense)),
        ReportLine::subtotal("Financial result", fmt(statement.financial_result)),
        ReportLine::subtotal("Result before taxes", fmt(statement.pre_tax_result)),
        ReportLine::item("(-) Corporate income tax", fmt(statement.corporate_income_tax)),
        ReportLine::item("(-) Social contribution", fmt(statement.social_contribution_tax)),
        ReportLine::subtotal("Net income", fmt(statement.net_income)),
    ]);
    lines
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceLine {
    pub code: String,
    pub name: String,
    pub debits: String,
    pub credits: String,
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    pub lines: Vec<TrialBalanceLine>,
    pub total_debits: String,
    pub total_credits: String,
    pub is_balanced: bool,
}

pub fn trial_balance_report(trial: &TrialBalance, style: &NumberStyle) -> TrialBalanceReport {
    TrialBalanceReport {
        lines: trial
            .rows
            .iter()
            .map(|row| TrialBalanceLine {
                code: row.code.clone(),
                name: row.name.clone(),
                debits: format_amount(row.total_debits, style),
                credits: format_amount(row.total_credits, style),
                balance: format_amount(row.balance, style),
            })
            .collect(),
        total_debits: format_amount(trial.totals.total_debits, style),
        total_credits: format_amount(trial.totals.total_credits, style),
        is_balanced: trial.totals.is_balanced,
    }
}

/// Balance sheet totals
pub fn balance_sheet_lines(sheet: &BalanceSheet, style: &NumberStyle) -> Vec<ReportLine> {
    vec![
        ReportLine::subtotal("Total assets", format_amount(sheet.total_assets, style)),
        ReportLine::subtotal(
            "Total liabilities and equity",
            format_amount(sheet.total_liabilities_and_equity, style),
        ),
        ReportLine::item("Difference", format_amount(sheet.difference, style)),
    ]
}

/// Liquidity and solvency as plain ratios, returns as percentages
pub fn indicator_lines(indicators: &FinancialIndicators, style: &NumberStyle) -> Vec<ReportLine> {
    vec![
        ReportLine::item("Immediate liquidity", format_number(indicators.immediate_liquidity, style)),
        ReportLine::item("Quick liquidity", format_number(indicators.quick_liquidity, style)),
        ReportLine::item("Current liquidity", format_number(indicators.current_liquidity, style)),
        ReportLine::item("General liquidity", format_number(indicators.general_liquidity, style)),
        ReportLine::item("General solvency", format_number(indicators.general_solvency, style)),
        ReportLine::item("ROA", format_indicator(indicators.roa, style)),
        ReportLine::item("ROE", format_indicator(indicators.roe, style)),
        ReportLine::item("ROI", format_indicator(indicators.roi, style)),
    ]
}
