//! Accounting aggregation engine and report building
//!
//! The engine itself is a set of pure functions over immutable inputs:
//! [`resolve_contribution`] for the sign convention, [`compute_ledger`] for
//! running balances, [`aggregate_tree`] for statement roll-ups, the two
//! statement merges [`merge_at_reference`] and [`diff_trees`], and
//! [`compute_income_statement`]. [`Bookkeeper`] fetches payloads through a
//! [`StatementSource`] and feeds them to the engine.

pub mod balance_sheet;
pub mod convert;
pub mod error;
pub mod income;
pub mod ledger;
pub mod merge;
pub mod models;
pub mod reports;
pub mod sign;
pub mod time;
pub mod tree;
pub mod trial_balance;
pub mod types;

use bookview_config::Config;
use bookview_parser::{SourceRef, StatementKind, StatementSource};
use bookview_utils::{paginate, NumberStyle, Page};
use chrono::NaiveDate;

pub use balance_sheet::{summarize_balance_sheet, BalanceSheet};
pub use error::{
    CoreError, CoreResult, DefaultErrorLogger, ErrorCategory, ErrorCode, ErrorContext,
    ErrorDetails, ErrorLogger, ErrorSeverity,
};
pub use income::{
    compute_income_statement, compute_income_statement_with_rates, ExpenseLine, IncomeStatement,
    IncomeStatementInputs, TaxRates,
};
pub use ledger::{compute_ledger, postings_for_account, sort_chronologically};
pub use merge::{diff_trees, merge_at_reference};
pub use models::{
    Account, AccountLedger, ChartOfAccounts, FinancialIndicators, JournalEntry, LedgerLine,
    LedgerTotals, MergedNode, Posting, UnifiedRow, ValuedAccountNode,
};
pub use sign::{net_balance, resolve_contribution};
pub use time::{parse_reference_date, ReferenceDate};
pub use tree::{aggregate_tree, build_statement_tree};
pub use trial_balance::{compute_trial_balance, TrialBalance, TrialBalanceRow, TrialBalanceTotals};
pub use types::{AccountSubtype, AccountType, NonCurrentGroup, Side};

/// Ledger of one account together with the account it belongs to
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AccountStatement {
    pub account: Account,
    pub ledger: AccountLedger,
}

/// Fetches collaborator payloads and runs the engine over them.
///
/// Holds no per-company state: every call names its company and reads fresh
/// data, so concurrent calls never interfere.
pub struct Bookkeeper {
    config: Config,
    source: SourceRef,
}

impl Bookkeeper {
    pub fn new(config: Config, source: SourceRef) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number style of the configured currency
    pub fn number_style(&self) -> NumberStyle {
        reports::number_style(&self.config.currency)
    }

    pub async fn chart(&self, company_id: &str) -> CoreResult<ChartOfAccounts> {
        let raw = self.source.chart_of_accounts(company_id).await?;
        convert::chart_from_raw(&raw)
    }

    /// Running-balance ledger of one account, oldest posting first
    pub async fn ledger(&self, company_id: &str, account_code: &str) -> CoreResult<AccountStatement> {
        let (raw_chart, raw_postings) = tokio::try_join!(
            self.source.chart_of_accounts(company_id),
            self.source.list_postings(company_id, account_code),
        )?;

        let chart = convert::chart_from_raw(&raw_chart)?;
        let account = chart
            .get(account_code)
            .cloned()
            .ok_or_else(|| CoreError::AccountNotFound {
                code: account_code.to_string(),
            })?;

        let mut postings = convert::postings_from_raw(&raw_postings)?;
        postings.sort_by_key(|p| p.date);

        log::debug!(
            target: "bookview::data",
            "ledger {}/{}: {} postings",
            company_id,
            account_code,
            postings.len()
        );

        let ledger = compute_ledger(&postings, account.account_type);
        Ok(AccountStatement { account, ledger })
    }

    /// One page of the general journal in chronological order
    pub async fn journal_page(&self, company_id: &str, page: usize) -> CoreResult<Page<JournalEntry>> {
        let raw = self.source.journal_entries(company_id).await?;
        let mut entries = convert::journal_from_raw(&raw);
        sort_chronologically(&mut entries);
        Ok(paginate(&entries, page, self.config.journal.records_per_page))
    }

    pub async fn trial_balance(&self, company_id: &str) -> CoreResult<TrialBalance> {
        let (raw_chart, raw_journal) = tokio::try_join!(
            self.source.chart_of_accounts(company_id),
            self.source.journal_entries(company_id),
        )?;

        let chart = convert::chart_from_raw(&raw_chart)?;
        let entries = convert::journal_from_raw(&raw_journal);
        Ok(compute_trial_balance(&chart, &entries))
    }

    /// Tree under `root_code` built from the chart and the journal balances.
    ///
    /// `None` when the root is not in the chart.
    pub async fn chart_tree(
        &self,
        company_id: &str,
        root_code: &str,
    ) -> CoreResult<Option<ValuedAccountNode>> {
        let (raw_chart, raw_journal) = tokio::try_join!(
            self.source.chart_of_accounts(company_id),
            self.source.journal_entries(company_id),
        )?;

        let chart = convert::chart_from_raw(&raw_chart)?;
        let entries = convert::journal_from_raw(&raw_journal);
        let balances = compute_trial_balance(&chart, &entries).balances();
        Ok(build_statement_tree(&chart, &balances, root_code))
    }

    /// Statement tree as of a date, values as served; `None` when the source has none
    pub async fn statement_tree(
        &self,
        company_id: &str,
        kind: StatementKind,
        date: ReferenceDate,
    ) -> CoreResult<Option<ValuedAccountNode>> {
        fetch_tree(self.source.as_ref(), company_id, kind, date.as_of()).await
    }

    /// Today's statement with the values it had on `reference` alongside.
    ///
    /// Keeps today's structure; `None` only when there is no statement today.
    pub async fn point_in_time(
        &self,
        company_id: &str,
        kind: StatementKind,
        reference: NaiveDate,
    ) -> CoreResult<Option<MergedNode>> {
        let source = self.source.as_ref();
        let (current, at_reference) = tokio::try_join!(
            fetch_tree(source, company_id, kind, None),
            fetch_tree(source, company_id, kind, Some(reference)),
        )?;

        Ok(current.map(|current| merge_at_reference(&current, at_reference.as_ref())))
    }

    /// The same statement at two dates, every branch of either kept
    pub async fn comparative(
        &self,
        company_id: &str,
        kind: StatementKind,
        date_a: ReferenceDate,
        date_b: ReferenceDate,
    ) -> CoreResult<Option<MergedNode>> {
        let source = self.source.as_ref();
        let (tree_a, tree_b) = tokio::try_join!(
            fetch_tree(source, company_id, kind, date_a.as_of()),
            fetch_tree(source, company_id, kind, date_b.as_of()),
        )?;

        Ok(diff_trees(tree_a.as_ref(), tree_b.as_ref()))
    }

    /// Balance sheet; `None` when either side is missing from the source
    pub async fn balance_sheet(
        &self,
        company_id: &str,
        date: ReferenceDate,
    ) -> CoreResult<Option<BalanceSheet>> {
        let source = self.source.as_ref();
        let as_of = date.as_of();
        let (assets, liabilities_and_equity) = tokio::try_join!(
            fetch_tree(source, company_id, StatementKind::Assets, as_of),
            fetch_tree(source, company_id, StatementKind::LiabilitiesEquity, as_of),
        )?;

        Ok(match (assets, liabilities_and_equity) {
            (Some(assets), Some(liabilities_and_equity)) => {
                Some(summarize_balance_sheet(&assets, &liabilities_and_equity))
            }
            _ => None,
        })
    }

    /// Income statement at the configured tax rates
    pub async fn income_statement(
        &self,
        company_id: &str,
        date: ReferenceDate,
    ) -> CoreResult<IncomeStatement> {
        let raw = self
            .source
            .income_statement_inputs(company_id, date.as_of())
            .await?;
        let inputs = convert::income_inputs_from_raw(&raw);
        Ok(compute_income_statement_with_rates(
            &inputs,
            TaxRates::from(&self.config.taxes),
        ))
    }

    pub async fn indicators(&self, company_id: &str) -> CoreResult<FinancialIndicators> {
        let raw = self.source.financial_indicators(company_id).await?;
        Ok(convert::indicators_from_raw(&raw))
    }
}

async fn fetch_tree(
    source: &dyn StatementSource,
    company_id: &str,
    kind: StatementKind,
    as_of: Option<NaiveDate>,
) -> CoreResult<Option<ValuedAccountNode>> {
    let raw = source.account_tree(company_id, kind, as_of).await?;
    Ok(raw.as_ref().map(convert::tree_from_raw))
}
