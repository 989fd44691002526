//! Collaborator payloads for bookview
//!
//! Raw shapes served by the storage/reporting collaborator, tolerant amount
//! decoding, and the [`StatementSource`] seam the core fetches through.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

pub mod amount;
pub mod error;
pub mod source;
pub mod types;

pub use amount::{decode_amount, parse_amount, AmountValue};
pub use error::{best_error_message, is_error_payload, ParseError};
pub use source::JsonDirectorySource;
pub use types::{
    RawAccount, RawExpenseLine, RawIncomeInputs, RawIndicators, RawJournalEntry, RawPosting,
    RawTreeNode, StatementKind,
};

/// Side names used on the wire
pub const DEBIT: &str = "DEBIT";
pub const CREDIT: &str = "CREDIT";

// ==================== Source Trait ====================

/// Source reference type
pub type SourceRef = Arc<dyn StatementSource>;

/// Storage/reporting collaborator.
///
/// Every call names the company explicitly; implementations hold no session.
#[async_trait]
pub trait StatementSource: Send + Sync {
    /// Chart of accounts of a company
    async fn chart_of_accounts(&self, company_id: &str) -> Result<Vec<RawAccount>, ParseError>;

    /// All journal entries of a company, in creation order
    async fn journal_entries(&self, company_id: &str) -> Result<Vec<RawJournalEntry>, ParseError>;

    /// Postings of one account in journal order.
    ///
    /// The default derives them from [`StatementSource::journal_entries`]; an
    /// entry whose debit and credit name the same account yields both sides.
    async fn list_postings(
        &self,
        company_id: &str,
        account_code: &str,
    ) -> Result<Vec<RawPosting>, ParseError> {
        let entries = self.journal_entries(company_id).await?;
        let mut postings = Vec::new();

        for entry in entries {
            if entry.debit_account == account_code {
                postings.push(RawPosting {
                    date: entry.date.clone(),
                    description: entry.description.clone(),
                    side: DEBIT.to_string(),
                    amount: entry.amount.clone(),
                });
            }
            if entry.credit_account == account_code {
                postings.push(RawPosting {
                    date: entry.date,
                    description: entry.description,
                    side: CREDIT.to_string(),
                    amount: entry.amount,
                });
            }
        }

        Ok(postings)
    }

    /// Statement tree as of a date (`None` means today).
    ///
    /// `Ok(None)` when the collaborator has no tree for that date.
    async fn account_tree(
        &self,
        company_id: &str,
        kind: StatementKind,
        as_of: Option<NaiveDate>,
    ) -> Result<Option<RawTreeNode>, ParseError>;

    /// Scalar inputs of the income statement as of a date
    async fn income_statement_inputs(
        &self,
        company_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<RawIncomeInputs, ParseError>;

    /// Financial indicators of a company
    async fn financial_indicators(&self, company_id: &str) -> Result<RawIndicators, ParseError>;
}
