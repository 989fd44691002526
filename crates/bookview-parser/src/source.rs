//! Statement source reading collaborator payloads from a directory of JSON files.
//!
//! Layout, one directory per company:
//!
//! ```text
//! <root>/<company>/chart.json
//! <root>/<company>/journal.json
//! <root>/<company>/trees/<kind>.json
//! <root>/<company>/trees/<kind>@<YYYY-MM-DD>.json
//! <root>/<company>/income.json
//! <root>/<company>/income@<YYYY-MM-DD>.json
//! <root>/<company>/indicators.json
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::error::{best_error_message, is_error_payload, ParseError};
use crate::types::{
    RawAccount, RawIncomeInputs, RawIndicators, RawJournalEntry, RawTreeNode, StatementKind,
};
use crate::StatementSource;

/// File-backed [`StatementSource`]
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory of one company; ids that could leave the data root are refused
    fn company_dir(&self, company_id: &str) -> Result<PathBuf, ParseError> {
        let id = company_id.trim();
        let escapes = id.is_empty()
            || id == "."
            || id.contains("..")
            || id.contains(['/', '\\', ':'])
            || Path::new(id).is_absolute();
        if escapes {
            log::warn!(target: "bookview::source", "rejected company id {:?}", company_id);
            return Err(ParseError::InvalidCompany {
                id: company_id.to_string(),
            });
        }
        Ok(self.root.join(id))
    }

    fn dated_name(stem: &str, as_of: Option<NaiveDate>) -> String {
        match as_of {
            Some(date) => format!("{}@{}.json", stem, date.format("%Y-%m-%d")),
            None => format!("{}.json", stem),
        }
    }

    /// Read and decode one JSON file.
    ///
    /// An error envelope is reported as [`ParseError::Collaborator`] with the
    /// best message it carries.
    async fn read_json<T: DeserializeOwned + Send>(path: &Path) -> Result<T, ParseError> {
        let location = path.to_string_lossy().to_string();
        log::debug!(target: "bookview::source", "reading {}", location);

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ParseError::NotFound { path: location });
            }
            Err(e) => return Err(ParseError::IoError(e)),
        };

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| ParseError::InvalidPayload {
                location: location.clone(),
                message: e.to_string(),
            })?;

        if is_error_payload(&value) {
            let message = best_error_message(&value)
                .unwrap_or_else(|| format!("error payload at {}", location));
            return Err(ParseError::Collaborator { message });
        }

        serde_json::from_value::<T>(value).map_err(|e| ParseError::InvalidPayload {
            location,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl StatementSource for JsonDirectorySource {
    async fn chart_of_accounts(&self, company_id: &str) -> Result<Vec<RawAccount>, ParseError> {
        Self::read_json(&self.company_dir(company_id)?.join("chart.json")).await
    }

    async fn journal_entries(&self, company_id: &str) -> Result<Vec<RawJournalEntry>, ParseError> {
        Self::read_json(&self.company_dir(company_id)?.join("journal.json")).await
    }

    async fn account_tree(
        &self,
        company_id: &str,
        kind: StatementKind,
        as_of: Option<NaiveDate>,
    ) -> Result<Option<RawTreeNode>, ParseError> {
        let path = self
            .company_dir(company_id)?
            .join("trees")
            .join(Self::dated_name(&kind.to_string(), as_of));

        match Self::read_json(&path).await {
            Ok(node) => Ok(Some(node)),
            Err(ParseError::NotFound { path }) => {
                log::info!(target: "bookview::source", "no {} tree at {}", kind, path);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn income_statement_inputs(
        &self,
        company_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<RawIncomeInputs, ParseError> {
        let path = self
            .company_dir(company_id)?
            .join(Self::dated_name("income", as_of));
        Self::read_json(&path).await
    }

    async fn financial_indicators(&self, company_id: &str) -> Result<RawIndicators, ParseError> {
        Self::read_json(&self.company_dir(company_id)?.join("indicators.json")).await
    }
}
