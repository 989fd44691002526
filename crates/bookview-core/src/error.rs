//! Error types for bookview-core
//!
//! Two classes of problems come out of the engine. Configuration errors (an
//! account type outside the known set, a subtype combination the chart rules
//! forbid) fail fast and are returned. Data shape mismatches (a posting that
//! names an account missing from the chart, a non-numeric value) are logged
//! and read as zero so a single bad record cannot blank a whole statement.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bookview_parser::ParseError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnknownAccountType,
    InvalidSubtype,
    UnknownSide,
    InvalidDate,
    AccountNotFound,
    SourceError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::UnknownAccountType => write!(f, "UNKNOWN_ACCOUNT_TYPE"),
            ErrorCode::InvalidSubtype => write!(f, "INVALID_SUBTYPE"),
            ErrorCode::UnknownSide => write!(f, "UNKNOWN_SIDE"),
            ErrorCode::InvalidDate => write!(f, "INVALID_DATE"),
            ErrorCode::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            ErrorCode::SourceError => write!(f, "SOURCE_ERROR"),
        }
    }
}

/// Broad class of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Chart or enumeration misconfiguration; fails fast
    Configuration,
    /// Record does not fit the expected shape; zero-valued fallback
    DataShape,
    /// The storage/reporting collaborator failed
    Source,
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Detailed error information for presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for bookview-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown account type: {value}")]
    UnknownAccountType { value: String },

    #[error("Invalid subtype for account {code}: {reason}")]
    InvalidSubtype { code: String, reason: String },

    #[error("Unknown posting side: {value}")]
    UnknownSide { value: String },

    #[error("Invalid date: {value}")]
    InvalidDate { value: String },

    #[error("Account not found: {code}")]
    AccountNotFound { code: String },

    #[error("Source error: {0}")]
    Source(#[from] ParseError),
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::UnknownAccountType { .. } => ErrorCode::UnknownAccountType,
            CoreError::InvalidSubtype { .. } => ErrorCode::InvalidSubtype,
            CoreError::UnknownSide { .. } => ErrorCode::UnknownSide,
            CoreError::InvalidDate { .. } => ErrorCode::InvalidDate,
            CoreError::AccountNotFound { .. } => ErrorCode::AccountNotFound,
            CoreError::Source(_) => ErrorCode::SourceError,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            CoreError::UnknownAccountType { .. }
            | CoreError::InvalidSubtype { .. }
            | CoreError::UnknownSide { .. } => ErrorCategory::Configuration,
            CoreError::InvalidDate { .. } | CoreError::AccountNotFound { .. } => {
                ErrorCategory::DataShape
            }
            CoreError::Source(_) => ErrorCategory::Source,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::DataShape => ErrorSeverity::Warning,
            ErrorCategory::Source => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::UnknownAccountType { value } => {
                details = details
                    .with_detail(serde_json::json!({ "account_type": value }))
                    .with_suggestion(
                        "Use one of ASSET, LIABILITY, EQUITY, REVENUE, EXPENSE.".to_string(),
                    );
            }
            CoreError::InvalidSubtype { code, .. } => {
                details = details
                    .with_detail(serde_json::json!({ "account": code }))
                    .with_suggestion(
                        "Assets and liabilities need CURRENT or NON_CURRENT; other types take no subtype."
                            .to_string(),
                    )
                    .with_suggestion(
                        "A second subtype is only allowed on non-current assets.".to_string(),
                    );
            }
            CoreError::AccountNotFound { code } => {
                details = details.with_suggestion(format!(
                    "Check that account '{}' exists in the company's chart of accounts.",
                    code
                ));
            }
            CoreError::InvalidDate { .. } => {
                details = details
                    .with_suggestion("Dates are YYYY-MM-DD or DD-MM-YYYY.".to_string());
            }
            CoreError::Source(ParseError::Collaborator { message }) => {
                details = details.with_detail(serde_json::json!({ "collaborator_message": message }));
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub operation: String,
    pub company_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: String) -> Self {
        Self {
            operation,
            company_id: None,
        }
    }

    pub fn with_company(mut self, company_id: String) -> Self {
        self.company_id = Some(company_id);
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        log::error!(
            target: "bookview::error",
            "ERROR [{}] {} - Operation: {} - Company: {:?}",
            error.code(),
            error.to_details(),
            context.operation,
            context.company_id
        );
    }
}

// ==================== Tests ====================
