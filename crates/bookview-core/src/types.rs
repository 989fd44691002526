//! Basic types for the accounting engine

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Account type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// What the company owns (cash, receivables, equipment)
    Asset,
    /// What the company owes (suppliers, loans)
    Liability,
    /// Owners' interest (capital, retained earnings)
    Equity,
    /// Sales and other income
    Revenue,
    /// Costs incurred
    Expense,
}

impl AccountType {
    pub const ALL: [AccountType; 5] = [
        AccountType::Asset,
        AccountType::Liability,
        AccountType::Equity,
        AccountType::Revenue,
        AccountType::Expense,
    ];

    /// The side whose postings increase this type's balance
    pub fn normal_side(&self) -> Side {
        match self {
            AccountType::Asset | AccountType::Expense => Side::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => Side::Credit,
        }
    }

    /// Assets and liabilities must carry a subtype
    pub fn requires_subtype(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Liability)
    }
}

impl std::str::FromStr for AccountType {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" | "assets" => Ok(AccountType::Asset),
            "liability" | "liabilities" => Ok(AccountType::Liability),
            "equity" => Ok(AccountType::Equity),
            "revenue" | "revenues" | "income" => Ok(AccountType::Revenue),
            "expense" | "expenses" => Ok(AccountType::Expense),
            _ => Err(CoreError::UnknownAccountType {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Asset => write!(f, "ASSET"),
            AccountType::Liability => write!(f, "LIABILITY"),
            AccountType::Equity => write!(f, "EQUITY"),
            AccountType::Revenue => write!(f, "REVENUE"),
            AccountType::Expense => write!(f, "EXPENSE"),
        }
    }
}

/// Posting side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Debit,
    Credit,
}

impl std::str::FromStr for Side {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" | "d" => Ok(Side::Debit),
            "credit" | "c" => Ok(Side::Credit),
            _ => Err(CoreError::UnknownSide {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Debit => write!(f, "DEBIT"),
            Side::Credit => write!(f, "CREDIT"),
        }
    }
}

/// First-level refinement of assets and liabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountSubtype {
    Current,
    NonCurrent,
}

impl std::str::FromStr for AccountSubtype {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "current" => Ok(AccountSubtype::Current),
            "non_current" | "noncurrent" => Ok(AccountSubtype::NonCurrent),
            _ => Err(format!("Invalid subtype: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountSubtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountSubtype::Current => write!(f, "CURRENT"),
            AccountSubtype::NonCurrent => write!(f, "NON_CURRENT"),
        }
    }
}

/// Group of a non-current asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NonCurrentGroup {
    LongTermReceivable,
    Investment,
    Fixed,
    Intangible,
    Other,
}

impl std::str::FromStr for NonCurrentGroup {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "long_term_receivable" | "receivable_long_term" => Ok(NonCurrentGroup::LongTermReceivable),
            "investment" | "investments" => Ok(NonCurrentGroup::Investment),
            "fixed" => Ok(NonCurrentGroup::Fixed),
            "intangible" => Ok(NonCurrentGroup::Intangible),
            "other" => Ok(NonCurrentGroup::Other),
            _ => Err(format!("Invalid non-current group: {}", s)),
        }
    }
}

impl std::fmt::Display for NonCurrentGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonCurrentGroup::LongTermReceivable => write!(f, "LONG_TERM_RECEIVABLE"),
            NonCurrentGroup::Investment => write!(f, "INVESTMENT"),
            NonCurrentGroup::Fixed => write!(f, "FIXED"),
            NonCurrentGroup::Intangible => write!(f, "INTANGIBLE"),
            NonCurrentGroup::Other => write!(f, "OTHER"),
        }
    }
}
