//! Configuration management for bookview
//!
//! This module handles loading, validation, and management of
//! bookview configuration from YAML files.

pub mod error;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

/// Statutory corporate income tax rate (15%)
pub const CORPORATE_INCOME_TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Statutory social contribution tax rate (9%)
pub const SOCIAL_CONTRIBUTION_TAX_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 2);

// ==================== Configuration Types ====================

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter: error, warn, info, debug, trace or an env_logger directive list
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Location of the JSON directory source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

/// Income statement tax rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    #[serde(default = "default_corporate_income_rate")]
    pub corporate_income_rate: Decimal,
    #[serde(default = "default_social_contribution_rate")]
    pub social_contribution_rate: Decimal,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            corporate_income_rate: CORPORATE_INCOME_TAX_RATE,
            social_contribution_rate: SOCIAL_CONTRIBUTION_TAX_RATE,
        }
    }
}

fn default_corporate_income_rate() -> Decimal {
    CORPORATE_INCOME_TAX_RATE
}

fn default_social_contribution_rate() -> Decimal {
    SOCIAL_CONTRIBUTION_TAX_RATE
}

/// General journal listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    #[serde(default = "default_records_per_page")]
    pub records_per_page: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            records_per_page: default_records_per_page(),
        }
    }
}

fn default_records_per_page() -> usize {
    10
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_currency")]
    pub code: String,
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency(),
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

fn default_currency() -> String {
    "BRL".to_string()
}

fn default_symbol() -> String {
    "R$".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ".".to_string()
}

fn default_decimal_sep() -> String {
    ",".to_string()
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Before,
    After,
}

impl std::str::FromStr for SymbolPosition {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" => Ok(SymbolPosition::Before),
            "after" => Ok(SymbolPosition::After),
            _ => Err(format!("Invalid symbol position: {}", s)),
        }
    }
}

impl std::fmt::Display for SymbolPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolPosition::Before => write!(f, "before"),
            SymbolPosition::After => write!(f, "after"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub taxes: TaxConfig,
    #[serde(default)]
    pub journal: JournalConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let display = path.to_string_lossy().to_string();

        if !path.exists() {
            return Err(ConfigError::FileNotFound { path: display });
        }

        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::IoError { path: display })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        let rates = [
            ("taxes.corporate_income_rate", self.taxes.corporate_income_rate),
            ("taxes.social_contribution_rate", self.taxes.social_contribution_rate),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "Rate must be between 0 and 1".to_string(),
                });
            }
        }

        if self.journal.records_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "journal.records_per_page".to_string(),
                reason: "Records per page must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.currency.thousands_separator.is_empty() || self.currency.decimal_separator.is_empty()
        {
            return Err(ConfigError::InvalidValue {
                field: "currency".to_string(),
                reason: "Separators must not be empty".to_string(),
            });
        }

        if self.currency.thousands_separator == self.currency.decimal_separator {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_separator".to_string(),
                reason: "Decimal and thousands separators must differ".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}
