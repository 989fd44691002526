//! Bookview main entry point

use anyhow::Context;
use bookview_config::Config;
use bookview_core::reports;
use bookview_core::{
    parse_reference_date, Bookkeeper, CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger,
    ReferenceDate,
};
use bookview_parser::{JsonDirectorySource, StatementKind};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "bookview")]
#[command(author = "Bookview Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Bookkeeping reports: ledgers, trial balance, statement trees and income statement", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Render amounts with the configured currency instead of raw numbers
    #[arg(short, long, global = true)]
    formatted: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct Company {
    /// Company identifier
    company: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Running-balance ledger of one account
    Ledger {
        #[command(flatten)]
        company: Company,
        /// Account code
        account: String,
    },
    /// General journal, one page at a time
    Journal {
        #[command(flatten)]
        company: Company,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Debits, credits and balance per account
    TrialBalance {
        #[command(flatten)]
        company: Company,
    },
    /// Aggregated statement tree
    Tree {
        #[command(flatten)]
        company: Company,
        #[arg(short, long, default_value = "assets")]
        kind: StatementKind,
        /// "today", YYYY-MM-DD or DD-MM-YYYY
        #[arg(short, long, default_value = "today")]
        date: ReferenceDate,
        /// Build the tree under this account from the chart and journal instead
        #[arg(long)]
        root: Option<String>,
    },
    /// Today's statement with the values it had on a reference date
    PointInTime {
        #[command(flatten)]
        company: Company,
        #[arg(short, long, default_value = "assets")]
        kind: StatementKind,
        #[arg(short, long, value_parser = reference_date)]
        reference: NaiveDate,
    },
    /// The same statement at two dates, side by side
    Compare {
        #[command(flatten)]
        company: Company,
        #[arg(short, long, default_value = "assets")]
        kind: StatementKind,
        #[arg(long, default_value = "today")]
        date_a: ReferenceDate,
        #[arg(long)]
        date_b: ReferenceDate,
    },
    /// Balance sheet totals
    BalanceSheet {
        #[command(flatten)]
        company: Company,
        #[arg(short, long, default_value = "today")]
        date: ReferenceDate,
    },
    /// Income statement at the configured tax rates
    IncomeStatement {
        #[command(flatten)]
        company: Company,
        #[arg(short, long, default_value = "today")]
        date: ReferenceDate,
    },
    /// Liquidity, solvency and return indicators
    Indicators {
        #[command(flatten)]
        company: Company,
    },
    /// Print the default configuration file
    InitConfig,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Ledger { .. } => "ledger",
            Command::Journal { .. } => "journal",
            Command::TrialBalance { .. } => "trial_balance",
            Command::Tree { .. } => "tree",
            Command::PointInTime { .. } => "point_in_time",
            Command::Compare { .. } => "compare",
            Command::BalanceSheet { .. } => "balance_sheet",
            Command::IncomeStatement { .. } => "income_statement",
            Command::Indicators { .. } => "indicators",
            Command::InitConfig => "init_config",
        }
    }

    fn company(&self) -> Option<&str> {
        match self {
            Command::Ledger { company, .. }
            | Command::Journal { company, .. }
            | Command::TrialBalance { company }
            | Command::Tree { company, .. }
            | Command::PointInTime { company, .. }
            | Command::Compare { company, .. }
            | Command::BalanceSheet { company, .. }
            | Command::IncomeStatement { company, .. }
            | Command::Indicators { company } => Some(&company.company),
            Command::InitConfig => None,
        }
    }
}

fn reference_date(value: &str) -> Result<NaiveDate, CoreError> {
    parse_reference_date(value)
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    Config::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text).context("Failed to write report")?;
    stdout.flush().context("Failed to write report")
}

/// Print a report, or its formatted view when asked for one
fn emit<T: Serialize, V: Serialize>(formatted: bool, value: &T, view: impl FnOnce(&T) -> V) -> anyhow::Result<()> {
    if formatted {
        print_json(&view(value))
    } else {
        print_json(value)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Command::InitConfig = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = load_config(&args.config)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level))
        .init();

    if !args.config.exists() {
        log::warn!("{} not found, using default configuration", args.config.display());
    }
    log::info!("Data path: {}", config.data.path.display());

    let source = Arc::new(JsonDirectorySource::new(config.data.path.clone()));
    let keeper = Bookkeeper::new(config, source);

    let rt = Runtime::new()?;
    let result = rt.block_on(run(&keeper, &args));

    result.map_err(|e| {
        if let Some(core) = e.downcast_ref::<CoreError>() {
            let mut context = ErrorContext::new(args.command.name().to_string());
            if let Some(company) = args.command.company() {
                context = context.with_company(company.to_string());
            }
            DefaultErrorLogger.log_error(core, &context);
        }
        e.context(format!("{} failed", args.command.name()))
    })
}

async fn run(keeper: &Bookkeeper, args: &Args) -> anyhow::Result<()> {
    let style = keeper.number_style();
    let formatted = args.formatted;

    match &args.command {
        Command::Ledger { company, account } => {
            let statement = keeper.ledger(&company.company, account).await?;
            emit(formatted, &statement, |s| {
                reports::ledger_report(&s.account.code, &s.account.name, &s.ledger, &style)
            })
        }
        Command::Journal { company, page } => {
            let page = keeper.journal_page(&company.company, *page).await?;
            print_json(&page)
        }
        Command::TrialBalance { company } => {
            let trial = keeper.trial_balance(&company.company).await?;
            emit(formatted, &trial, |t| reports::trial_balance_report(t, &style))
        }
        Command::Tree {
            company,
            kind,
            date,
            root,
        } => {
            let tree = match root {
                Some(root) => keeper.chart_tree(&company.company, root).await?,
                None => keeper.statement_tree(&company.company, *kind, *date).await?,
            };
            print_json(&tree)
        }
        Command::PointInTime {
            company,
            kind,
            reference,
        } => {
            let merged = keeper
                .point_in_time(&company.company, *kind, *reference)
                .await?;
            let label_b = ReferenceDate::On(*reference).description();
            emit(formatted, &merged, |m| {
                m.as_ref()
                    .map(|m| reports::comparison_report(m, "Today", &label_b, &style))
            })
        }
        Command::Compare {
            company,
            kind,
            date_a,
            date_b,
        } => {
            let merged = keeper
                .comparative(&company.company, *kind, *date_a, *date_b)
                .await?;
            emit(formatted, &merged, |m| {
                m.as_ref().map(|m| {
                    reports::comparison_report(m, &date_a.description(), &date_b.description(), &style)
                })
            })
        }
        Command::BalanceSheet { company, date } => {
            let sheet = keeper.balance_sheet(&company.company, *date).await?;
            emit(formatted, &sheet, |s| {
                s.as_ref().map(|s| reports::balance_sheet_lines(s, &style))
            })
        }
        Command::IncomeStatement { company, date } => {
            let statement = keeper.income_statement(&company.company, *date).await?;
            emit(formatted, &statement, |s| reports::income_statement_lines(s, &style))
        }
        Command::Indicators { company } => {
            let indicators = keeper.indicators(&company.company).await?;
            emit(formatted, &indicators, |i| reports::indicator_lines(i, &style))
        }
        Command::InitConfig => Ok(()),
    }
}
