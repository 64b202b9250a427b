//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::{CsvAdapter, DateRange};
use crate::adapters::fallback_adapter::FallbackDataPort;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::analysis_config::{validate_risk_free_rate, AnalysisConfig};
use crate::domain::catalogue;
use crate::domain::correlation::{CorrelationResult, MIN_COMMON_PERIOD};
use crate::domain::error::TradestatError;
use crate::domain::indicator::{IndicatorParams, IndicatorRow, IndicatorSeries, IndicatorValue};
use crate::domain::session::AnalysisSession;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(
    name = "tradestat",
    about = "Rolling indicators and risk statistics for a price series"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where price data comes from and which part of it to use.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceOptions {
    /// INI file with [data] and [analysis] sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory holding <SYMBOL>.csv files; repeat to add fallbacks
    #[arg(long)]
    pub data_dir: Vec<PathBuf>,
    /// Name of the date column in CSV input
    #[arg(long)]
    pub date_column: Option<String>,
    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute indicators and risk metrics and print a report
    Analyze {
        /// CSV file path, or a symbol looked up in the data directories
        input: String,
        #[command(flatten)]
        source: SourceOptions,
        /// Number of indicator rows to print
        #[arg(long, default_value_t = 20)]
        tail: usize,
        /// Override the risk-free rate
        #[arg(long)]
        risk_free_rate: Option<f64>,
    },
    /// Correlate the daily returns of two inputs
    Correlate {
        left: String,
        right: String,
        #[command(flatten)]
        source: SourceOptions,
    },
    /// Print rolling linear trend slope and R^2
    Trend {
        input: String,
        #[command(flatten)]
        source: SourceOptions,
        /// Regression window
        #[arg(long)]
        period: Option<usize>,
        #[arg(long, default_value_t = 20)]
        tail: usize,
    },
    /// List the built-in symbol catalogue by category
    Symbols {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Analyze {
            input,
            source,
            tail,
            risk_free_rate,
        } => run_analyze(&input, &source, tail, risk_free_rate),
        Command::Correlate {
            left,
            right,
            source,
        } => run_correlate(&left, &right, &source),
        Command::Trend {
            input,
            source,
            period,
            tail,
        } => run_trend(&input, &source, period, tail),
        Command::Symbols { category } => run_list_symbols(category.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if matches!(e, TradestatError::NoData { .. }) {
                eprintln!(
                    "hint: check that the symbol is valid and that the data source is reachable"
                );
            }
            (&e).into()
        }
    }
}

/// Load `[data]`/`[analysis]` settings, then apply command-line overrides.
pub fn resolve_config(source: &SourceOptions) -> Result<AnalysisConfig, TradestatError> {
    let mut config = match &source.config {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            let adapter = FileConfigAdapter::from_file(path)?;
            AnalysisConfig::from_config(&adapter)?
        }
        None => AnalysisConfig::default(),
    };

    if !source.data_dir.is_empty() {
        config.data_dirs = source.data_dir.clone();
    }
    if let Some(column) = &source.date_column {
        config.date_column = column.clone();
    }
    Ok(config)
}

/// Open a session for `input`: an existing file is read as CSV, anything else
/// is treated as a symbol and looked up through the configured directories.
pub fn open_session(
    input: &str,
    source: &SourceOptions,
    config: &AnalysisConfig,
) -> Result<AnalysisSession, TradestatError> {
    let range = DateRange {
        start: source.start,
        end: source.end,
    };

    let path = Path::new(input);
    if path.is_file() {
        eprintln!("Loading {}", path.display());
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.to_string());
        let mut session = AnalysisSession::new(Some(label));
        session.load_csv_range(path, &config.date_column, range)?;
        return Ok(session);
    }

    if config.data_dirs.is_empty() {
        return Err(TradestatError::ConfigInvalid {
            section: "data".into(),
            key: "dir".into(),
            reason: format!(
                "'{}' is not a file and no data directory is configured",
                input
            ),
        });
    }

    let port = build_data_port(config);
    let symbol = input.trim().to_uppercase();
    eprintln!("Fetching {} from {} source(s)", symbol, port.len());
    AnalysisSession::fetch(&port, &symbol, range.start.unwrap_or(NaiveDate::MIN), range.end)
}

pub fn build_data_port(config: &AnalysisConfig) -> FallbackDataPort {
    let providers: Vec<Box<dyn DataPort>> = config
        .data_dirs
        .iter()
        .map(|dir| {
            Box::new(CsvAdapter::new(dir.clone(), config.date_column.clone())) as Box<dyn DataPort>
        })
        .collect();
    FallbackDataPort::new(providers)
}

fn run_analyze(
    input: &str,
    source: &SourceOptions,
    tail: usize,
    risk_free_rate: Option<f64>,
) -> Result<(), TradestatError> {
    let config = resolve_config(source)?;
    let risk_free_rate = risk_free_rate.unwrap_or(config.risk_free_rate);
    validate_risk_free_rate(risk_free_rate)?;

    let mut session = open_session(input, source, &config)?;
    if let Some(symbol) = session.symbol() {
        println!("{}\n", catalogue::display_label(symbol));
    }

    let table = session.compute_indicators(config.indicators)?;
    println!("{}", format_indicator_rows(table.tail(tail), &table.params));
    session.compute_risk_metrics(risk_free_rate)?;

    print!("{}", session.generate_report());
    Ok(())
}

fn run_correlate(left: &str, right: &str, source: &SourceOptions) -> Result<(), TradestatError> {
    let config = resolve_config(source)?;
    let left = open_session(left, source, &config)?;
    let right = open_session(right, source, &config)?;

    let result = left.correlation_with(&right)?;
    println!(
        "{}",
        format_correlation(
            result.as_ref(),
            left.symbol().unwrap_or("Asset1"),
            right.symbol().unwrap_or("Asset2")
        )
    );
    Ok(())
}

fn run_trend(
    input: &str,
    source: &SourceOptions,
    period: Option<usize>,
    tail: usize,
) -> Result<(), TradestatError> {
    let config = resolve_config(source)?;
    let period = period.unwrap_or(config.trend_period);
    let session = open_session(input, source, &config)?;

    let series = session.indicator_engine()?.trend_regression(period);
    println!("{}", format_trend(&series, tail));
    Ok(())
}

fn run_list_symbols(category: Option<&str>) -> Result<(), TradestatError> {
    let text = format_symbol_catalogue(category);
    if text.is_empty() {
        return Err(TradestatError::invalid_input(format!(
            "unknown category '{}'; expected one of: {}",
            category.unwrap_or_default(),
            catalogue::categories().join(", ")
        )));
    }
    print!("{}", text);
    Ok(())
}

/// Catalogue grouped by category; `category` matches case-insensitively.
pub fn format_symbol_catalogue(category: Option<&str>) -> String {
    let mut out = String::new();
    for name in catalogue::categories() {
        if category.is_some_and(|c| !c.trim().eq_ignore_ascii_case(name)) {
            continue;
        }
        out.push_str(&format!("{}:\n", name));
        for entry in catalogue::entries_in(name) {
            out.push_str(&format!("  {:<12}{}\n", entry.symbol, entry.name));
        }
    }
    out
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("${:.2}", v))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}%", v * 100.0))
}

/// Fixed-width table of indicator rows; undefined values print as `-`.
pub fn format_indicator_rows(rows: &[IndicatorRow], params: &IndicatorParams) -> String {
    let mut out = format!(
        "{:<12}{:>12}{:>12}{:>12}{:>16}{:>16}\n",
        "Date",
        "Price",
        format!("SMA ({})", params.sma_period),
        format!("EMA ({})", params.ema_period),
        "Volatility",
        format!("Momentum ({})", params.momentum_period),
    );
    for row in rows {
        out.push_str(&format!(
            "{:<12}{:>12}{:>12}{:>12}{:>16}{:>16}\n",
            row.date.to_string(),
            money(Some(row.close)),
            money(row.sma),
            money(row.ema),
            percent(row.volatility),
            percent(row.momentum),
        ));
    }
    out
}

pub fn format_trend(series: &IndicatorSeries, tail: usize) -> String {
    let mut out = format!("{}\n{:<12}{:>14}{:>10}\n", series.indicator_type, "Date", "Slope", "R^2");
    let start = series.values.len().saturating_sub(tail);
    for point in &series.values[start..] {
        let (slope, r_squared) = match point.value {
            Some(IndicatorValue::Trend { slope, r_squared }) => {
                (format!("{:.4}", slope), format!("{:.4}", r_squared))
            }
            _ => ("-".to_string(), "-".to_string()),
        };
        out.push_str(&format!(
            "{:<12}{:>14}{:>10}\n",
            point.date.to_string(),
            slope,
            r_squared
        ));
    }
    out
}

pub fn format_correlation(result: Option<&CorrelationResult>, left: &str, right: &str) -> String {
    match result {
        Some(r) => format!(
            "Correlation {} vs {}: {:.4} over {} common dates",
            r.symbol1, r.symbol2, r.correlation, r.common_period
        ),
        None => format!(
            "Not enough overlapping data to correlate {} and {} (need at least {} common dates with price variation)",
            left, right, MIN_COMMON_PERIOD
        ),
    }
}
