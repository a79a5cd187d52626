//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::config_validation::{
    backtest_request_from_config, date_range_from_config, validate_backtest_request,
    validate_date_range,
};
use crate::domain::error::QuantlabError;
use crate::domain::panel::indicator_panel;
use crate::domain::report::{self, require_min_bars};
use crate::domain::strategy::{StrategyParams, StrategyRegistry};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "quantlab", about = "Technical indicator engine and MA backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a moving-average strategy backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute the indicator panel for a symbol
    Indicators {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        /// Price MA windows, comma-separated
        #[arg(long, default_value = "5,20")]
        ma_windows: String,
        /// Volume MA windows, comma-separated
        #[arg(long, default_value = "5")]
        vma_windows: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a backtest configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the data range for a symbol
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    run_on(cli, chrono::Local::now().date_naive())
}

/// Dispatch with an explicit "today" so request validation stays testable.
pub fn run_on(cli: Cli, today: NaiveDate) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            output,
        } => run_backtest(&config, symbol.as_deref(), output.as_deref(), today),
        Command::Indicators {
            config,
            symbol,
            ma_windows,
            vma_windows,
            output,
        } => run_indicators(
            &config,
            symbol.as_deref(),
            &ma_windows,
            &vma_windows,
            output.as_deref(),
            today,
        ),
        Command::Validate { config } => run_validate(&config, today),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
    }
}

pub fn load_config(path: &std::path::Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = QuantlabError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_backtest(
    config_path: &std::path::Path,
    symbol_override: Option<&str>,
    output_path: Option<&std::path::Path>,
    today: NaiveDate,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let request = match backtest_request_from_config(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if let Err(e) = validate_backtest_request(&request, today) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let symbol = match resolve_symbol(symbol_override, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let registry = StrategyRegistry::builtin();
    let strategy = match registry.create(
        &request.strategy,
        &StrategyParams {
            short_window: request.short_window,
            long_window: request.long_window,
        },
    ) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = match data_adapter(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Fetching {}: {} to {}",
        symbol, request.start_date, request.end_date
    );
    let bars = match data_port.fetch_ohlcv(&symbol, request.start_date, request.end_date) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Err(e) = require_min_bars(&bars, request.min_bars()) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!(
        "Running backtest: {} bars, {} strategy ({}/{})",
        bars.len(),
        strategy.name(),
        request.short_window,
        request.long_window
    );
    let result = report::run_backtest(&bars, strategy.as_ref(), request.initial_capital);

    eprintln!("\n=== Results ===");
    eprintln!(
        "Total Return:   {:.2}%",
        result.performance.total_return * 100.0
    );
    eprintln!(
        "Annual Return:  {:.2}%",
        result.performance.annual_return * 100.0
    );
    eprintln!(
        "Max Drawdown:   {:.2}%",
        result.performance.max_drawdown * 100.0
    );
    eprintln!(
        "Trades:         {} buys, {} sells",
        result.chart_data.buy_signals.len(),
        result.chart_data.sell_signals.len()
    );

    match JsonReportAdapter.write_backtest(&result, output_path) {
        Ok(()) => {
            if let Some(path) = output_path {
                eprintln!("\nReport written to: {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_indicators(
    config_path: &std::path::Path,
    symbol_override: Option<&str>,
    ma_windows: &str,
    vma_windows: &str,
    output_path: Option<&std::path::Path>,
    today: NaiveDate,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let outcome = (|| -> Result<(), QuantlabError> {
        let (start_date, end_date) = date_range_from_config(&config)?;
        validate_date_range(start_date, end_date, today)?;

        let ma = parse_windows(ma_windows, "ma_windows")?;
        let vma = parse_windows(vma_windows, "vma_windows")?;

        let symbol = resolve_symbol(symbol_override, &config)?;
        let data_port = data_adapter(&config)?;
        let bars = data_port.fetch_ohlcv(&symbol, start_date, end_date)?;

        eprintln!("Computing indicators: {} bars for {}", bars.len(), symbol);
        let panel = indicator_panel(&bars, &ma, &vma);
        JsonReportAdapter.write_panel(&panel, output_path)
    })();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &std::path::Path, today: NaiveDate) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let outcome = (|| -> Result<(), QuantlabError> {
        let request = backtest_request_from_config(&config)?;
        validate_backtest_request(&request, today)?;

        let registry = StrategyRegistry::builtin();
        registry.create(
            &request.strategy,
            &StrategyParams {
                short_window: request.short_window,
                long_window: request.long_window,
            },
        )?;

        eprintln!("  strategy:  {}", request.strategy);
        eprintln!("  windows:   {}/{}", request.short_window, request.long_window);
        eprintln!("  capital:   {}", request.initial_capital);
        eprintln!("  range:     {} to {}", request.start_date, request.end_date);
        Ok(())
    })();

    match outcome {
        Ok(()) => {
            eprintln!("\nConfiguration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_list_symbols(config_path: &std::path::Path) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let outcome = (|| -> Result<(), QuantlabError> {
        let data_port = data_adapter(&config)?;
        let symbols = data_port.list_symbols()?;
        if symbols.is_empty() {
            eprintln!("No symbols found");
        } else {
            for symbol in &symbols {
                println!("{}", symbol);
            }
            eprintln!("{} symbols found", symbols.len());
        }
        Ok(())
    })();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &std::path::Path, symbol_override: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let outcome = (|| -> Result<(), QuantlabError> {
        let symbol = resolve_symbol(symbol_override, &config)?;
        let data_port = data_adapter(&config)?;
        match data_port.get_data_range(&symbol)? {
            Some((min_date, max_date, count)) => {
                println!("{}: {} bars, {} to {}", symbol, count, min_date, max_date);
            }
            None => {
                eprintln!("{}: no data found", symbol);
            }
        }
        Ok(())
    })();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn resolve_symbol(
    symbol_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<String, QuantlabError> {
    if let Some(s) = symbol_override {
        return Ok(s.to_uppercase());
    }
    config
        .get_string("backtest", "symbol")
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| QuantlabError::ConfigMissing {
            section: "backtest".into(),
            key: "symbol".into(),
        })
}

fn data_adapter(config: &dyn ConfigPort) -> Result<CsvAdapter, QuantlabError> {
    let dir = config
        .get_string("data", "dir")
        .ok_or_else(|| QuantlabError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })?;
    Ok(CsvAdapter::new(PathBuf::from(dir)))
}

/// Parse a comma-separated window list such as "5,20".
fn parse_windows(value: &str, key: &str) -> Result<Vec<usize>, QuantlabError> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .ok()
                .filter(|&w| w > 0)
                .ok_or_else(|| QuantlabError::ConfigInvalid {
                    section: "indicators".into(),
                    key: key.into(),
                    reason: format!("'{}' is not a positive integer", s),
                })
        })
        .collect()
}
