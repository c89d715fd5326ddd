//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use crate::adapters::csv_adapter::CsvPriceAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_chart_adapter::JsonChartAdapter;
use crate::domain::chart_request::{
    build_chart, normalize_ticker, validate_ndays, ChartRequest, DEFAULT_NDAYS,
};
use crate::domain::chart_spec::ChartStyle;
use crate::domain::config_validation::{validate_chart_config, validate_data_config};
use crate::domain::error::ChartError;
use crate::domain::layout::{plan, PanelFlags, PanelLayout};
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;

#[derive(Parser, Debug)]
#[command(name = "stockchart", about = "Candlestick charts with technical indicators")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute indicators and write a chart description
    Chart {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        ndays: Option<usize>,
        #[arg(long)]
        style: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Treat this date as today (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Print the panel layout for a set of toggles
    Layout {
        #[arg(long)]
        volume: bool,
        #[arg(long)]
        bollinger: bool,
        #[arg(long)]
        rsi: bool,
        #[arg(long)]
        macd: bool,
    },
    /// Validate a chart configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Chart {
            config,
            code,
            ndays,
            style,
            output,
            as_of,
        } => {
            let overrides = ChartOverrides {
                code,
                ndays,
                style,
                output,
            };
            run_chart(&config, &overrides, as_of)
        }
        Command::Layout {
            volume,
            bollinger,
            rsi,
            macd,
        } => {
            let layout = plan(PanelFlags {
                volume,
                bollinger,
                rsi,
                macd,
            });
            print!("{}", format_layout(&layout));
            ExitCode::SUCCESS
        }
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ChartError> {
    FileConfigAdapter::from_file(path).map_err(|e| ChartError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Command-line values that win over the config file.
#[derive(Debug, Default, Clone)]
pub struct ChartOverrides {
    pub code: Option<String>,
    pub ndays: Option<usize>,
    pub style: Option<String>,
    pub output: Option<PathBuf>,
}

fn report(err: &ChartError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

fn run_chart(config_path: &PathBuf, overrides: &ChartOverrides, as_of: Option<NaiveDate>) -> ExitCode {
    info!(path = %config_path.display(), "loading config");
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return report(&e),
    };

    // file values shadowed by a flag are never checked
    let result = validate_data_config(&adapter)
        .and_then(|_| build_request(&adapter, overrides))
        .and_then(validate_request);
    let request = match result {
        Ok(r) => r,
        Err(e) => return report(&e),
    };

    let data_dir = PathBuf::from(adapter.get_string("data", "dir").unwrap_or_default());
    let data_port = CsvPriceAdapter::new(data_dir);
    let output = resolve_output(&adapter, overrides);
    let today = as_of.unwrap_or_else(|| chrono::Local::now().date_naive());

    match run_chart_pipeline(&data_port, &JsonChartAdapter, &request, &output, today) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

pub fn build_request(
    config: &dyn ConfigPort,
    overrides: &ChartOverrides,
) -> Result<ChartRequest, ChartError> {
    let code = overrides
        .code
        .clone()
        .or_else(|| config.get_string("chart", "code"))
        .ok_or_else(|| ChartError::ConfigMissing {
            section: "chart".into(),
            key: "code".into(),
        })?;

    let ndays = match (overrides.ndays, config.get_string("chart", "ndays")) {
        (Some(n), _) => n,
        (None, None) => DEFAULT_NDAYS,
        (None, Some(raw)) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ChartError::ConfigInvalid {
                section: "chart".into(),
                key: "ndays".into(),
                reason: format!("{:?} is not a positive integer", raw.trim()),
            })?,
    };

    let style = match overrides
        .style
        .clone()
        .or_else(|| config.get_string("chart", "style"))
    {
        Some(name) => name.parse::<ChartStyle>()?,
        None => ChartStyle::Default,
    };

    let flags = PanelFlags {
        volume: config.get_bool("chart", "volume", true),
        bollinger: config.get_bool("chart", "bollinger", true),
        rsi: config.get_bool("chart", "rsi", true),
        macd: config.get_bool("chart", "macd", true),
    };

    Ok(ChartRequest {
        code,
        ndays,
        style,
        flags,
    })
}

/// Checks the merged request before any data is read.
pub fn validate_request(request: ChartRequest) -> Result<ChartRequest, ChartError> {
    normalize_ticker(&request.code)?;
    validate_ndays(request.ndays)?;
    Ok(request)
}

pub fn resolve_output(config: &dyn ConfigPort, overrides: &ChartOverrides) -> PathBuf {
    overrides
        .output
        .clone()
        .or_else(|| config.get_string("chart", "output").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("chart.json"))
}

pub fn run_chart_pipeline(
    data_port: &dyn PriceDataPort,
    chart_port: &dyn ChartPort,
    request: &ChartRequest,
    output: &PathBuf,
    today: NaiveDate,
) -> Result<(), ChartError> {
    info!(
        code = %request.code.trim(),
        ndays = request.ndays,
        style = %request.style,
        "building chart"
    );
    let spec = build_chart(data_port, request, today)?;

    info!(
        rows = spec.bars.len(),
        panels = spec.panel_count(),
        height = spec.figure_height,
        "chart assembled"
    );
    chart_port.write(&spec, &output.display().to_string())
}

pub fn format_layout(layout: &PanelLayout) -> String {
    let mut out = String::new();
    out.push_str("panel 0: price (candles)\n");
    for (group, panel) in layout.assignment.entries() {
        out.push_str(&format!("  {}: panel {}\n", group, panel));
    }
    let ratios: Vec<String> = layout.ratios.iter().map(|r| r.to_string()).collect();
    out.push_str(&format!("ratios: {}\n", ratios.join(",")));
    out.push_str(&format!("height: {}\n", layout.figure_height));
    out
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    info!(path = %config_path.display(), "validating config");
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return report(&e),
    };

    if let Err(e) = validate_data_config(&adapter).and_then(|_| validate_chart_config(&adapter)) {
        return report(&e);
    }

    match build_request(&adapter, &ChartOverrides::default()) {
        Ok(request) => {
            let layout = plan(request.flags);
            eprintln!("Chart configuration is valid.");
            eprintln!("  code:  {}", request.code.trim().to_uppercase());
            eprintln!("  ndays: {}", request.ndays);
            eprintln!("  style: {}", request.style);
            eprint!("{}", format_layout(&layout));
            ExitCode::SUCCESS
        }
        Err(ChartError::ConfigMissing { key, .. }) if key == "code" => {
            eprintln!("Chart configuration is valid (no default code; pass --code).");
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}
