//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::attribution::ridge_attribution;
use crate::domain::candidate::Objectives;
use crate::domain::config_validation::validate_analysis_config;
use crate::domain::error::RiskscopeError;
use crate::domain::pareto::pareto_frontier;
use crate::domain::performance::summarize;
use crate::domain::portfolio::{self, NamedCurve, Weights};
use crate::domain::report::{AnalysisReport, NamedSeries};
use crate::domain::rolling_metrics::{rolling_max_drawdown_pct, rolling_sharpe};
use crate::domain::vol_target::volatility_target_equity;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "riskscope",
    about = "Risk and sensitivity analytics for equity curves and parameter searches"
)]
pub struct Cli {
    /// INI file with [analysis], [vol_target], [pareto] and [attribution] sections
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub periods_per_year: Option<f64>,

    #[arg(long, global = true)]
    pub risk_free_rate: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct IoArgs {
    /// Input CSV file
    #[arg(short, long)]
    pub input: PathBuf,
    /// Output file; `.json` writes JSON, anything else CSV. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summary metrics for each curve
    Metrics {
        #[command(flatten)]
        io: IoArgs,
        #[arg(long)]
        curve: Option<String>,
    },
    /// Rolling Sharpe and rolling max drawdown series
    Rolling {
        #[command(flatten)]
        io: IoArgs,
        #[arg(long)]
        curve: Option<String>,
        #[arg(short, long)]
        window: Option<usize>,
    },
    /// Rescale curves to a target annualized volatility
    VolTarget {
        #[command(flatten)]
        io: IoArgs,
        #[arg(long)]
        curve: Option<String>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        lookback: Option<usize>,
    },
    /// Combine curves into one weighted portfolio
    Portfolio {
        #[command(flatten)]
        io: IoArgs,
        /// Explicit weights, e.g. `trend=2,meanrev=1`
        #[arg(long, conflicts_with = "risk_parity")]
        weights: Option<String>,
        /// Inverse-volatility weights
        #[arg(long)]
        risk_parity: bool,
        /// Also emit a volatility-targeted portfolio curve
        #[arg(long)]
        vol_target: bool,
        #[arg(short, long)]
        window: Option<usize>,
    },
    /// Non-dominated candidates of a parameter search
    Pareto {
        #[command(flatten)]
        io: IoArgs,
        #[arg(long, value_delimiter = ',')]
        maximize: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',')]
        minimize: Option<Vec<String>>,
    },
    /// Rank parameter influence on a score with ridge regression
    Attribution {
        #[command(flatten)]
        io: IoArgs,
        #[arg(long)]
        score: Option<String>,
        #[arg(long)]
        lambda: Option<f64>,
    },
}

/// How curves are weighted into a portfolio.
#[derive(Debug, Clone, PartialEq)]
pub enum Weighting {
    Equal,
    Explicit(Weights),
    RiskParity,
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            (&err).into()
        }
    }
}

fn execute(cli: Cli) -> Result<(), RiskscopeError> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(ppy) = cli.periods_per_year {
        config.periods_per_year = ppy;
    }
    if let Some(rf) = cli.risk_free_rate {
        config.risk_free_rate = rf;
    }

    let data = CsvAdapter::new(PathBuf::new());

    let (report, io) = match cli.command {
        Command::Metrics { io, curve } => {
            validate_analysis_config(&config)?;
            (metrics_report(&data, &source(&io), curve.as_deref(), &config)?, io)
        }
        Command::Rolling { io, curve, window } => {
            if let Some(w) = window {
                config.rolling_window = w;
            }
            validate_analysis_config(&config)?;
            (rolling_report(&data, &source(&io), curve.as_deref(), &config)?, io)
        }
        Command::VolTarget {
            io,
            curve,
            target,
            lookback,
        } => {
            if let Some(t) = target {
                config.vol_target.target_annual_vol = t;
            }
            if let Some(l) = lookback {
                config.vol_target.lookback = l;
            }
            validate_analysis_config(&config)?;
            (vol_target_report(&data, &source(&io), curve.as_deref(), &config)?, io)
        }
        Command::Portfolio {
            io,
            weights,
            risk_parity,
            vol_target,
            window,
        } => {
            if let Some(w) = window {
                config.rolling_window = w;
            }
            validate_analysis_config(&config)?;
            let weighting = match (weights, risk_parity) {
                (Some(raw), _) => Weighting::Explicit(parse_weights(&raw)?),
                (None, true) => Weighting::RiskParity,
                (None, false) => Weighting::Equal,
            };
            (
                portfolio_report(&data, &source(&io), &weighting, vol_target, &config)?,
                io,
            )
        }
        Command::Pareto {
            io,
            maximize,
            minimize,
        } => {
            if maximize.is_some() || minimize.is_some() {
                config.objectives = Objectives {
                    maximize: maximize.unwrap_or_default(),
                    minimize: minimize.unwrap_or_default(),
                };
            }
            validate_analysis_config(&config)?;
            (pareto_report(&data, &source(&io), &config)?, io)
        }
        Command::Attribution { io, score, lambda } => {
            if let Some(s) = score {
                config.score_key = s;
            }
            if let Some(l) = lambda {
                config.ridge_lambda = l;
            }
            validate_analysis_config(&config)?;
            (attribution_report(&data, &source(&io), &config)?, io)
        }
    };

    emit(&report, io.output.as_deref())
}

fn source(io: &IoArgs) -> String {
    io.input.to_string_lossy().into_owned()
}

/// Config from `path`, or all defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, RiskscopeError> {
    match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading config");
            let adapter = FileConfigAdapter::from_file(p)?;
            Ok(AnalysisConfig::from_config(&adapter))
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// Parses `name=weight` pairs separated by commas.
pub fn parse_weights(raw: &str) -> Result<Weights, RiskscopeError> {
    let invalid = |reason: String| RiskscopeError::ConfigInvalid {
        section: "portfolio".into(),
        key: "weights".into(),
        reason,
    };
    let mut weights = Weights::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| invalid(format!("expected name=weight, got {pair:?}")))?;
        let weight: f64 = value
            .trim()
            .parse()
            .map_err(|_| invalid(format!("invalid weight for {}: {value:?}", name.trim())))?;
        weights.insert(name.trim().to_string(), weight);
    }
    if weights.is_empty() {
        return Err(invalid("no weights given".into()));
    }
    Ok(weights)
}

/// Every curve in `source`, or only the one named `name`.
fn load_curves(
    data: &dyn DataPort,
    source: &str,
    name: Option<&str>,
) -> Result<Vec<NamedCurve>, RiskscopeError> {
    match name {
        Some(n) => Ok(vec![data.fetch_curve(source, n)?]),
        None => data.fetch_curves(source),
    }
}

pub fn metrics_report(
    data: &dyn DataPort,
    source: &str,
    curve: Option<&str>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, RiskscopeError> {
    let curves = load_curves(data, source, curve)?;
    tracing::info!(curves = curves.len(), source, "computing metrics");

    let mut report = AnalysisReport::new("metrics");
    for c in &curves {
        let summary = summarize(&c.values, config.risk_free_rate, config.periods_per_year);
        if summary.is_none() {
            tracing::warn!(curve = %c.name, "fewer than three finite values, no summary");
        }
        report = report.with_summary(c.name.clone(), summary);
    }
    Ok(report)
}

pub fn rolling_report(
    data: &dyn DataPort,
    source: &str,
    curve: Option<&str>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, RiskscopeError> {
    let curves = load_curves(data, source, curve)?;
    tracing::info!(
        curves = curves.len(),
        window = config.rolling_window,
        "computing rolling metrics"
    );

    let mut report = AnalysisReport::new("rolling");
    for c in &curves {
        report = report
            .with_series(NamedSeries::new(
                format!("{} rolling_sharpe", c.name),
                rolling_sharpe(&c.values, config.rolling_window, config.periods_per_year),
            ))
            .with_series(NamedSeries::new(
                format!("{} rolling_mdd_pct", c.name),
                rolling_max_drawdown_pct(&c.values, config.rolling_window),
            ));
    }
    Ok(report)
}

pub fn vol_target_report(
    data: &dyn DataPort,
    source: &str,
    curve: Option<&str>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, RiskscopeError> {
    let curves = load_curves(data, source, curve)?;
    let vt = &config.vol_target;
    tracing::info!(
        curves = curves.len(),
        target = vt.target_annual_vol,
        lookback = vt.lookback,
        "volatility targeting"
    );

    let mut report = AnalysisReport::new("vol_target");
    for c in &curves {
        let targeted = volatility_target_equity(
            &c.values,
            vt.target_annual_vol,
            vt.lookback,
            config.periods_per_year,
        );
        let targeted_name = format!("{} (vt)", c.name);
        report = report
            .with_summary(
                c.name.clone(),
                summarize(&c.values, config.risk_free_rate, config.periods_per_year),
            )
            .with_summary(
                targeted_name.clone(),
                summarize(&targeted, config.risk_free_rate, config.periods_per_year),
            )
            .with_series(NamedSeries::from_curve(c.name.clone(), &c.values))
            .with_series(NamedSeries::from_curve(targeted_name, &targeted));
    }
    Ok(report)
}

pub fn portfolio_report(
    data: &dyn DataPort,
    source: &str,
    weighting: &Weighting,
    with_vol_target: bool,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, RiskscopeError> {
    let curves = data.fetch_curves(source)?;
    let raw_weights: Weights = match weighting {
        Weighting::Equal => curves.iter().map(|c| (c.name.clone(), 1.0)).collect(),
        Weighting::Explicit(w) => w.clone(),
        Weighting::RiskParity => portfolio::risk_parity_weights(&curves),
    };
    let weights = portfolio::normalize_weights(&raw_weights);
    for name in weights.keys() {
        if !curves.iter().any(|c| &c.name == name) {
            tracing::warn!(curve = %name, "weighted curve not present in input");
        }
    }
    tracing::info!(curves = curves.len(), ?weights, "combining portfolio");

    let combined = portfolio::combine(&curves, &weights);
    let mut report = AnalysisReport::new("portfolio")
        .with_summary(
            "portfolio",
            summarize(&combined, config.risk_free_rate, config.periods_per_year),
        )
        .with_series(NamedSeries::from_curve("portfolio", &combined));

    if with_vol_target {
        let vt = &config.vol_target;
        let targeted = volatility_target_equity(
            &combined,
            vt.target_annual_vol,
            vt.lookback,
            config.periods_per_year,
        );
        report = report
            .with_summary(
                "portfolio (vt)",
                summarize(&targeted, config.risk_free_rate, config.periods_per_year),
            )
            .with_series(NamedSeries::from_curve("portfolio (vt)", &targeted));
    }

    Ok(report
        .with_series(NamedSeries::new(
            "rolling_sharpe",
            rolling_sharpe(&combined, config.rolling_window, config.periods_per_year),
        ))
        .with_series(NamedSeries::new(
            "rolling_mdd_pct",
            rolling_max_drawdown_pct(&combined, config.rolling_window),
        )))
}

pub fn pareto_report(
    data: &dyn DataPort,
    source: &str,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, RiskscopeError> {
    let candidates = data.fetch_candidates(source)?;
    let frontier: Vec<_> = pareto_frontier(&candidates, &config.objectives)
        .into_iter()
        .cloned()
        .collect();
    tracing::info!(
        candidates = candidates.len(),
        frontier = frontier.len(),
        "pareto filter"
    );
    Ok(AnalysisReport::new("pareto").with_frontier(frontier))
}

pub fn attribution_report(
    data: &dyn DataPort,
    source: &str,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, RiskscopeError> {
    let candidates = data.fetch_candidates(source)?;
    let attribution = ridge_attribution(&candidates, &config.score_key, config.ridge_lambda);
    if attribution.is_empty() {
        tracing::warn!(source, "no parameter columns to attribute");
    }
    tracing::info!(
        candidates = candidates.len(),
        parameters = attribution.len(),
        score = %config.score_key,
        "ridge attribution"
    );
    Ok(AnalysisReport::new("attribution").with_attribution(attribution))
}

/// Writes `report` to `output` (JSON for `.json`, CSV otherwise) or prints
/// CSV to stdout.
pub fn emit(report: &AnalysisReport, output: Option<&Path>) -> Result<(), RiskscopeError> {
    match output {
        None => {
            print!("{}", CsvReportAdapter::new().render(report)?);
            Ok(())
        }
        Some(path) => {
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            let port: Box<dyn ReportPort> = if is_json {
                Box::new(JsonReportAdapter::default())
            } else {
                Box::new(CsvReportAdapter::new())
            };
            port.write(report, &path.to_string_lossy())
        }
    }
}
