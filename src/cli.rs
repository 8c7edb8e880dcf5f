//! CLI definition and dispatch.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::{CsvAdapter, CsvNewsSource};
use crate::adapters::csv_export::CsvExporter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_export::JsonExporter;
use crate::adapters::lexicon_sentiment::LexiconSentiment;
use crate::adapters::tracing_diagnostics::TracingDiagnostics;
use crate::domain::config::CuratorConfig;
use crate::domain::dataset::Dataset;
use crate::domain::error::CuratorError;
use crate::domain::exchange::validate_symbol;
use crate::domain::pipeline::{self, CollectRequest, Sources, DEFAULT_DAYS};
use crate::domain::relevance::relevance;
use crate::domain::sentiment::sentiment;
use crate::ports::diagnostics_port::DiagnosticsPort;
use crate::ports::export_port::ExportPort;
use crate::ports::news_port::NewsSource;

pub const DEFAULT_CONFIG_FILE: &str = "fincurator.ini";

#[derive(Parser, Debug)]
#[command(
    name = "fincurator",
    about = "Daily feature curation from prices and news headlines"
)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect, curate and export a dataset for one symbol
    Collect(CollectArgs),
    /// Print relevance and sentiment of one headline
    Score {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        headline: String,
    },
    /// Validate a configuration file
    CheckConfig {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CollectArgs {
    /// NYSE, NASDAQ, PSX or CRYPTO
    #[arg(long)]
    pub exchange: String,
    /// Ticker, e.g. AAPL or BTC-USD
    #[arg(long)]
    pub symbol: String,
    #[arg(long, default_value_t = DEFAULT_DAYS, allow_negative_numbers = true)]
    pub days: i64,
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Both)]
    pub format: OutputFormat,
    #[arg(long = "output-dir", default_value = "./output")]
    pub output_dir: PathBuf,
    /// INI file; defaults apply when omitted and fincurator.ini is absent
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Overrides [data] dir
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
    Both,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Collect(args) => run_collect(&args, Utc::now()).map(|(dataset, paths)| {
            print_summary(&dataset, &paths);
        }),
        Command::Score { symbol, headline } => run_score(&symbol, &headline),
        Command::CheckConfig { config } => run_check_config(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<CuratorConfig, CuratorError> {
    let adapter = match path {
        Some(p) => FileConfigAdapter::from_file(p)?,
        None => FileConfigAdapter::load_or_default(DEFAULT_CONFIG_FILE)?,
    };
    CuratorConfig::from_port(&adapter)
}

/// Runs the pipeline against the CSV data directory and writes the requested
/// exports. Returns the dataset and the paths written.
pub fn run_collect(
    args: &CollectArgs,
    now: DateTime<Utc>,
) -> Result<(Dataset, Vec<PathBuf>), CuratorError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }

    let diagnostics = TracingDiagnostics;
    let prices = CsvAdapter::new(config.data_dir.clone());
    let news = CsvNewsSource::new(
        config.data_dir.join(&config.news_file),
        config.news.min_headline_length,
        &diagnostics,
    );
    let analyzer = LexiconSentiment::new();
    let sources = Sources {
        prices: &prices,
        market: &prices,
        news: vec![&news as &dyn NewsSource],
        sentiment: &analyzer,
    };
    let request = CollectRequest {
        exchange: args.exchange.clone(),
        symbol: args.symbol.clone(),
        days: args.days,
        now,
    };

    let dataset = pipeline::collect(&request, &sources, &config, &diagnostics)?;

    let mut exporters: Vec<Box<dyn ExportPort>> = Vec::new();
    if matches!(args.format, OutputFormat::Csv | OutputFormat::Both) {
        exporters.push(Box::new(CsvExporter));
    }
    if matches!(args.format, OutputFormat::Json | OutputFormat::Both) {
        exporters.push(Box::new(JsonExporter::new(config.json_pretty)));
    }

    let base_name = dataset.base_name();
    let paths = exporters
        .iter()
        .map(|exporter| -> Result<PathBuf, CuratorError> {
            let path = exporter.export(&dataset, &args.output_dir, &base_name)?;
            diagnostics.info("export", &format!("wrote {}", path.display()));
            Ok(path)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((dataset, paths))
}

fn print_summary(dataset: &Dataset, paths: &[PathBuf]) {
    let meta = &dataset.metadata;
    println!("Symbol:          {} ({})", meta.symbol, meta.exchange);
    println!(
        "Days collected:  {} of {}",
        meta.days_collected, meta.days_requested
    );
    println!(
        "Quality score:   {:.2} ({} of {} records complete)",
        meta.quality.score, meta.quality.complete_records, meta.quality.total_records
    );
    for issue in &meta.quality.issues {
        println!("  - {}", issue);
    }
    for path in paths {
        println!("Wrote {}", path.display());
    }
}

fn run_score(symbol: &str, headline: &str) -> Result<(), CuratorError> {
    let symbol = validate_symbol(symbol)?;
    let relevance = relevance(headline, &symbol);
    let sentiment = sentiment(&LexiconSentiment::new(), headline, &TracingDiagnostics);
    println!("relevance: {:.1}", relevance);
    println!("sentiment: {:.3}", sentiment);
    Ok(())
}

fn run_check_config(path: &Path) -> Result<(), CuratorError> {
    let config = load_config(Some(path))?;
    let ind = &config.indicators;
    println!("{}: OK", path.display());
    println!(
        "  ma_periods {:?}, rsi {}, macd {}/{}/{}, bollinger {} x {}",
        ind.ma_periods,
        ind.rsi_period,
        ind.macd_fast,
        ind.macd_slow,
        ind.macd_signal,
        ind.bollinger_period,
        ind.bollinger_std
    );
    println!(
        "  min_relevance {}, outlier method {:?}",
        config.news.min_relevance, config.quality.outlier_method
    );
    match &config.features {
        Some(fields) => println!(
            "  features: {}",
            fields.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(", ")
        ),
        None => println!("  features: all"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_collect_defaults() {
        let cli = Cli::parse_from([
            "fincurator",
            "collect",
            "--exchange",
            "NASDAQ",
            "--symbol",
            "AAPL",
        ]);
        match cli.command {
            Command::Collect(args) => {
                assert_eq!(args.days, 7);
                assert_eq!(args.format, OutputFormat::Both);
                assert_eq!(args.output_dir, PathBuf::from("./output"));
                assert!(args.config.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_collect_overrides() {
        let cli = Cli::parse_from([
            "fincurator",
            "-v",
            "collect",
            "--exchange",
            "psx",
            "--symbol",
            "hbl",
            "--days",
            "-2",
            "--output-format",
            "json",
            "--output-dir",
            "/tmp/out",
        ]);
        assert!(cli.verbose);
        let Command::Collect(args) = cli.command else {
            panic!("expected collect");
        };
        assert_eq!(args.days, -2);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Cli::try_parse_from([
            "fincurator",
            "collect",
            "--exchange",
            "NYSE",
            "--symbol",
            "IBM",
            "--output-format",
            "xml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_score() {
        let cli = Cli::parse_from([
            "fincurator",
            "score",
            "--symbol",
            "AAPL",
            "--headline",
            "Apple rallies",
        ]);
        assert!(matches!(cli.command, Command::Score { .. }));
    }
}
