//! CDLRadar CLI: scan, analyze and universe commands.
//!
//! Commands:
//! - `scan`: evaluate the configured watchlist once (or every refresh
//!   interval with `--watch`) and print a table or JSON
//! - `analyze`: evaluate one instrument from a CSV file
//! - `universe`: list the default watchlist

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;

use cdlradar_core::data::csv_supplier::read_candles;
use cdlradar_core::data::{
    CandleSupplier, CsvSupplier, MarketCacheSupplier, SyntheticSupplier, TimeSeriesSupplier,
};
use cdlradar_core::domain::{AssetClass, MultiTimeframeAnalysis, SignalType, Timeframe};
use cdlradar_core::{AnalysisPipeline, AnalysisRequest};
use cdlradar_runner::universe::symbols_for;
use cdlradar_runner::{
    AnalysisCache, NewsCalendar, ScanReport, ScannerConfig, Scanner, SortKey, WatchlistView,
};

/// Environment variable holding the market-cache API key.
const API_KEY_VAR: &str = "CDLRADAR_API_KEY";

#[derive(Parser)]
#[command(
    name = "cdlradar",
    about = "CDLRadar: multi-timeframe signal fusion and power scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the watchlist and print one row per instrument.
    Scan {
        /// Path to a TOML scanner config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Read candles from `<DIR>/<symbol>.csv` files.
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// Use deterministic synthetic candles.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Synthetic per-step drift as a fraction of price.
        #[arg(long, default_value_t = 0.0)]
        drift: f64,

        /// Synthetic per-step volatility as a fraction of price.
        #[arg(long, default_value_t = 0.002)]
        volatility: f64,

        /// Read candles from a market-cache REST endpoint (API key from CDLRADAR_API_KEY).
        #[arg(long)]
        market_cache: Option<String>,

        /// Read candles from a time-series proxy endpoint.
        #[arg(long)]
        time_series: Option<String>,

        /// JSON economic calendar keyed by symbol.
        #[arg(long)]
        news: Option<PathBuf>,

        /// Persist the analysis cache in this file between runs.
        #[arg(long)]
        cache_file: Option<PathBuf>,

        /// Only show one asset class.
        #[arg(long)]
        class: Option<String>,

        /// Case-insensitive symbol filter.
        #[arg(long)]
        search: Option<String>,

        /// Sort by symbol, action, signal or price.
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending.
        #[arg(long, default_value_t = false)]
        desc: bool,

        /// Print the full report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Rescan every refresh interval until interrupted.
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
    /// Analyze one instrument from a CSV file of 5-minute candles.
    Analyze {
        #[arg(long)]
        symbol: String,

        /// CSV with header datetime,open,high,low,close,volume.
        #[arg(long)]
        file: PathBuf,

        /// Optional 30-second CSV; enables precision mode.
        #[arg(long)]
        precision_file: Option<PathBuf>,

        /// Print the analysis as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the default instrument universe.
    Universe {
        /// Only list one asset class.
        #[arg(long)]
        class: Option<String>,
    },
}

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            config,
            csv_dir,
            synthetic,
            drift,
            volatility,
            market_cache,
            time_series,
            news,
            cache_file,
            class,
            search,
            sort,
            desc,
            json,
            watch,
        } => {
            let supplier =
                build_supplier(csv_dir, synthetic.then_some((drift, volatility)), market_cache, time_series)?;
            let view = build_view(class.as_deref(), search, sort.as_deref(), desc)?;
            run_scan(
                config.as_deref(),
                supplier,
                news.as_deref(),
                cache_file.as_deref(),
                &view,
                json,
                watch,
            )
        }
        Commands::Analyze {
            symbol,
            file,
            precision_file,
            json,
        } => run_analyze(&symbol, &file, precision_file.as_deref(), json),
        Commands::Universe { class } => run_universe(class.as_deref()),
    }
}

fn build_supplier(
    csv_dir: Option<PathBuf>,
    synthetic: Option<(f64, f64)>,
    market_cache: Option<String>,
    time_series: Option<String>,
) -> Result<Box<dyn CandleSupplier>> {
    let chosen = [
        csv_dir.is_some(),
        synthetic.is_some(),
        market_cache.is_some(),
        time_series.is_some(),
    ]
    .into_iter()
    .filter(|b| *b)
    .count();
    if chosen != 1 {
        bail!("exactly one of --csv-dir, --synthetic, --market-cache or --time-series is required");
    }

    if let Some(dir) = csv_dir {
        if !dir.is_dir() {
            bail!("CSV directory does not exist: {}", dir.display());
        }
        return Ok(Box::new(CsvSupplier::new(dir)));
    }
    if let Some(url) = market_cache {
        let key = std::env::var(API_KEY_VAR)
            .with_context(|| format!("{API_KEY_VAR} must be set for --market-cache"))?;
        return Ok(Box::new(MarketCacheSupplier::new(url, key)?));
    }
    if let Some(endpoint) = time_series {
        return Ok(Box::new(TimeSeriesSupplier::new(endpoint)?));
    }
    let (drift, volatility) = synthetic.unwrap_or((0.0, 0.002));
    Ok(Box::new(
        SyntheticSupplier::default()
            .with_drift(drift)
            .with_volatility(volatility),
    ))
}

fn parse_class(name: &str) -> Result<AssetClass> {
    Ok(name.parse::<AssetClass>()?)
}

fn build_view(
    class: Option<&str>,
    search: Option<String>,
    sort: Option<&str>,
    desc: bool,
) -> Result<WatchlistView> {
    let mut view = WatchlistView {
        asset_class: class.map(parse_class).transpose()?,
        search: search.unwrap_or_default(),
        sort: None,
    };
    if let Some(key) = sort {
        let key = match key.to_ascii_lowercase().as_str() {
            "symbol" => SortKey::Symbol,
            "action" => SortKey::Action,
            "signal" => SortKey::Signal,
            "price" => SortKey::Price,
            other => bail!("unknown sort key '{other}'. Valid: symbol, action, signal, price"),
        };
        view.request_sort(key);
        if desc {
            view.request_sort(key);
        }
    }
    Ok(view)
}

#[allow(clippy::too_many_arguments)]
fn run_scan(
    config_path: Option<&Path>,
    supplier: Box<dyn CandleSupplier>,
    news_path: Option<&Path>,
    cache_path: Option<&Path>,
    view: &WatchlistView,
    json: bool,
    watch: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ScannerConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScannerConfig::default(),
    };

    let mut scanner = Scanner::new(&config, supplier)?;
    if let Some(path) = news_path {
        let calendar = NewsCalendar::from_file(path)
            .with_context(|| format!("failed to load calendar {}", path.display()))?;
        scanner = scanner.with_calendar(calendar);
    }
    if let Some(path) = cache_path {
        scanner = scanner.with_cache(AnalysisCache::load(path)?);
    }

    loop {
        let generation = scanner.next_generation();
        let report = scanner.scan(generation, Utc::now());

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_table(&report, &scanner, view);
        }
        if let Some(path) = cache_path {
            scanner.cache().save(path)?;
        }

        if !watch {
            return Ok(());
        }
        info!(
            seconds = config.refresh_interval().as_secs(),
            "waiting for next refresh"
        );
        std::thread::sleep(config.refresh_interval());
    }
}

fn run_analyze(symbol: &str, file: &Path, precision_file: Option<&Path>, json: bool) -> Result<()> {
    let base = read_candles(file).with_context(|| format!("failed to read {}", file.display()))?;
    let fine = precision_file
        .map(|p| read_candles(p).with_context(|| format!("failed to read {}", p.display())))
        .transpose()?;

    let mut request = AnalysisRequest::new(symbol, &base, Utc::now());
    if let Some(fine) = fine.as_deref() {
        request = request.with_precision(fine);
    }
    let analysis = AnalysisPipeline::default().analyze(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis, base.len());
    }
    Ok(())
}

fn run_universe(class: Option<&str>) -> Result<()> {
    let classes = match class {
        Some(name) => vec![parse_class(name)?],
        None => AssetClass::ALL.to_vec(),
    };
    for class in classes {
        let symbols = symbols_for(class);
        println!("{class} ({})", symbols.len());
        println!("  {}", symbols.join(", "));
    }
    Ok(())
}

// ── Output ───────────────────────────────────────────────────────────

/// One-character signal marker for the timeframe columns.
fn dot(signal: SignalType) -> &'static str {
    match signal {
        SignalType::Buy => "▲",
        SignalType::Sale => "▼",
        SignalType::Neutral => "·",
    }
}

fn print_table(report: &ScanReport, scanner: &Scanner, view: &WatchlistView) {
    let rows = view.rows(scanner.instruments(), |s| report.analysis(s));

    println!();
    println!(
        "Scan #{} at {} ({})",
        report.generation,
        report.at.format("%Y-%m-%d %H:%M:%S UTC"),
        scanner.supplier_name()
    );
    println!(
        "{:<10} {:<12} {:>3} {:>3} {:>3} {:>3} {:>12} {:>5}  {}",
        "Symbol", "Class", "4h", "1h", "15m", "5m", "Price", "Score", "Action"
    );
    println!("{}", "-".repeat(72));
    for row in rows {
        let symbol = row.instrument.symbol.as_str();
        match row.analysis {
            Some(a) => println!(
                "{:<10} {:<12} {:>3} {:>3} {:>3} {:>3} {:>12.4} {:>5}  {}",
                symbol,
                row.instrument.asset_class.as_str(),
                dot(a.signal(Timeframe::Hour4)),
                dot(a.signal(Timeframe::Hour1)),
                dot(a.signal(Timeframe::Min15)),
                dot(a.signal(Timeframe::Min5)),
                a.price,
                a.power_score,
                a.action
            ),
            None => println!(
                "{:<10} {:<12} {:>3} {:>3} {:>3} {:>3} {:>12} {:>5}  {}",
                symbol, row.instrument.asset_class.as_str(), "-", "-", "-", "-", "-", "-", "no data"
            ),
        }
    }
    println!();
    println!(
        "analyzed {}, cached {}, skipped {}, failed {}",
        report.analyzed(),
        report.cached(),
        report.skipped(),
        report.failed()
    );
    for alert in &report.alerts {
        println!("ALERT: {:?} {}", alert.kind, alert.symbol);
    }
}

fn print_analysis(analysis: &MultiTimeframeAnalysis, candle_count: usize) {
    println!();
    println!("=== {} ===", analysis.symbol);
    println!("Candles:        {candle_count}");
    println!("Price:          {:.5}", analysis.price);
    for (tf, signal) in &analysis.signals {
        println!("{:<15} {}", format!("{tf}:"), signal);
    }
    println!("Main signal:    {}", analysis.main_signal);
    println!();
    println!("--- Power score ---");
    println!("Alignment:      {:>3}", analysis.breakdown.alignment);
    println!("Volume:         {:>3}", analysis.breakdown.volume);
    println!("Volatility:     {:>3}", analysis.breakdown.volatility);
    println!("Momentum:       {:>3}", analysis.breakdown.momentum);
    println!("Total:          {:>3}", analysis.power_score);
    println!();
    println!("Action:         {}", analysis.action);
    if analysis.precision_mode {
        println!("(precision mode)");
    }
    println!();
}
