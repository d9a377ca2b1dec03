use analyzer::{Analyzer, AnalyzerSettings, BatchOutcome, provider_from_config};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use configuration::{Config, DataSource};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use reporter::{
    RiskReport, render_metrics_table, render_simulation_table, write_history_csv,
    write_json_report, write_paths_csv,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// The main entry point for the Vantage risk analysis application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; it only carries optional overrides.
    dotenvy::dotenv().ok();
    let _guard = init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => handle_analyze(args).await,
        Commands::Serve(args) => handle_serve(args).await,
    }
}

/// Logs go to stdout and to a daily rolling file under `logs/`.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "vantage.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();
    guard
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Historical risk metrics and Monte Carlo price projections for stocks and crypto.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a set of symbols and write the report artifacts.
    Analyze(AnalyzeArgs),
    /// Start the dashboard API.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Symbols to analyze (e.g., "AAPL BTC-USD" or "AAPL,BTC-USD"). Defaults to `data.tickers`.
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    tickers: Vec<String>,

    /// First date of the history window (format: YYYY-MM-DD).
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End of the history window, exclusive (format: YYYY-MM-DD).
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Number of simulated paths per symbol.
    #[arg(long)]
    sims: Option<usize>,

    /// Number of trading days to project forward.
    #[arg(long)]
    horizon: Option<usize>,

    /// Seed for reproducible simulations.
    #[arg(long)]
    seed: Option<u64>,

    /// Where price histories come from.
    #[arg(long, value_enum)]
    source: Option<DataSource>,

    /// Directory for the report artifacts. Defaults to `reports.output_dir`.
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on. Defaults to `server.addr`.
    #[arg(long)]
    addr: Option<SocketAddr>,

    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Folds the command-line overrides into the loaded configuration.
fn apply_overrides(config: &mut Config, args: &AnalyzeArgs) -> anyhow::Result<()> {
    if !args.tickers.is_empty() {
        config.data.tickers = args.tickers.iter().map(|t| t.trim().to_uppercase()).collect();
    }
    if let Some(start) = args.start {
        config.data.start_date = start;
    }
    if let Some(end) = args.end {
        config.data.end_date = end;
    }
    if let Some(source) = args.source {
        config.data.source = source;
    }
    if let Some(sims) = args.sims {
        config.monte_carlo.simulations = sims;
    }
    if let Some(horizon) = args.horizon {
        config.monte_carlo.horizon_days = horizon;
    }
    if args.seed.is_some() {
        config.monte_carlo.seed = args.seed;
    }
    if let Some(output) = &args.output {
        config.reports.output_dir = output.clone();
    }
    configuration::validate(config)?;
    Ok(())
}

async fn handle_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut config = configuration::load_config(&args.config)?;
    apply_overrides(&mut config, &args)?;

    let data = &config.data;
    tracing::info!(
        tickers = ?data.tickers,
        start = %data.start_date,
        end = %data.end_date,
        source = ?data.source,
        "Starting analysis."
    );

    let provider = provider_from_config(data).context("Failed to build the price provider")?;
    let analyzer = Analyzer::new(AnalyzerSettings::from_config(&config), provider);

    // --- Fetch ---
    let progress_bar = ProgressBar::new(data.tickers.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    let fetches = data.tickers.iter().map(|symbol| {
        let progress_bar = progress_bar.clone();
        let analyzer = &analyzer;
        async move {
            let history = analyzer.fetch(symbol, data.start_date, data.end_date).await;
            progress_bar.inc(1);
            progress_bar.set_message(format!("Fetched {symbol}"));
            history
        }
    });
    let histories = join_all(fetches).await;
    progress_bar.finish_with_message("Download complete!");

    // --- Analyze and simulate ---
    let outcome = analyzer.analyze_histories(histories);
    if outcome.analyses.is_empty() {
        anyhow::bail!("No symbol could be analyzed ({} failed).", outcome.failures.len());
    }

    let report = RiskReport::build(
        &outcome,
        data.start_date,
        data.end_date,
        config.monte_carlo.simulations,
        config.monte_carlo.horizon_days,
    );
    print_results(&config, &report, &outcome);
    write_artifacts(&config, &report, &outcome)?;
    Ok(())
}

fn print_results(config: &Config, report: &RiskReport, outcome: &BatchOutcome) {
    println!("\n{}\n", report.narrative);
    println!("Historical Risk Metrics");
    println!("{}", render_metrics_table(&outcome.analyses));
    println!(
        "\nMonte Carlo Projection ({} paths, {} days)",
        config.monte_carlo.simulations, config.monte_carlo.horizon_days
    );
    println!("{}", render_simulation_table(&outcome.analyses));

    for failure in &report.failures {
        println!("Skipped {}: {}", failure.symbol, failure.reason);
    }
}

fn write_artifacts(
    config: &Config,
    report: &RiskReport,
    outcome: &BatchOutcome,
) -> anyhow::Result<()> {
    let dir: &Path = &config.reports.output_dir;
    let report_path = write_json_report(dir, report)?;

    for analysis in &outcome.analyses {
        write_paths_csv(
            dir,
            analysis.symbol(),
            &analysis.simulation,
            config.reports.max_paths_exported,
        )?;
        write_history_csv(dir, analysis)?;
    }

    println!("\nReport written to {}", report_path.display());
    Ok(())
}

// ==============================================================================
// Serve Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = configuration::load_config(&args.config)?;
    let addr = match args.addr {
        Some(addr) => addr,
        None => config
            .server
            .addr
            .parse()
            .with_context(|| format!("Invalid server address '{}'", config.server.addr))?,
    };
    web_server::run_server(addr, config).await
}
