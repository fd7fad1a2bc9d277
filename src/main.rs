use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::Config;
use core_types::{CalculationMethod, HoldingPeriod};
use database::connection::{connect, run_migrations};
use database::repository::DbRepository;
use rust_decimal::Decimal;
use screener::{Screener, ScreenerFilters};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Almanac seasonality service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();
    let config = configuration::load_config()?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            let port = args.port.unwrap_or(config.server.port);
            let addr: SocketAddr = format!("{}:{}", config.server.host, port).parse()?;
            web_server::run_server(addr, config).await
        }
        Commands::Screen(args) => {
            let db_pool = connect().await?;
            run_migrations(&db_pool).await?;
            handle_screen(args, DbRepository::new(db_pool), config).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Historical seasonality analytics over monthly stock price aggregates.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve(ServeArgs),
    /// Run a one-shot screener scan and print the ranked patterns.
    Screen(ScreenArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Override the configured listen port.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct ScreenArgs {
    /// Minimum win rate, in whole percent.
    #[arg(long)]
    min_win_rate: Option<u32>,

    /// Minimum trimmed average return per month held, in percent.
    #[arg(long)]
    min_avg_per_month: Option<Decimal>,

    /// Minimum years of history backing a pattern.
    #[arg(long)]
    min_years: Option<usize>,

    /// Holding periods to scan (repeatable); defaults to all of 1, 3, 6, 12.
    #[arg(long = "period")]
    periods: Vec<u32>,

    /// Calendar months (1-12) to keep (repeatable); defaults to all.
    #[arg(long = "month")]
    months: Vec<u32>,

    /// How entry and exit prices are chosen.
    #[arg(long, value_enum, default_value = "open-close")]
    method: MethodArg,

    /// Maximum number of rows to print.
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    /// Enter at the anchor month's first open, exit at the target month's
    /// last close.
    OpenClose,
    /// Enter and exit at each month's maximum close.
    MaxMax,
}

impl From<MethodArg> for CalculationMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::OpenClose => CalculationMethod::OpenClose,
            MethodArg::MaxMax => CalculationMethod::MaxMax,
        }
    }
}

// ==============================================================================
// Screen Command Logic
// ==============================================================================

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Runs one screener scan against the tracked universe and prints the
/// ranked rows as a table.
async fn handle_screen(
    args: ScreenArgs,
    db_repo: DbRepository,
    config: Config,
) -> anyhow::Result<()> {
    let periods = if args.periods.is_empty() {
        HoldingPeriod::ALL.to_vec()
    } else {
        args.periods
            .iter()
            .map(|&months| HoldingPeriod::try_from(months))
            .collect::<Result<Vec<_>, _>>()?
    };
    for &month in &args.months {
        if !(1..=12).contains(&month) {
            anyhow::bail!("month out of range: {month}");
        }
    }

    let filters = ScreenerFilters {
        min_win_rate: args.min_win_rate.unwrap_or(config.screener.min_win_rate),
        min_avg_per_month: args
            .min_avg_per_month
            .unwrap_or(config.screener.min_avg_per_month),
        min_years: args.min_years.unwrap_or(config.screener.min_years),
        periods,
        months: if args.months.is_empty() {
            None
        } else {
            Some(args.months)
        },
        method: args.method.into(),
        limit: args.limit.unwrap_or(config.screener.limit),
    };

    let years_back = config.data.years_back;
    let tickers = db_repo.get_tracked_tickers().await?;
    tracing::info!(tickers = tickers.len(), "scanning tracked universe");

    let mut universe = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        let records = db_repo.get_monthly_prices(&ticker, years_back).await?;
        if !records.is_empty() {
            universe.push((ticker, records));
        }
    }
    let mut basket = Vec::with_capacity(config.benchmark.tickers.len());
    for member in &config.benchmark.tickers {
        basket.push(db_repo.get_monthly_prices(member, years_back).await?);
    }

    let report = Screener::new(filters).run(&universe, &basket)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "#", "Ticker", "Month", "Period", "Years", "Win %", "Avg %", "Avg %/mo", "Alpha", "Score",
    ]);
    for (rank, row) in report.results.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            row.ticker.clone(),
            MONTH_NAMES[row.entry_month as usize - 1].to_string(),
            row.holding_period.to_string(),
            row.count.to_string(),
            row.win_rate.to_string(),
            row.avg_return.to_string(),
            row.avg_per_month.to_string(),
            row.alpha.to_string(),
            row.score.round_dp(2).to_string(),
        ]);
    }
    println!("{table}");
    println!(
        "{} qualifying patterns across {} stocks",
        report.total_patterns, report.total_stocks
    );

    Ok(())
}
