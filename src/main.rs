use std::time::Duration;

use clap::Parser;
use tracing::info;

mod calendar;
mod config;
mod forecast;
mod format;
mod rng;
mod weather;
mod wind;

use config::Config;
use forecast::GameTiming;

/// Wall-clock interval between day re-checks in watch mode.
const WATCH_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Parser, Debug)]
#[command(name = "vindheim")]
#[command(about = "Deterministic weather and wind forecaster for Valheim community servers")]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Forecast this in-game day instead of resolving the current one
    #[arg(short, long)]
    day: Option<u64>,

    /// Number of consecutive days to forecast
    #[arg(short = 'n', long, default_value = "1")]
    days: u64,

    /// Only show this biome (e.g. "meadows", "black forest")
    #[arg(short, long)]
    biome: Option<String>,

    /// Emit forecast rows as JSON instead of a table
    #[arg(short, long)]
    json: bool,

    /// Keep running, re-resolving the current day every five minutes
    #[arg(short, long)]
    watch: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = match args.verbose {
        0 => "vindheim=info",
        1 => "vindheim=debug",
        _ => "vindheim=trace",
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Vindheim v{}", env!("CARGO_PKG_VERSION"));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    run_forecast(&args, &client).await?;

    if args.watch {
        let mut ticker = tokio::time::interval(WATCH_INTERVAL);
        ticker.tick().await; // the first tick completes immediately
        loop {
            ticker.tick().await;
            run_forecast(&args, &client).await?;
        }
    }

    Ok(())
}

/// One forecast pass: load config, resolve the day, print the table.
/// Each pass is independent and idempotent, so watch mode just repeats it.
async fn run_forecast(args: &Args, client: &reqwest::Client) -> anyhow::Result<()> {
    // Config is re-read on every pass so admin edits apply on the next poll.
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let timing = GameTiming::new(config.game.day_length);

    let start_day = match args.day {
        Some(day) => day.max(1),
        None => {
            let resolution = calendar::resolve_current_day(&config.calendar, client).await;
            info!(
                "current day {} [{:?}] via {}",
                resolution.day, resolution.source, resolution.detail
            );
            resolution.day
        }
    };

    let only = args.biome.as_deref().map(weather::biome_or_meadows);

    for day in start_day..start_day + args.days.max(1) {
        let rows = forecast::forecast_day(day, timing);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            println!("{}", format::render_forecast(&rows, only));
        }
    }

    Ok(())
}
