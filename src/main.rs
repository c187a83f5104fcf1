use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use race_dashboard::api::state::AppState;
use race_dashboard::config::{AppConfig, SourceKind};
use race_dashboard::loader::load_years;
use race_dashboard::models::{current_year, years_until_now, ALL_YEARS};
use race_dashboard::views::navigation::search_query;
use race_dashboard::views::tween::DEFAULT_DURATION;
use race_dashboard::views::{BotsView, LeaderboardView, SortColumn, SortOrder, SortState};

#[derive(Parser)]
#[command(name = "race-dashboard")]
#[command(about = "Bot statistics and all-time leaderboard for race results")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Read race files from this directory (overrides config)
    #[arg(long, conflicts_with = "base_url")]
    data_dir: Option<PathBuf>,

    /// Fetch race files from this origin (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show bot statistics for a year
    Bots {
        /// Year to show, or "all" (default: current year)
        #[arg(long)]
        year: Option<String>,

        /// Bot to select
        #[arg(long)]
        search: Option<String>,

        /// Animate the counters
        #[arg(long)]
        animate: bool,
    },

    /// Show the all-time leaderboard
    Leaderboard {
        /// Column to sort by: Bot, USD, Races, "Avg Position"
        #[arg(long)]
        sort: Option<SortColumn>,

        /// Sort direction: asc or desc
        #[arg(long)]
        order: Option<SortOrder>,

        /// Only show the first N rows
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List years with race data
    Years,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(dir) = &cli.data_dir {
        config.source.kind = SourceKind::Dir;
        config.source.data_dir = dir.clone();
    }
    if let Some(url) = &cli.base_url {
        config.source.kind = SourceKind::Http;
        config.source.base_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting race-dashboard v{}", env!("CARGO_PKG_VERSION"));

    let source = config.source.build()?;

    match cli.command {
        Commands::Serve { host, port } => {
            let data_dir = (config.server.serve_data && config.source.kind == SourceKind::Dir)
                .then(|| config.source.data_dir.clone());
            let state = AppState {
                source,
                first_year: config.years.first_year,
                data_dir,
            };
            let app = race_dashboard::api::build_router(state);
            let addr = format!(
                "{}:{}",
                host.unwrap_or(config.server.host),
                port.unwrap_or(config.server.port)
            );
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Bots {
            year,
            search,
            animate,
        } => {
            let year = year.unwrap_or_else(|| current_year().to_string());
            let years = years_until_now(config.years.first_year);
            let races = load_years(Arc::clone(&source), &years).await;

            let mut view = BotsView::new(year, search);
            view.set_races(races);

            println!("\n=== Bots ({}) ===", view.year());
            println!("Races:            {}", view.records().len());
            println!("Bots:             {}", view.options().len());
            println!("Years loaded:     {}", view.available_years().join(", "));

            match view.dashboard() {
                Some(dashboard) => {
                    println!("Link:             /bots/?{}\n", search_query(view.search()));
                    if animate {
                        let steps = 20u32;
                        let lines = dashboard.counters.len() + 1;
                        for i in 0..=steps {
                            let elapsed = DEFAULT_DURATION.mul_f64(i as f64 / steps as f64);
                            if i > 0 {
                                print!("\x1b[{}A", lines);
                            }
                            print!("{}", dashboard.render_text(elapsed));
                            tokio::time::sleep(DEFAULT_DURATION / steps).await;
                        }
                    } else {
                        print!("{}", dashboard.render_text(Duration::MAX));
                    }

                    println!("\nRace history:");
                    for point in view.history() {
                        match (point.tier, point.position) {
                            (Some(tier), Some(position)) => println!(
                                "  #{:<4} {:<8} {:>3}/{}",
                                point.race,
                                tier.label(),
                                position,
                                point.finishers
                            ),
                            _ => println!("  #{:<4} -", point.race),
                        }
                    }
                }
                None => {
                    if let Some(search) = view.search() {
                        println!("\nNo results for {} in {}", search, view.year());
                    }
                    println!("\nAvailable bots:");
                    for option in view.options() {
                        println!("  - {}", option.label);
                    }
                }
            }
        }
        Commands::Leaderboard { sort, order, limit } => {
            let sort = SortState::from_parts(sort, order);

            let mut view = LeaderboardView::new(sort);
            view.fetch(source.as_ref()).await;

            if view.is_empty() {
                println!("No leaderboard data.");
                return Ok(());
            }

            let text = view.render_text();
            let shown = limit.map(|n| n + 1).unwrap_or(usize::MAX);
            for line in text.lines().take(shown) {
                println!("{}", line);
            }
        }
        Commands::Years => {
            let requested = years_until_now(config.years.first_year);
            let races = load_years(Arc::clone(&source), &requested).await;
            let available = races.years();

            println!("\n=== Years ===");
            for year in &requested {
                let status = if available.contains(&year.as_str()) {
                    format!("{} races", races.get(year).len())
                } else {
                    "unavailable".to_string()
                };
                println!("{:<8} {}", year, status);
            }
            println!("{:<8} {} races", ALL_YEARS, races.get(ALL_YEARS).len());
        }
    }

    Ok(())
}
