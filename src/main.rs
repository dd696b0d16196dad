use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cpt_standings::api::{build_router, state::AppState};
use cpt_standings::config::AppConfig;
use cpt_standings::fetch::source_from_config;
use cpt_standings::loader::{PlayerSnapshot, ViewLoader};
use cpt_standings::models::{PlayerId, PlayerRatingElement};
use cpt_standings::view::CountryFilter;

#[derive(Parser)]
#[command(name = "cpt-standings")]
#[command(about = "Capcom Pro Tour rating standings and player statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Override the asset root (directory or base URL)
    #[arg(long)]
    source_root: Option<String>,

    /// Log level (trace, debug, info, warn, error); defaults to the config value
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
    /// Print the ranking table
    Ranking {
        /// Country code to filter by ("All" for every country)
        #[arg(long, default_value = "All")]
        country: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the country filter options
    Countries,

    /// Print one player's summary and battle records
    Player {
        /// Player id
        id: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_found = cli.config.exists();
    let mut config = if config_found {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load config {:?}", cli.config))?
    } else {
        AppConfig::default()
    };
    if let Some(root) = cli.source_root.clone() {
        config.source.root = root;
    }

    // Initialize tracing
    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));

    tracing_subscriber::registry()
        .with(filter)
        .with(cli.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting cpt-standings v{}", env!("CARGO_PKG_VERSION"));
    if !config_found {
        tracing::warn!("Config file {:?} not found, using defaults", cli.config);
    }

    let source = source_from_config(&config.source)?;
    tracing::info!(
        "Reading {} from {} ({})",
        config.season.name,
        config.source.root,
        source.name()
    );
    let loader = ViewLoader::new(source, config.season.clone());

    match cli.command {
        Commands::Ranking { country, json } => {
            let snapshot = loader.load_ranking().await?;
            let filter = CountryFilter::parse(&country);
            let ranking = snapshot.filtered(&filter);

            if json {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
            } else {
                println!("=== {} ranking ({}) ===\n", snapshot.season, filter);
                print_ranking(&ranking);
            }
        }
        Commands::Countries => {
            let snapshot = loader.load_ranking().await?;
            for country in &snapshot.countries {
                println!("{}", country);
            }
        }
        Commands::Player { id, json } => {
            let snapshot = loader.load_player(&PlayerId::from(id.trim())).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_player(&snapshot);
            }
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);

            let app = build_router(AppState::new(loader));
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn print_ranking(ranking: &[PlayerRatingElement]) {
    println!(
        "{:>4}  {:<24} {:<3} {:>8} {:>5} {:>6} {:>8} {:>5}",
        "Rank", "Player", "CC", "Rating", "Win%", "Games", "CPT", "Wins"
    );
    for e in ranking {
        println!(
            "{:>4}  {:<24} {:<3} {:>8.1} {:>5} {:>6} {:>8.0} {:>5}",
            e.rank,
            e.name,
            e.country_code.to_uppercase(),
            e.rating,
            e.win_rate,
            e.game_count,
            e.cpt_point,
            e.tournament_win_count
        );
    }
    if ranking.is_empty() {
        println!("(no players)");
    }
}

fn print_player(snapshot: &PlayerSnapshot) {
    let s = &snapshot.summary;
    println!("=== {} ({}) ===", s.gamer_tag, s.player_id);
    println!("Country:     {}", s.country_code.to_uppercase());
    if !s.birthday.is_empty() {
        println!("Birthday:    {}", s.birthday);
    }
    println!("Characters:  {}", s.characters);
    println!("Rank:        {}", s.rank);
    println!(
        "Rating:      {:.1} (best {:.1}, worst {:.1})",
        s.latest_rating, s.best_rating, s.worst_rating
    );
    println!(
        "Record:      {}-{} ({}%)",
        s.win_count, s.lose_count, s.win_rate
    );
    println!("Prize money: {:.0}", s.total_prize);

    if !s.results.is_empty() {
        println!("\nResults:");
        for r in &s.results {
            println!(
                "  {:<32} #{:<4} {:>6.0} pts {:>8.0}",
                r.event, r.placement, r.cpt_point, r.prize
            );
        }
    }

    println!("\nBattle records ({}):", snapshot.battle_records.len());
    for b in &snapshot.battle_records {
        println!(
            "  {} {:<24} {:<16} {} {}-{} vs {:<20} {:>7.1} ({:+.1})",
            b.date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            b.event,
            b.round,
            if b.is_win { "W" } else { "L" },
            b.win_set_count,
            b.lose_set_count,
            b.opponent_tag,
            b.running_rating,
            b.signed_delta
        );
    }
}
