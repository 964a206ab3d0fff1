use analytics::MetricKind;
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use comparison::{ComparisonResult, ComparisonService};
use configuration::{Config, DataSourceConfig};
use core_types::{PlayerId, Role};
use database::{DeliveryStore, PgSource};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status for a refused comparison (same player, unknown player).
const EXIT_REJECTED: u8 = 2;

/// The main entry point for the Crease player comparison tool.
#[tokio::main]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Compare two cricket players from ball-by-ball delivery data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "crease.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every player found in the delivery dataset.
    Players(PlayersArgs),
    /// Compare two players side by side.
    Compare(CompareArgs),
    /// Show what dataset snapshot is loaded.
    Dataset,
    /// Serve the JSON query API.
    Serve(ServeArgs),
    /// Apply the database schema (PostgreSQL sources only).
    Migrate,
}

#[derive(Parser)]
struct PlayersArgs {
    /// Only players with at least one delivery as "striker" or "bowler".
    #[arg(long)]
    role: Option<Role>,

    /// Only players whose name contains this text (case-insensitive).
    #[arg(long)]
    filter: Option<String>,
}

#[derive(Parser)]
struct CompareArgs {
    /// The first player (e.g., "V Kohli").
    #[arg(long)]
    first: String,

    /// The second player (e.g., "RG Sharma").
    #[arg(long)]
    second: String,

    /// Metrics to show (awards, runs, strike-rate, batting-average, economy-rate). Defaults to all.
    #[arg(long = "metric")]
    metrics: Vec<MetricKind>,

    /// Print the raw comparison as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides the configured bind address (e.g., "0.0.0.0:8080").
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = configuration::load_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let _guard = configuration::init_tracing(&config.logging)?;

    match cli.command {
        Commands::Players(args) => {
            let store = load_store(&config).await?;
            handle_players(&store, args);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Compare(args) => {
            let store = load_store(&config).await?;
            handle_compare(&store, args)
        }
        Commands::Dataset => {
            let store = load_store(&config).await?;
            println!("{}", serde_json::to_string_pretty(&store.info())?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Serve(args) => {
            let addr = args.addr.unwrap_or_else(|| config.server.addr());
            web_server::run_server(&config, addr).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Migrate => {
            handle_migrate(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn load_store(config: &Config) -> anyhow::Result<DeliveryStore> {
    let source = web_server::source_from_config(&config.data_source)?;
    let store = DeliveryStore::load(source.as_ref())
        .await
        .with_context(|| format!("loading dataset from {}", source.describe()))?;
    Ok(store)
}

fn handle_players(store: &DeliveryStore, args: PlayersArgs) {
    let service = ComparisonService::new(store);
    let players = match args.role {
        Some(role) => service.list_players_in_role(role),
        None => service.list_players(),
    };

    for player in filter_players(players, args.filter.as_deref()) {
        println!("{}", player);
    }
}

fn filter_players(players: Vec<PlayerId>, needle: Option<&str>) -> Vec<PlayerId> {
    match needle {
        Some(needle) => {
            let needle = needle.to_lowercase();
            players
                .into_iter()
                .filter(|p| p.as_str().to_lowercase().contains(&needle))
                .collect()
        }
        None => players,
    }
}

/// What `compare` writes and the status it exits with.
struct CompareOutput {
    stdout: String,
    stderr: String,
    status: u8,
}

fn handle_compare(store: &DeliveryStore, args: CompareArgs) -> anyhow::Result<ExitCode> {
    let output = compare_output(store, args)?;
    if !output.stdout.is_empty() {
        println!("{}", output.stdout);
    }
    if !output.stderr.is_empty() {
        eprintln!("{}", output.stderr);
    }
    Ok(ExitCode::from(output.status))
}

fn compare_output(store: &DeliveryStore, args: CompareArgs) -> anyhow::Result<CompareOutput> {
    let service = ComparisonService::new(store);
    let first = PlayerId::from(args.first);
    let second = PlayerId::from(args.second);

    let result = match service.compare(&first, &second) {
        Ok(result) => result,
        Err(reason) => {
            return Ok(CompareOutput {
                stdout: String::new(),
                stderr: reason.to_string(),
                status: EXIT_REJECTED,
            });
        }
    };

    if args.json {
        return Ok(CompareOutput {
            stdout: serde_json::to_string_pretty(&result)?,
            stderr: String::new(),
            status: 0,
        });
    }

    let metrics = if args.metrics.is_empty() {
        MetricKind::ALL.to_vec()
    } else {
        args.metrics
    };

    let mut lines = vec![
        format!("Comparing {} and {}", result.first.player, result.second.player),
        render_comparison(&result, &metrics).to_string(),
    ];
    if metrics.contains(&MetricKind::EconomyRate) {
        if let Some(notice) = result.role_notice() {
            lines.push(notice.to_string());
        }
    }
    Ok(CompareOutput {
        stdout: lines.join("\n"),
        stderr: String::new(),
        status: 0,
    })
}

/// One row per metric, `N/A` where a metric has no value.
fn render_comparison(result: &ComparisonResult, metrics: &[MetricKind]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Metric"),
            Cell::new(result.first.player.as_str()),
            Cell::new(result.second.player.as_str()),
        ]);

    for kind in metrics {
        let (first, second) = result.pair(*kind);
        table.add_row(vec![
            Cell::new(kind.label()),
            Cell::new(kind.format(&first)),
            Cell::new(kind.format(&second)),
        ]);
    }
    table
}

async fn handle_migrate(config: &Config) -> anyhow::Result<()> {
    let DataSourceConfig::Postgres { url_env } = &config.data_source else {
        anyhow::bail!("migrate requires data_source.kind = \"postgres\"");
    };
    let source = PgSource::from_env(url_env)?;
    database::run_migrations(&source).await?;
    tracing::info!("Database migrations applied.");
    Ok(())
}
