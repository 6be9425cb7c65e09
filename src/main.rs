use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::EnvFilter;

use peer_feedback::auth::StaticBearerToken;
use peer_feedback::config::ServerConfig;
use peer_feedback::intake::FeedbackService;
use peer_feedback::roster::Roster;
use peer_feedback::server::FeedbackServer;
use peer_feedback::storage::backends::file::LEDGER_FILE;
use peer_feedback::storage::StorageFactory;

/// Collect one round of peer evaluations over HTTP
#[derive(Parser)]
#[command(name = "peer-feedback")]
#[command(about = "Peer evaluation collection server", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (.toml, .yml or .yaml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default command)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the feedback and ledger documents
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Print the employee roster
    Roster,
    /// Print submission progress as JSON
    Stats {
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Regenerate the submission ledger from the feedback records
    RebuildLedger {
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match ServerConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    let log_level = match cli.verbose {
        0 => config.log_level.clone(),
        1 => "debug".to_string(),
        2 => "trace".to_string(),
        _ => "trace,hyper=debug,tower=debug".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_target(cli.verbose >= 2)
        .with_thread_ids(cli.verbose >= 3)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("peer-feedback started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        data_dir: None,
    });

    let result = match command {
        Commands::Serve {
            host,
            port,
            data_dir,
        } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            run_serve(config).await
        }
        Commands::Roster => run_roster(&config),
        Commands::Stats { data_dir } => {
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            run_stats(config).await
        }
        Commands::RebuildLedger { data_dir } => {
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            run_rebuild_ledger(config).await
        }
    };

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_roster(config: &ServerConfig) -> Result<Roster> {
    match &config.roster_file {
        Some(path) => Roster::from_json_file(path)
            .with_context(|| format!("Failed to load roster from {}", path.display())),
        None => Ok(Roster::builtin()),
    }
}

async fn build_service(config: &ServerConfig) -> Result<Arc<FeedbackService>> {
    config.validate()?;

    let roster = load_roster(config)?;
    let store = StorageFactory::from_config(config)
        .await
        .context("Failed to initialize storage")?;
    let verifier = Arc::new(StaticBearerToken::new(&config.admin_token));

    let service = FeedbackService::new(Arc::new(roster), store, verifier)
        .with_completion_offset(config.completion_offset()?);
    Ok(Arc::new(service))
}

async fn run_serve(config: ServerConfig) -> Result<()> {
    let service = build_service(&config).await?;

    if config.uses_default_admin_token() {
        warn!("Using the default admin token; set FEEDBACK_ADMIN_TOKEN before deploying");
    }

    if service.reconcile_ledger().await? {
        info!("Submission ledger repaired from feedback records");
    }

    info!(
        "Loaded {} employees; data directory {}",
        service.roster().len(),
        config.data_dir.display()
    );

    FeedbackServer::new(config, service).start().await
}

fn run_roster(config: &ServerConfig) -> Result<()> {
    let roster = load_roster(config)?;

    println!("{:>4}  {:>6}  {:<28}  Designation", "ID", "Number", "Name");
    for employee in roster.iter() {
        println!(
            "{:>4}  {:>6}  {:<28}  {}",
            employee.id, employee.number, employee.name, employee.designation
        );
    }
    println!("\n{} employees", roster.len());
    Ok(())
}

async fn run_stats(config: ServerConfig) -> Result<()> {
    let service = build_service(&config).await?;
    let stats = service.stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

async fn run_rebuild_ledger(config: ServerConfig) -> Result<()> {
    let service = build_service(&config).await?;
    let ledger = service.rebuild_ledger().await?;
    println!(
        "Rebuilt {} with {} submissions",
        config.data_dir.join(LEDGER_FILE).display(),
        ledger.total_submissions
    );
    Ok(())
}
