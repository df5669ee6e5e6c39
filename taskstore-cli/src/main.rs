//! taskctl - command-line access to the task store
//!
//! Every subcommand except `completions` opens a pool, runs one store
//! operation, and exits.

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::{debug, warn};

mod commands;
mod config;
mod tracing_setup;

use commands::tasks::{self, Output};
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "taskctl",
    author,
    version,
    about = "Create, list, update and delete tasks in a PostgreSQL task store"
)]
struct Cli {
    /// Connection URL or key/value descriptor (e.g. "host=localhost dbname=tasks sslmode=disable")
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// TOML config file (default: ~/.taskctl/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the tasks, users, labels and tasks_labels tables
    Migrate,
    /// List tasks, optionally filtered by id and author
    List(tasks::ListArgs),
    /// Create a task and print its id
    Create(tasks::CreateArgs),
    /// List tasks written by an author
    ByAuthor(tasks::ByAuthorArgs),
    /// List tasks carrying a label
    ByLabel(tasks::ByLabelArgs),
    /// Set assignee, title and content of a task
    Update(tasks::UpdateArgs),
    /// Delete a task
    Delete(tasks::DeleteArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

async fn run(cli: Cli) -> Result<()> {
    let out = Output { json: cli.json };

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "taskctl", &mut std::io::stdout());
        return Ok(());
    }

    let store = commands::connect(cli.database_url, cli.config.as_deref()).await?;

    let result = match cli.command {
        Commands::Migrate => tasks::run_migrate(&store).await,
        Commands::List(args) => tasks::run_list(&store, args, out).await,
        Commands::Create(args) => tasks::run_create(&store, args, out).await,
        Commands::ByAuthor(args) => tasks::run_by_author(&store, args, out).await,
        Commands::ByLabel(args) => tasks::run_by_label(&store, args, out).await,
        Commands::Update(args) => tasks::run_update(&store, args, out).await,
        Commands::Delete(args) => tasks::run_delete(&store, args, out).await,
        Commands::Completions { .. } => Ok(()),
    };

    store.close().await;
    result
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so DATABASE_URL from .env reaches clap
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();

    for (path, result) in env_files {
        match result {
            Ok(()) => debug!("Loaded .env from {}", path.display()),
            Err(e) => warn!("Failed to load {}: {}", path.display(), e),
        }
    }

    let result = run(cli).await;
    tracing_setup::shutdown();
    result
}
