//! Command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags, environment and an optional `.env`.
//! - Initialize logging before any store access.
//! - Run the HTTP server or a one-shot store command.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use todo_core::db::open_db;
use todo_core::{default_log_level, init_logging, SqliteTaskRepository, TaskService};
use todo_web::config::{DEFAULT_DB_FILE_NAME, DEFAULT_PORT};
use todo_web::{ServerConfig, TaskStore};

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Single-page to-do list server")]
struct Cli {
    /// SQLite database file.
    #[arg(long = "db", env = "TODO_DB_PATH", default_value = DEFAULT_DB_FILE_NAME, global = true)]
    db_path: PathBuf,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "TODO_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr only when unset.
    #[arg(long, env = "TODO_LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the task page and API.
    Serve {
        #[arg(long, env = "TODO_BIND", default_value_t = default_bind_addr())]
        bind: SocketAddr,
    },
    /// Add one task.
    Add {
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
    /// Print all tasks in order.
    List,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT))
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal; real env vars still win.
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, cli.log_dir.as_deref()).map_err(anyhow::Error::msg)?;
    info!(
        "event=config_load module=cli status=ok dotenv={}",
        if dotenv_loaded { "loaded" } else { "absent" }
    );

    match cli.command {
        Command::Serve { bind } => {
            let config = ServerConfig {
                bind_addr: bind,
                db_path: cli.db_path,
            };
            run_server(config).await
        }
        Command::Add { description } => add_task(&cli.db_path, &description.join(" ")),
        Command::List => list_tasks(&cli.db_path),
    }
}

async fn run_server(config: ServerConfig) -> Result<()> {
    let store = TaskStore::open(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;

    todo_web::serve(&config, store, shutdown_signal())
        .await
        .with_context(|| format!("server on {} failed", config.bind_addr))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=cli status=error error={err}");
        std::future::pending::<()>().await;
    }
    info!("event=shutdown_signal module=cli status=ok");
}

fn add_task(db_path: &Path, description: &str) -> Result<()> {
    let conn = open_db(db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let task = service.create_task(description)?;
    println!("#{} {}", task.id, task.description);
    Ok(())
}

fn list_tasks(db_path: &Path) -> Result<()> {
    let conn = open_db(db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let tasks = service.list_tasks()?;
    if tasks.is_empty() {
        println!("no tasks");
        return Ok(());
    }
    for (index, task) in tasks.iter().enumerate() {
        println!("{}. {}", index + 1, task.description);
    }
    Ok(())
}
