use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tuin_store::database::repo::{self, DirectConn};
use tuin_store::report;
use tuin_store::utils::config::{Config, DEFAULT_CONFIG_PATH};

/// Body text that marks nodes with a customized URL still needing an update.
const DEFAULT_PATTERN: &str = "snoeitechnieken-en-onderhoud/plantenfamilies";

/// Finds content whose body contains a string, or rebuilds the tuin database.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "TUIN_MIGRATE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log every SQL statement (find and rebuild)
    #[arg(long)]
    echo: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the titles of all content whose body contains PATTERN (default)
    Find {
        #[arg(short, long, default_value = DEFAULT_PATTERN)]
        pattern: String,

        /// Print each match as a JSON object instead of its title
        #[arg(long)]
        json: bool,
    },
    /// Delete the database file and recreate all tables, empty
    Rebuild,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    info!("Start application");
    let config = Config::load(&args.config).context("Failed to load configuration")?;
    info!("DB: {:?}", config.main.db);

    match args.command.unwrap_or(Command::Find {
        pattern: DEFAULT_PATTERN.to_string(),
        json: false,
    }) {
        Command::Find { pattern, json } => find(&config, &pattern, json, args.echo)?,
        Command::Rebuild => {
            let direct = DirectConn::new(&config);
            let session = direct
                .rebuild(args.echo)
                .with_context(|| format!("Failed to rebuild {:?}", direct.db_path()))?;
            info!("Rebuilt {:?}", session.path());
        }
    }

    info!("End application");
    Ok(())
}

fn find(config: &Config, pattern: &str, json: bool, echo: bool) -> Result<()> {
    let session = repo::init_session(&config.main.db, echo).context("Failed to open database")?;
    let contents = session
        .contents_with_body_like(pattern)
        .context("Failed to query content")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        report::write_json(&mut out, &contents)?;
    } else {
        report::write_titles(&mut out, &contents)?;
    }
    out.flush()?;
    Ok(())
}
