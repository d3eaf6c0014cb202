//! radix-router command-line tool.
//!
//! Loads a TOML routes file and resolves paths against it.
//!
//! ```text
//! radix-router --config routes.toml lookup /users/42 /files/a/b
//! radix-router --config routes.toml routes
//! radix-router --config routes.toml check
//! radix-router --config routes.toml watch     # paths on stdin, hot reload
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};

use radix_router::config::watcher::ConfigWatcher;
use radix_router::config::{load_config, ConfigError, RouterConfig};
use radix_router::lifecycle::shutdown::Shutdown;
use radix_router::observability::logging::init_logging;
use radix_router::{NodeKind, RouteMatch, RouteTable, Router};

#[derive(Parser)]
#[command(name = "radix-router")]
#[command(about = "Inspect and exercise a radix route table", long_about = None)]
struct Cli {
    /// Routes file (TOML)
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one or more paths; exits non-zero if any is not found
    Lookup {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// List configured route patterns
    Routes,
    /// Validate the routes file
    Check,
    /// Resolve paths read from stdin, reloading the table on file change
    Watch,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let loaded = load_config::<Value>(&cli.config);
    let observability = loaded
        .as_ref()
        .map(|c| c.observability.clone())
        .unwrap_or_default();
    init_logging(&observability);

    let config = match loaded {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            for e in &errors {
                eprintln!("error: {}", e);
            }
            eprintln!("{}: {} invalid route(s)", cli.config.display(), errors.len());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(
        path = %cli.config.display(),
        routes = config.routes.len(),
        strict_trailing_slash = config.strict_trailing_slash,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Check => {
            println!("{}: {} route(s) OK", cli.config.display(), config.routes.len());
        }
        Commands::Routes => {
            for entry in &config.routes {
                let dynamic = entry
                    .path
                    .split('/')
                    .any(|s| NodeKind::of_segment(s).is_dynamic());
                let kind = if dynamic { "dynamic" } else { "static" };
                println!("{:<8} {}", kind, entry.path);
            }
        }
        Commands::Lookup { paths } => {
            let router = Router::from_config(config);
            let mut missed = false;
            for path in &paths {
                let found = router.lookup(path);
                missed |= found.is_none();
                println!("{}", render(found)?);
            }
            if missed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Watch => watch(&cli.config, config).await?,
    }

    Ok(ExitCode::SUCCESS)
}

fn render<D: Serialize>(found: Option<RouteMatch<D>>) -> serde_json::Result<String> {
    match found {
        Some(m) => serde_json::to_string_pretty(&m.to_json()?),
        None => Ok("null".to_string()),
    }
}

async fn watch(path: &Path, config: RouterConfig<Value>) -> Result<(), Box<dyn std::error::Error>> {
    let table = RouteTable::from_config(config);

    let (watcher, mut updates) = ConfigWatcher::<Value>::new(path);
    let _watcher = watcher.run()?;

    let shutdown = Shutdown::new();
    let mut stop = shutdown.subscribe();
    tokio::spawn(shutdown.clone().trigger_on_ctrl_c());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            Some(config) = updates.recv() => {
                table.reload(config);
            }
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => println!("{}", render(table.lookup(line.trim()))?),
                None => stdin_open = false,
            },
            _ = stop.recv() => break,
        }
    }

    tracing::info!("Watch stopped");
    Ok(())
}
