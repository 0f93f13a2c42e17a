//! Command-line interface.

mod explain;
mod history;
mod render;
#[cfg(feature = "server")]
mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use begrepsbro::config::Config;
use begrepsbro::history::{HistoryStore, JsonFileStorage, MemoryStorage};
use begrepsbro::languages::LANGUAGES;

/// Begrepsbro forklarer faglige begreper på enkel norsk.
#[derive(Parser, Debug)]
#[command(name = "begrepsbro", version, about)]
pub struct Cli {
    /// Path to config.json (default: ~/.begrepsbro/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Explain a term, save it to history and quiz yourself
    Explain {
        /// Norwegian term to explain
        term: String,
        /// Native language code (see `begrepsbro languages`) or a language name
        #[arg(short, long)]
        language: String,
        /// Skip the interactive quiz
        #[arg(long)]
        no_quiz: bool,
        /// Do not record this lookup in history
        #[arg(long)]
        no_history: bool,
    },
    /// Browse and manage recent lookups
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// List supported native languages
    Languages,
    /// Run the HTTP API
    #[cfg(feature = "server")]
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List recent lookups, newest first
    List,
    /// Show a cached result (no provider call)
    Show {
        /// Entry id or unique id prefix
        id: String,
        /// Skip the interactive quiz
        #[arg(long)]
        no_quiz: bool,
    },
    /// Remove one entry
    Remove {
        /// Entry id or unique id prefix
        id: String,
    },
    /// Remove all entries
    Clear,
}

/// Install the tracing subscriber. Logs go to stderr.
pub fn init_tracing(cli: &Cli) {
    let default_filter = match cli.command {
        #[cfg(feature = "server")]
        Command::Serve { .. } => "begrepsbro=info,tower_http=info",
        _ => "begrepsbro=warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Explain {
            term,
            language,
            no_quiz,
            no_history,
        } => explain::cmd_explain(&config, &term, &language, no_quiz, no_history).await,
        Command::History { action } => history::cmd_history(&config, action),
        Command::Languages => {
            cmd_languages();
            Ok(())
        }
        #[cfg(feature = "server")]
        Command::Serve { port } => serve::cmd_serve(config, port).await,
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let mut config = Config::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.apply_overrides(|key| std::env::var(key).ok());
            Ok(config)
        }
        None => Config::load().with_context(|| "Failed to load config"),
    }
}

/// Open the history store, or a throwaway in-memory one.
pub(crate) fn open_history(config: &Config, persistent: bool) -> HistoryStore {
    if persistent {
        let dir = config.history.resolved_dir();
        HistoryStore::open(Box::new(JsonFileStorage::in_dir(&dir)))
    } else {
        HistoryStore::open(Box::new(MemoryStorage::new()))
    }
}

fn cmd_languages() {
    for lang in LANGUAGES {
        println!("{} {:<12} {}", lang.flag, lang.code, lang.label);
    }
}
