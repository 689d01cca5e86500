use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pagedeck_core::{AppConfig, Orientation};

mod commands;

#[derive(Parser)]
#[command(name = "pagedeck")]
#[command(author, version, about = "A terminal deck viewer that snaps between full-screen panels")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this configuration file instead of ~/.config/pagedeck/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Show decks in the terminal (default)
    Run(RunArgs),
    /// Print the panels of a deck
    List {
        /// Deck file (.toml or plain text)
        deck: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Deck files and overrides for the `[deck]`/`[animation]`/`[ui]` sections
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Deck files to open; Tab switches between them
    pub decks: Vec<PathBuf>,

    /// Wrap from the last panel to the first and back
    #[arg(long = "loop")]
    pub loop_pages: bool,

    /// Enable keyboard navigation
    #[arg(long)]
    pub keyboard: bool,

    /// Lay panels side by side
    #[arg(long)]
    pub horizontal: bool,

    /// Panel to start on (zero-based)
    #[arg(long, value_name = "N")]
    pub start: Option<usize>,

    /// Hide the pagination markers
    #[arg(long)]
    pub no_pagination: bool,

    /// Transition duration in milliseconds
    #[arg(long, value_name = "MS")]
    pub duration: Option<u64>,

    /// Detect transition completion from end notifications
    #[arg(long)]
    pub transition_events: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if self.loop_pages {
            config.deck.loop_pages = true;
        }
        if self.keyboard {
            config.deck.keyboard = true;
        }
        if self.horizontal {
            config.deck.orientation = Orientation::Horizontal;
        }
        if let Some(start) = self.start {
            config.deck.start_index = start;
        }
        if self.no_pagination {
            config.deck.pagination = false;
        }
        if let Some(duration) = self.duration {
            config.animation.duration_ms = duration;
        }
        if self.transition_events {
            config.ui.transition_events = true;
        }
    }
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|filter| EnvFilter::try_new(filter).ok())
        .unwrap_or_else(|| EnvFilter::new(&config.general.log_level))
}

/// Log to stderr for one-shot commands
fn init_stderr_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Log to a file while the alternate screen owns the terminal
fn init_file_logging(config: &AppConfig) -> Result<()> {
    let log_path = config.log_file();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Handle commands
    match cli.command {
        Some(Commands::Run(args)) => {
            args.apply(&mut config);
            init_file_logging(&config)?;
            commands::run::run(Arc::new(config), args.decks).await
        }
        None => {
            cli.run.apply(&mut config);
            init_file_logging(&config)?;
            commands::run::run(Arc::new(config), cli.run.decks).await
        }
        Some(Commands::List { deck, json }) => {
            init_stderr_logging(&config);
            commands::list::run(&config, &deck, json)
        }
        Some(Commands::InitConfig { force }) => {
            init_stderr_logging(&config);
            let path = cli.config.unwrap_or_else(AppConfig::config_path);
            commands::init_config::run(&path, force)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_takes_run_flags() {
        let cli = Cli::parse_from(["pagedeck", "talk.txt", "--loop", "--start", "2"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.run.decks, vec![PathBuf::from("talk.txt")]);

        let mut config = AppConfig::default();
        cli.run.apply(&mut config);
        assert!(config.deck.loop_pages);
        assert_eq!(config.deck.start_index, 2);
        assert!(!config.deck.keyboard);
    }

    #[test]
    fn test_run_flags_override_config() {
        let cli = Cli::parse_from([
            "pagedeck",
            "run",
            "a.toml",
            "b.txt",
            "--keyboard",
            "--horizontal",
            "--no-pagination",
            "--duration",
            "0",
            "--transition-events",
        ]);
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.decks.len(), 2);

        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert!(config.deck.keyboard);
        assert_eq!(config.deck.orientation, Orientation::Horizontal);
        assert!(!config.deck.pagination);
        assert_eq!(config.animation.duration_ms, 0);
        assert!(config.ui.transition_events);
    }

    #[test]
    fn test_list_command() {
        let cli = Cli::parse_from(["pagedeck", "list", "deck.toml", "--json"]);
        assert!(matches!(
            cli.command,
            Some(Commands::List { json: true, .. })
        ));
    }
}
