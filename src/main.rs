use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "ccopen")]
#[command(about = "Open Claude Code in your favorite directories")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.ccopen/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a favorite (or any directory) in the configured terminal
    Open {
        /// Favorite name, id prefix or path, or a directory path
        target: String,

        /// Terminal to use instead of the configured one
        #[arg(short, long)]
        terminal: Option<String>,

        /// Binary to run instead of the configured Claude Code path
        #[arg(short, long)]
        binary: Option<String>,
    },

    /// List favorites, most recently opened first
    List {
        /// Only show favorites whose name or path contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a directory to the favorites
    Add {
        /// Directory path (may start with ~/)
        path: String,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Change or clear the display name of a favorite
    Rename {
        /// Favorite name, id prefix or path
        selector: String,

        /// New name (omit to clear)
        name: Option<String>,
    },

    /// Remove a favorite
    Remove {
        /// Favorite name, id prefix or path
        selector: String,
    },

    /// List supported terminals
    Terminals,

    /// Initialize a new config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so listings on stdout stay pipeable
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let paths = cli::Paths::resolve(cli.config);

    match cli.command {
        Some(Commands::Open {
            target,
            terminal,
            binary,
        }) => {
            cli::open::open_command(&paths, &target, terminal, binary).await?;
        }
        Some(Commands::List { search, json }) => {
            cli::favorites::list_command(&paths, search.as_deref(), json)?;
        }
        Some(Commands::Add { path, name }) => {
            cli::favorites::add_command(&paths, &path, name)?;
        }
        Some(Commands::Rename { selector, name }) => {
            cli::favorites::rename_command(&paths, &selector, name.as_deref().unwrap_or(""))?;
        }
        Some(Commands::Remove { selector }) => {
            cli::favorites::remove_command(&paths, &selector)?;
        }
        Some(Commands::Terminals) => {
            cli::terminals::terminals_command(&paths)?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(&paths, force)?;
        }
        None => {
            cli::favorites::list_command(&paths, None, false)?;
        }
    }

    Ok(())
}
