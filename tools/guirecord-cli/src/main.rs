//! guirecord CLI: record keyboard and mouse input as a replayable script.
//!
//! Usage:
//!   guirecord record --script <PATH>              Record live input until the exit key
//!   guirecord translate <EVENTS> --script <PATH>  Translate a saved event log
//!   guirecord keys                                List key names accepted by --exitkey

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use guirecord_common::config::{RecorderConfig, ScriptFormat};

mod commands;

#[derive(Parser)]
#[command(
    name = "guirecord",
    about = "Record keyboard and mouse input as a GUI test script",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/guirecord/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that produces a script.
#[derive(Args, Debug, Clone)]
struct ScriptOptions {
    /// Script file to write
    #[arg(short, long)]
    script: PathBuf,

    /// Exit key to stop recording (default: ESC)
    #[arg(short, long = "exitkey")]
    exit_key: Option<String>,

    /// Don't include user delays
    #[arg(short, long = "nodelay")]
    no_delay: bool,

    /// Level of granularity (mouse move frequency, 1-10, default: 10)
    #[arg(short, long)]
    granularity: Option<u32>,

    /// Script format: generic or guitest
    #[arg(short, long)]
    format: Option<ScriptFormat>,
}

impl ScriptOptions {
    fn apply(&self, config: &mut RecorderConfig) {
        if let Some(exit_key) = &self.exit_key {
            config.exit_key = exit_key.clone();
        }
        if self.no_delay {
            config.exclude_delays = true;
        }
        if let Some(granularity) = self.granularity {
            config.granularity = granularity;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Record live input until the exit key is pressed
    Record {
        #[command(flatten)]
        options: ScriptOptions,

        /// Seconds to wait before recording (1-240)
        #[arg(short, long)]
        wait: Option<u32>,

        /// Also save the raw events as JSONL
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Translate a saved JSONL event log into a script
    Translate {
        /// Event log produced by `record --events`
        input: PathBuf,

        #[command(flatten)]
        options: ScriptOptions,
    },

    /// List key names accepted by --exitkey
    Keys,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RecorderConfig::load_from(path),
        None => RecorderConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    guirecord_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Record {
            options,
            wait,
            events,
        } => {
            options.apply(&mut config);
            if let Some(wait) = wait {
                config.wait_secs = wait;
            }
            commands::record::run(config, options.script, events).await
        }
        Commands::Translate { input, options } => {
            options.apply(&mut config);
            commands::translate::run(config, input, options.script).await
        }
        Commands::Keys => commands::keys::run(),
    }
}
