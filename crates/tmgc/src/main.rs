// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! tmgc - Telegram from the command line.
//!
//! This is the binary entry point. It resolves the profile, loads its
//! configuration, and dispatches to the command modules.

mod auth;
mod doctor;
mod output;
mod peer;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tmgc_config::{ProfilePaths, TmgcConfig};
use tmgc_core::TmgcError;
use tracing::debug;

use crate::output::{Output, OutputMode};

/// tmgc - Telegram from the command line.
#[derive(Parser, Debug)]
#[command(name = "tmgc", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Config file; the profile's files are kept next to it.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Profile name.
    #[arg(long, global = true, default_value = "default")]
    profile: String,

    /// Timeout for network-bound operations, in seconds.
    #[arg(long, global = true, value_name = "SECS", default_value_t = 15)]
    timeout: u64,

    /// Print results as JSON.
    #[arg(long, global = true, conflicts_with = "plain")]
    json: bool,

    /// Print results as tab-separated values.
    #[arg(long, global = true)]
    plain: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage credentials and the local session.
    #[command(subcommand)]
    Auth(AuthCommands),
    /// Inspect peers.
    #[command(subcommand)]
    Peer(PeerCommands),
    /// Check the profile for problems.
    Doctor,
}

#[derive(Subcommand, Debug)]
enum AuthCommands {
    /// Manage API credentials.
    #[command(subcommand)]
    Config(AuthConfigCommands),
    /// Clear the local session, keyring entry and peer cache.
    Logout,
}

#[derive(Subcommand, Debug)]
enum AuthConfigCommands {
    /// Set API credentials and the session store.
    Set {
        /// Telegram API id.
        #[arg(long)]
        api_id: Option<i64>,
        /// Telegram API hash.
        #[arg(long)]
        api_hash: Option<String>,
        /// Session storage: keyring or file.
        #[arg(long)]
        session_store: Option<String>,
    },
    /// Show current API credentials.
    Show,
}

#[derive(Subcommand, Debug)]
enum PeerCommands {
    /// Resolve a peer reference (u<id>, c<id>, ch<id>, @username, phone).
    Show {
        /// The peer reference.
        reference: String,
    },
}

/// Everything a command needs, built once at startup.
pub struct Runtime {
    pub paths: ProfilePaths,
    pub config: TmgcConfig,
    pub output: Output,
    pub timeout: Duration,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let paths = match ProfilePaths::resolve(cli.global.config.as_deref(), &cli.global.profile) {
        Ok(paths) => paths,
        Err(e) => exit_with(&e),
    };

    // Doctor reports a broken config itself instead of refusing to start.
    let config = match tmgc_config::load_and_validate(&paths.config_path) {
        Ok(config) => config,
        Err(_) if matches!(cli.command, Commands::Doctor) => TmgcConfig::default(),
        Err(errors) => {
            tmgc_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_level);
    debug!(profile = %paths.profile, dir = %paths.profile_dir.display(), "profile resolved");

    let mut rt = Runtime {
        paths,
        config,
        output: Output::new(
            OutputMode::from_flags(cli.global.json, cli.global.plain),
            cli.global.no_color,
        ),
        timeout: Duration::from_secs(cli.global.timeout),
    };

    let result = match cli.command {
        Commands::Auth(AuthCommands::Config(AuthConfigCommands::Set {
            api_id,
            api_hash,
            session_store,
        })) => {
            let update = auth::ConfigUpdate {
                api_id,
                api_hash,
                session_store,
            };
            auth::run_config_set(&mut rt, &update)
        }
        Commands::Auth(AuthCommands::Config(AuthConfigCommands::Show)) => {
            auth::run_config_show(&rt)
        }
        Commands::Auth(AuthCommands::Logout) => auth::run_logout(&rt),
        Commands::Peer(PeerCommands::Show { reference }) => {
            peer::run_peer_show(&rt, &reference).await
        }
        Commands::Doctor => doctor::run_doctor(&rt),
    };

    if let Err(e) = result {
        exit_with(&e);
    }
}

fn exit_with(err: &TmgcError) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}

/// Logs go to stderr. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let level = log_level.trim().to_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tmgc={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
