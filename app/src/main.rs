#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    AskInput, AskStrategy, ChatStrategy, CommandStrategy, GlobalOptions, InfoStrategy,
    InitStrategy, RecommendInput, RecommendStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "hotelier")]
#[command(about = "Chat with the hotel recommendation assistant", long_about = None)]
struct Cli {
    /// Config file (default: ~/hotelier/config.json)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Override the assistant API root, e.g. http://localhost:8000/api
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log lifecycle events to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive conversation (default)
    Chat,
    /// Send a single message and print the reply
    Ask {
        /// Message to send
        #[arg(short = 'm', long)]
        message: String,
    },
    /// Search hotels without starting a conversation
    Recommend {
        /// Free-text description of the hotel you want
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Create the config file
    Init,
    /// Show the effective configuration
    Info,
    /// Show version
    Version,
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let options = GlobalOptions {
        config_path: cli.config,
        base_url: cli.base_url,
    };

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => ChatStrategy.execute(options).await,
        Commands::Ask { message } => AskStrategy.execute(AskInput { options, message }).await,
        Commands::Recommend { query } => {
            RecommendStrategy
                .execute(RecommendInput {
                    options,
                    query: query.join(" "),
                })
                .await
        }
        Commands::Init => InitStrategy.execute(options.config_path).await,
        Commands::Info => InfoStrategy.execute(options).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
