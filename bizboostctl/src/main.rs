use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{PreviewArgs, SessionAction};

#[derive(Parser)]
#[command(
    name = "bizboostctl",
    about = "Inspect and drive bizboost template themes"
)]
struct Cli {
    /// Session file standing in for browser session storage
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the template a route path belongs to
    Classify {
        path: String,
    },
    /// Map a color name onto the supported palette
    Resolve {
        color: String,
        /// Report whether the input was replaced by the fallback
        #[arg(long)]
        audit: bool,
    },
    /// List templates with their routes and default colors
    Templates,
    /// Mount a route, apply stored colors and optional edits, print the theme
    Preview(PreviewArgs),
    /// Inspect or edit the session blob
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Show the resolved configuration and where it came from
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Classify { path } => commands::classify(&path),
        Command::Resolve { color, audit } => commands::resolve(&color, audit),
        Command::Templates => commands::templates(),
        Command::Preview(args) => {
            let (config, _) = commands::load_config(cli.session_file)?;
            commands::preview(&config, args).await
        }
        Command::Session { action } => {
            let (config, _) = commands::load_config(cli.session_file)?;
            commands::session(&config, action)
        }
        Command::Config => {
            let (config, source) = commands::load_config(cli.session_file)?;
            commands::show_config(&config, &source)
        }
    }
}
