//! CLI entry point for inkpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(version = "0.1.0")]
#[command(about = "Markdown blog pipeline with a JSON query API", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the content directory and serve the query API
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List posts
    List {
        /// Emit the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the content directory
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpress=debug,info"
    } else {
        "inkpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Serve { port, ip } => {
            let app = inkpress::Inkpress::new(&base_dir)?;
            let collection = Arc::new(app.load_collection()?);
            tracing::info!("Starting server at http://{}:{}", ip, port);
            inkpress::server::start(collection, &ip, port).await?;
        }

        Commands::List { json } => {
            let app = inkpress::Inkpress::new(&base_dir)?;
            inkpress::commands::list::run(&app, json)?;
        }

        Commands::Check => {
            let app = inkpress::Inkpress::new(&base_dir)?;
            inkpress::commands::check::run(&app)?;
        }
    }

    Ok(())
}
