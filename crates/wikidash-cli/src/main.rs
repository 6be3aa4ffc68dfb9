mod article;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "wikidash-cli")]
#[command(about = "Wikipedia article dashboard from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch an article and print its statistics and summary
    Article {
        /// Free-text title or search query (e.g. "einstein")
        title: String,
        /// Print the aggregated record as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Render wiki markup into display blocks
    Render {
        /// File to read; stdin when omitted
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}

/// Configuration is only loaded by commands that talk to Wikipedia.
async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    match cli.command {
        Some(Commands::Article { title, json }) => {
            let config = wikidash_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            article::run_article(&config, &title, json).await?;
        }
        Some(Commands::Render { path }) => render::run_render(path.as_deref())?,
        None => println!("wikidash-cli: try `wikidash-cli article \"Albert Einstein\"` or --help"),
    }

    Ok(())
}

/// Logs go to stderr; stdout carries command output.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
