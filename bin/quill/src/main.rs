//! quill
//!
//! Self-hosted blog server. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for quill.
#[derive(Parser)]
#[command(name = "quill", version, about = "A small self-hosted blog server")]
struct Cli {
    /// Site root holding config, data, pages, posts and templates
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Configuration file, relative to the site root
    #[arg(short, long, default_value = "config/app.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Boot the site and serve it in the foreground
    Start,
    /// Stop the server recorded in the PID file
    Stop,
    /// Stop the running server, then start again
    Restart,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    quill::init_tracing(cli.verbose);

    match cli.command {
        Commands::Start => quill::cmd::start::run(&cli.root, &cli.config).await?,
        Commands::Stop => quill::cmd::stop::run(&cli.root, &cli.config)?,
        Commands::Restart => quill::cmd::restart::run(&cli.root, &cli.config).await?,
    }

    Ok(())
}
