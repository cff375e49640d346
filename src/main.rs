use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod model;
mod service;
mod ui;
mod upload;
mod votes;

#[cfg(test)]
mod tests;

use cli::CliHandler;

#[derive(Parser)]
#[command(
    name = "cattery",
    about = "Browse, vote on and upload cat pictures from your terminal",
    long_about = "cattery - a terminal client for the cat image voting API

OVERVIEW:
  Browse the shared cat gallery, vote pictures up or down, keep favourites,
  and upload your own cats.

QUICK START:
  cattery list                          # Show the gallery with scores
  cattery upvote <IMAGE_ID>             # Vote a picture up
  cattery upload <FILE>                 # Share a cat (PNG or JPEG)
  cattery status                        # Check configuration and server",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use a specific config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the cat gallery with scores and favourite markers
    #[command(aliases = &["ls"])]
    List,

    /// Show aggregated vote scores
    Votes,

    /// Vote a picture up
    #[command(aliases = &["up"])]
    Upvote(IdArgs),

    /// Vote a picture down
    #[command(aliases = &["down"])]
    Downvote(IdArgs),

    /// Delete a picture from the gallery
    #[command(aliases = &["rm"])]
    Delete(DeleteArgs),

    /// Add a picture to your favourites
    #[command(aliases = &["fav"])]
    Favourite(IdArgs),

    /// Remove a favourite by its record id
    #[command(aliases = &["unfav"])]
    Unfavourite(UnfavouriteArgs),

    /// Upload a PNG or JPEG picture
    Upload(UploadArgs),

    /// Show configuration and server connectivity
    #[command(aliases = &["st"])]
    Status,

    /// Configure settings
    #[command(subcommand, aliases = &["cfg"])]
    Config(ConfigCommand),
}

#[derive(Args)]
pub struct IdArgs {
    pub image_id: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub image_id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct UnfavouriteArgs {
    pub favourite_id: i64,
}

#[derive(Args)]
pub struct UploadArgs {
    pub path: PathBuf,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,
    SetEndpoint { url: String },
    SetTimeout { seconds: u64 },
    Reset,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("cattery={}", log_level))
        .init();

    let mut handler = CliHandler::new(cli.config);
    if let Err(e) = handler.execute(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
