use anyhow::Result;
use clap::Parser;

use mixcd_compose::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "mixcd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Access token for catalog requests (overrides MIXCD_ACCESS_TOKEN and the config file)
    #[arg(long, global = true)]
    token: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Compose a Mix CD from a seed track
    ///
    /// Looks up the seed track, classifies its artist's genre and release
    /// era, then gathers candidates in stages until the pool is full:
    ///
    /// - Genre search bounded to the seed's release year +/- 2
    /// - Genre search with no date bound
    /// - Top tracks of up to 5 related artists (3 each)
    /// - Top tracks of the seed artist
    ///
    /// Candidates are ranked by popularity and deduplicated. The seed
    /// always comes first.
    Compose {
        /// Catalog id of the seed track
        seed_id: String,

        /// Print the track list as JSON
        #[arg(long)]
        json: bool,

        /// Number of tracks in the mix, seed included
        #[arg(long, default_value_t = mixcd_core::model::TRACKS_PER_MIX)]
        target: usize,
    },
    /// Search tracks by free text to find a seed
    Search {
        /// Search terms
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = commands::search::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Show the track currently playing
    NowPlaying,
    /// Obtain an access token via OAuth PKCE
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, clap::Subcommand)]
enum AuthCommand {
    /// Print an authorization URL and the PKCE verifier to keep for the exchange
    Url,
    /// Exchange an authorization code for an access token
    Exchange {
        /// Code from the redirect URI's `code` parameter
        #[arg(long)]
        code: String,

        /// Verifier printed by 'mixcd auth url'
        #[arg(long)]
        verifier: String,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Show the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file if it does not exist
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_with_token(cli.token)?;
    twyg::setup(config.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {}", e))?;

    match cli.command {
        Commands::Compose {
            seed_id,
            json,
            target,
        } => {
            commands::compose::run_compose(&config, &seed_id, target, json).await?;
        }
        Commands::Search { query, limit } => {
            commands::search::run_search(&config, &query, limit).await?;
        }
        Commands::NowPlaying => {
            commands::now_playing::run_now_playing(&config).await?;
        }
        Commands::Auth(AuthCommand::Url) => {
            commands::auth::show_authorize_url(&config)?;
        }
        Commands::Auth(AuthCommand::Exchange { code, verifier }) => {
            commands::auth::exchange_code(&config, &code, &verifier).await?;
        }
        Commands::Config(ConfigCommand::Show) => commands::config::show_config(&config)?,
        Commands::Config(ConfigCommand::Path) => commands::config::show_path()?,
        Commands::Config(ConfigCommand::Example) => commands::config::show_example()?,
        Commands::Config(ConfigCommand::Init) => commands::config::init_config()?,
    }

    Ok(())
}
