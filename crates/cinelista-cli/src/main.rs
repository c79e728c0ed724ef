use clap::{ArgAction, Parser, Subcommand};
use cinelista_config::{Config, PathManager};
use cinelista_models::ContentKind;
use cinelista_store::Collection;
use color_eyre::eyre::eyre;
use commands::{browse, clear, config, saved};

mod app;
mod cache;
mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "cinelista")]
#[command(about = "cinelista - Browse movies and series, keep a watch-later list and favorites")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Always ask the catalog, ignoring cached responses
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trending and popular rows
    Home,
    /// Titles trending today
    Trending {
        /// movie or tv
        kind: ContentKind,
    },
    /// Most popular titles
    Popular {
        /// movie or tv
        kind: ContentKind,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Highest rated titles
    TopRated {
        /// movie or tv
        kind: ContentKind,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List the catalog's genres
    Genres {
        /// movie or tv
        kind: ContentKind,
    },
    /// Browse titles of one genre
    Discover {
        /// movie or tv
        kind: ContentKind,
        /// Genre ID (see `cinelista genres`)
        #[arg(long)]
        genre: u64,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Detail view of one title
    #[command(long_about = "Show details for a movie or series: summary, genres, runtime or seasons, top cast, similar titles, and whether it is in your watch-later list or favorites.")]
    Show {
        /// movie or tv
        kind: ContentKind,
        id: u64,
    },
    /// Episodes of one season of a series
    Season {
        series_id: u64,
        number: u32,
    },
    /// Search movies and series
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Manage the watch-later list
    WatchLater {
        #[command(subcommand)]
        cmd: SavedCommands,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        cmd: SavedCommands,
    },
    /// View or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear cached responses or saved lists
    #[command(long_about = "Clear locally stored data. Use --cache to drop cached catalog responses, --saved to empty the watch-later list and favorites, or --all for both.")]
    Clear {
        /// Clear the response cache and saved lists
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear cached catalog responses
        #[arg(long, action = ArgAction::SetTrue)]
        cache: bool,

        /// Empty the watch-later list and favorites
        #[arg(long, action = ArgAction::SetTrue)]
        saved: bool,
    },
}

#[derive(Subcommand)]
pub enum SavedCommands {
    /// Save a title
    Add {
        /// movie or tv
        kind: ContentKind,
        id: u64,
    },
    /// Remove a title
    Remove {
        /// movie or tv
        kind: ContentKind,
        id: u64,
    },
    /// Save the title if it is not saved, remove it otherwise
    Toggle {
        /// movie or tv
        kind: ContentKind,
        id: u64,
    },
    /// Tell whether a title is saved
    Check {
        /// movie or tv
        kind: ContentKind,
        id: u64,
    },
    /// List saved titles, oldest first
    List,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the catalog API key
    #[command(long_about = "Store the TMDB API key in the credentials file. When KEY is omitted you are prompted for it without echo. The CINELISTA_TMDB_API_KEY environment variable overrides the stored key.")]
    SetApiKey {
        key: Option<String>,
    },
    /// Set the language used for catalog requests (e.g. es-MX, en-US)
    SetLanguage {
        language: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid config in {}: {}", config_file.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, config.logging.file.as_deref())
        .map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let app = app::App::new(paths, config, output, cli.no_cache)?;

    let result = match cli.command {
        Commands::Home => browse::run_home(&app).await,
        Commands::Trending { kind } => browse::run_trending(&app, kind).await,
        Commands::Popular { kind, page } => browse::run_popular(&app, kind, page).await,
        Commands::TopRated { kind, page } => browse::run_top_rated(&app, kind, page).await,
        Commands::Genres { kind } => browse::run_genres(&app, kind).await,
        Commands::Discover { kind, genre, page } => browse::run_discover(&app, kind, genre, page).await,
        Commands::Show { kind, id } => browse::run_show(&app, kind, id).await,
        Commands::Season { series_id, number } => browse::run_season(&app, series_id, number).await,
        Commands::Search { query, page } => browse::run_search(&app, &query, page).await,
        Commands::WatchLater { cmd } => saved::run_saved(&app, Collection::WatchLater, cmd).await,
        Commands::Favorites { cmd } => saved::run_saved(&app, Collection::Favorites, cmd).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(&app, cmd).await
        }
        Commands::Clear { all, cache, saved } => clear::run_clear(&app, all, cache, saved).await,
    };

    if let Err(e) = result {
        tracing::debug!("Command failed: {:?}", e);
        app.output.error(format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
