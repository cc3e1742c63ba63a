use anyhow::Result;
use cantus_enrich::Config;
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "cantus", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the lyrics dataset (default: ~/.local/share/cantus/spotify_millsongdata.csv)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Recommend songs with lyrics similar to a given song
    ///
    /// Loads the dataset, builds a TF-IDF index over the normalized lyrics of
    /// every song, and ranks all other songs by cosine similarity to the
    /// selected one.
    ///
    /// The song is matched by exact title. When several songs share the
    /// title, the first one in the dataset is used; run 'cantus songs' to
    /// see the available titles.
    ///
    /// An unknown title is not an error: nothing is recommended.
    Recommend {
        /// Exact song title
        song: String,

        /// Number of recommendations (default: from config, 5)
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Look up album covers (Spotify credentials required, placeholder otherwise)
        #[arg(long)]
        covers: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List song titles in the dataset
    Songs {
        /// Case-insensitive substring to filter titles and artists
        filter: Option<String>,
    },
    /// Show dataset and index statistics
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one config value, or the whole config file
    Get {
        /// Config key
        key: Option<String>,
    },
    /// Set a value in the config file
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            song,
            top_n,
            covers,
            json,
        } => {
            let config = Config::load_with_dataset_path(cli.data)?;
            let top_n = top_n.unwrap_or(config.top_n);
            commands::run_recommend(&config, &song, top_n, covers, json).await?;
        }
        Commands::Songs { filter } => {
            let config = Config::load_with_dataset_path(cli.data)?;
            commands::list_songs(&config, filter.as_deref())?;
        }
        Commands::Status => {
            let config = Config::load_with_dataset_path(cli.data)?;
            commands::show_status(&config)?;
        }
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show_config()?,
            ConfigAction::Get { key } => commands::config::get_config(key)?,
            ConfigAction::Set { key, value } => commands::config::set_config(&key, &value)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
