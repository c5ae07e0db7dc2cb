use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "confab")]
#[command(about = "Browse the conference schedule, speakers and favorites", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to CONFAB_PATH or the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed the data directory with an event file from a path or URL
    Init {
        #[arg(long)]
        from: String,
    },

    /// Show the event summary
    Info,

    /// Show a day's sessions grouped by start time
    Schedule {
        /// Day number, 1-based (defaults to the day containing the
        /// current time, else the first day)
        #[arg(long)]
        day: Option<usize>,

        /// Only favorited sessions and sessions by favorited speakers
        #[arg(long)]
        favorites: bool,

        /// Epoch seconds to evaluate live status against (defaults to now)
        #[arg(long)]
        at: Option<i64>,
    },

    /// Browse the speaker directory
    Speakers {
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,

        /// Only favorited speakers
        #[arg(long)]
        favorites: bool,
    },

    /// Manage favorited sessions and speakers
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },

    /// Fetch the remote data file and swap it in if it verifies
    Refresh,
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    List,
    Add {
        kind: FavoriteTarget,
        id: i64,
    },
    Remove {
        kind: FavoriteTarget,
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FavoriteTarget {
    Session,
    Speaker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}
