use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "subalign")]
#[command(author, version, about = "Subtitle timing synchronization automation tool")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synchronize a subtitle against its reference video
    Sync {
        /// Reference video file
        #[arg(required = true)]
        video: PathBuf,

        /// Subtitle file to correct in place
        #[arg(required = true)]
        subtitle: PathBuf,

        /// Alpha-2 language code of the subtitle
        #[arg(short, long, default_value = "en")]
        language: String,

        #[command(flatten)]
        media: MediaArgs,
    },

    /// Check that required external tools are available
    CheckTools {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Manage the subtitle blacklist
    Blacklist {
        #[command(subcommand)]
        command: BlacklistCommands,
    },
}

/// Media identity for the history record. A movie id and a series/episode
/// id pair are mutually exclusive.
#[derive(Args)]
pub struct MediaArgs {
    /// Movie id the subtitle belongs to
    #[arg(
        long,
        conflicts_with_all = ["series_id", "episode_id"],
        required_unless_present = "series_id"
    )]
    pub movie_id: Option<i64>,

    /// Series id (requires --episode-id)
    #[arg(long, requires = "episode_id")]
    pub series_id: Option<i64>,

    /// Episode id (requires --series-id)
    #[arg(long, requires = "series_id")]
    pub episode_id: Option<i64>,
}

#[derive(Subcommand)]
pub enum BlacklistCommands {
    /// List blacklisted subtitles
    List {
        /// Show the series blacklist instead of the movie one
        #[arg(long)]
        series: bool,
    },

    /// Blacklist a movie subtitle
    AddMovie {
        #[arg(long)]
        movie_id: i64,
        #[arg(long)]
        provider: String,
        #[arg(long)]
        subs_id: String,
        #[arg(long)]
        language: Option<String>,
    },

    /// Blacklist a series episode subtitle
    AddEpisode {
        #[arg(long)]
        series_id: i64,
        #[arg(long)]
        episode_id: i64,
        #[arg(long)]
        provider: String,
        #[arg(long)]
        subs_id: String,
        #[arg(long)]
        language: Option<String>,
    },

    /// Remove one blacklist entry
    Remove {
        #[arg(long)]
        provider: String,
        #[arg(long)]
        subs_id: String,
        /// Remove from the series blacklist instead of the movie one
        #[arg(long)]
        series: bool,
    },

    /// Clear a blacklist
    Clear {
        /// Clear the series blacklist instead of the movie one
        #[arg(long)]
        series: bool,
    },
}
