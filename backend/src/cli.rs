use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "discoteca", version, about = "Catalog songs with their artist and genres")]
pub struct Cli {
  /// SQLite database file. Overrides `[storage].db_path` from the config file.
  #[arg(long, global = true, env = "DATABASE_URL")]
  pub database: Option<String>,

  /// Debug-level logging.
  #[arg(short, long, global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Create, inspect and edit songs.
  #[command(subcommand)]
  Song(SongCommand),

  /// Artists known to the catalog.
  #[command(subcommand)]
  Artist(ListCommand),

  /// Genres known to the catalog.
  #[command(subcommand)]
  Genre(ListCommand),

  /// Read or change the `[storage]` configuration.
  #[command(subcommand)]
  Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum SongCommand {
  /// Create a song; the artist and each genre are created if missing.
  New(SongFields),

  /// Show a song with its artist and genres.
  Show {
    id: String,
    #[arg(long)]
    json: bool,
  },

  /// Rename a song, change its artist or link more genres.
  Edit {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    artist: Option<String>,
    /// Comma-separated genres to add to the existing ones.
    #[arg(long)]
    genres: Option<String>,
  },

  /// List every song.
  List {
    #[arg(long)]
    json: bool,
  },
}

#[derive(Debug, Args)]
pub struct SongFields {
  #[arg(long)]
  pub name: String,
  #[arg(long)]
  pub artist: Option<String>,
  /// Comma-separated, e.g. "pop, dance".
  #[arg(long)]
  pub genres: Option<String>,
  #[arg(long)]
  pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
  List {
    #[arg(long)]
    json: bool,
  },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
  /// Print the effective `[storage]` section.
  Show,

  /// Update fields of the `[storage]` section.
  Set {
    #[arg(long)]
    db_path: Option<PathBuf>,
    #[arg(long)]
    journal_mode: Option<String>,
    #[arg(long)]
    pool_size: Option<u32>,
    #[arg(long)]
    busy_timeout_ms: Option<u64>,
  },
}
