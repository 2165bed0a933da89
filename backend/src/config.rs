use discoteca_core::domain::Song;
use discoteca_storage::StorageConfig;
use serde::{Deserialize, Serialize};

/// Flat view of the `[storage]` section, as printed by `config show`.
#[derive(Debug, Serialize, PartialEq)]
pub struct StorageConfigDto {
  pub db_path: String,
  pub journal_mode: Option<String>,
  pub pool_size: u32,
  pub busy_timeout_ms: Option<u64>,
}

impl From<StorageConfig> for StorageConfigDto {
  fn from(cfg: StorageConfig) -> Self {
    StorageConfigDto {
      db_path: cfg.db_path.to_string_lossy().to_string(),
      journal_mode: cfg.journal_mode,
      pool_size: cfg.pool_size,
      busy_timeout_ms: cfg.busy_timeout_ms,
    }
  }
}

/// What the show view renders: the song, its artist's name and its genres' names.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SongDto {
  pub id: String,
  pub name: String,
  pub artist: Option<String>,
  pub genres: Vec<String>,
}

impl From<&Song> for SongDto {
  fn from(song: &Song) -> Self {
    SongDto {
      id: song.id().to_string(),
      name: song.name().to_string(),
      artist: song.artist_name().map(str::to_string),
      genres: song.genres().map(|g| g.name.clone()).collect(),
    }
  }
}
