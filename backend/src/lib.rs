pub mod cli;
mod config;
mod infrastructure;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use discoteca_config::{CONFIG_BACKEND, TomlConfigBackend};
use discoteca_core::domain::{NewSong, Song, SongEdit, SongId};
use discoteca_core::CoreError;
use discoteca_core::services::CatalogService;
use discoteca_storage::{SqliteCatalogRepository, StorageConfig};
use serde::Serialize;

use crate::cli::{Cli, Command, ConfigCommand, ListCommand, SongCommand};
use crate::config::{SongDto, StorageConfigDto};
use infrastructure::logging::init_logging;

/// Type alias to simplify the generic signature of the Service.
type ConcreteCatalogService = CatalogService<SqliteCatalogRepository>;

/// Entry point of the `discoteca` binary.
pub fn run() -> Result<()> {
  let env_file = dotenvy::dotenv();

  let cli = Cli::parse();
  init_logging(cli.verbose)?;

  if let Some(err) = env_file_error(env_file) {
    tracing::warn!(error = %err, "ignoring unreadable .env file");
  }

  let stdout = std::io::stdout();
  execute(cli, &CONFIG_BACKEND, &mut stdout.lock())
}

/// Runs one parsed command, reading config from `backend` and writing results to `out`.
pub fn execute(cli: Cli, backend: &TomlConfigBackend, out: &mut dyn Write) -> Result<()> {
  match cli.command {
    Command::Config(cmd) => run_config(cmd, backend, out),
    Command::Song(cmd) => {
      let service = open_catalog(cli.database.as_deref(), backend)?;
      run_song(cmd, &service, out)
    }
    Command::Artist(ListCommand::List { json }) => {
      let artists = open_catalog(cli.database.as_deref(), backend)?.list_artists()?;
      if json {
        return print_json(out, &artists);
      }
      for artist in &artists {
        writeln!(out, "{}\t{}", artist.id, artist.name)?;
      }
      Ok(())
    }
    Command::Genre(ListCommand::List { json }) => {
      let genres = open_catalog(cli.database.as_deref(), backend)?.list_genres()?;
      if json {
        return print_json(out, &genres);
      }
      for genre in &genres {
        writeln!(out, "{}\t{}", genre.id, genre.name)?;
      }
      Ok(())
    }
  }
}

/// `--database` / `DATABASE_URL` wins over `[storage].db_path`. A `sqlite://` prefix is accepted.
fn open_catalog(database: Option<&str>, backend: &TomlConfigBackend) -> Result<ConcreteCatalogService> {
  let mut cfg = StorageConfig::load_from(backend).context("failed to load [storage] config")?;

  if let Some(url) = database {
    let path = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:")).unwrap_or(url);
    cfg.db_path = path.into();
  }

  let repo = SqliteCatalogRepository::open(&cfg)
    .with_context(|| format!("failed to open catalog at {}", cfg.db_path.display()))?;

  Ok(CatalogService::new(repo))
}

fn run_song(cmd: SongCommand, service: &ConcreteCatalogService, out: &mut dyn Write) -> Result<()> {
  match cmd {
    SongCommand::New(fields) => {
      let song = service.create_song(NewSong {
        name: fields.name,
        artist_name: fields.artist,
        genre_names: fields.genres,
      })?;
      print_song(out, &song, fields.json)
    }
    SongCommand::Show { id, json } => {
      let song = service.show_song(parse_song_id(&id)?)?;
      print_song(out, &song, json)
    }
    SongCommand::Edit { id, name, artist, genres } => {
      let edit = SongEdit { name, artist_name: artist, genre_names: genres };
      let song = service.edit_song(parse_song_id(&id)?, edit)?;
      print_song(out, &song, false)
    }
    SongCommand::List { json } => {
      let songs = service.list_songs()?;
      if json {
        let dtos: Vec<SongDto> = songs.iter().map(SongDto::from).collect();
        return print_json(out, &dtos);
      }
      for song in &songs {
        writeln!(out, "{}\t{}\t{}", song.id(), song.name(), song.artist_name().unwrap_or("-"))?;
      }
      Ok(())
    }
  }
}

fn run_config(cmd: ConfigCommand, backend: &TomlConfigBackend, out: &mut dyn Write) -> Result<()> {
  let mut cfg = StorageConfig::load_from(backend).context("failed to load [storage] config")?;

  if let ConfigCommand::Set { db_path, journal_mode, pool_size, busy_timeout_ms } = cmd {
    if let Some(db_path) = db_path {
      cfg.db_path = db_path;
    }
    if let Some(journal_mode) = journal_mode {
      cfg.journal_mode = Some(journal_mode);
    }
    if let Some(pool_size) = pool_size {
      cfg.pool_size = pool_size;
    }
    if let Some(busy_timeout_ms) = busy_timeout_ms {
      cfg.busy_timeout_ms = Some(busy_timeout_ms);
    }
    cfg.save_to(backend).context("failed to save [storage] config")?;
    tracing::info!(path = %backend.paths().config_file().display(), "storage config updated");
  }

  let rendered = toml::to_string(&StorageConfigDto::from(cfg))?;
  write!(out, "{rendered}")?;
  Ok(())
}

/// A missing `.env` is the normal case; anything else is worth a warning.
fn env_file_error<T>(result: dotenvy::Result<T>) -> Option<dotenvy::Error> {
  match result {
    Ok(_) => None,
    Err(err) if err.not_found() => None,
    Err(err) => Some(err),
  }
}

fn parse_song_id(raw: &str) -> Result<SongId, CoreError> {
  Ok(raw.parse::<SongId>()?)
}

fn print_song(out: &mut dyn Write, song: &Song, json: bool) -> Result<()> {
  let dto = SongDto::from(song);
  if json {
    return print_json(out, &dto);
  }

  writeln!(out, "id:      {}", dto.id)?;
  writeln!(out, "name:    {}", dto.name)?;
  writeln!(out, "artist:  {}", dto.artist.as_deref().unwrap_or("-"))?;
  writeln!(out, "genres:  {}", dto.genres.join(", "))?;
  Ok(())
}

fn print_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
  serde_json::to_writer_pretty(&mut *out, value)?;
  writeln!(out)?;
  Ok(())
}
