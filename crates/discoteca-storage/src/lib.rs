pub mod config;
pub mod models;
pub mod pool;
pub mod schema;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use discoteca_core::domain::{Artist, ArtistId, Genre, GenreId, Song, SongGenre, SongGenreId, SongId};
use discoteca_core::ports::{CatalogRepository, RepoError};

pub use crate::config::StorageConfig;
use crate::models::{
  ArtistRow, GenreRow, NewArtistRow, NewGenreRow, NewSongGenreRow, NewSongRow, SongGenreRow, SongRow,
};
use crate::pool::{DbConnection, DbPool, open_pool};

/// Adaptador SQLite (diesel + r2d2) del puerto [`CatalogRepository`].
#[derive(Clone)]
pub struct SqliteCatalogRepository {
  pool: DbPool,
}

impl SqliteCatalogRepository {
  pub fn open(cfg: &StorageConfig) -> Result<Self, RepoError> {
    Ok(Self { pool: open_pool(cfg)? })
  }

  fn conn(&self) -> Result<DbConnection, RepoError> {
    self.pool.get().map_err(|e| RepoError::Unavailable(e.to_string()))
  }
}

fn storage_err(e: diesel::result::Error) -> RepoError {
  match e {
    diesel::result::Error::NotFound => RepoError::NotFound,
    other => RepoError::Storage(other.to_string()),
  }
}

fn parse_uuid(table: &str, raw: &str) -> Result<Uuid, RepoError> {
  Uuid::parse_str(raw).map_err(|e| RepoError::Corrupt(format!("{table}.id {raw:?}: {e}")))
}

fn row_to_artist(row: ArtistRow) -> Result<Artist, RepoError> {
  Ok(Artist { id: ArtistId::from_uuid(parse_uuid("artists", &row.id)?), name: row.name })
}

fn row_to_genre(row: GenreRow) -> Result<Genre, RepoError> {
  Ok(Genre { id: GenreId::from_uuid(parse_uuid("genres", &row.id)?), name: row.name })
}

fn row_to_song_genre(link: SongGenreRow, genre: GenreRow) -> Result<SongGenre, RepoError> {
  Ok(SongGenre {
    id: SongGenreId::from_uuid(parse_uuid("song_genres", &link.id)?),
    song_id: SongId::from_uuid(parse_uuid("songs", &link.song_id)?),
    genre: row_to_genre(genre)?,
  })
}

/// `song_genres.position` es `INTEGER` (i32 en diesel); un desbordamiento aborta la transacción.
fn link_position(position: i64) -> QueryResult<i32> {
  i32::try_from(position).map_err(|e| diesel::result::Error::SerializationError(Box::new(e)))
}

/// Carga el agregado completo de una fila `songs`: artista y vínculos ordenados por `position`.
fn load_song(conn: &mut SqliteConnection, row: SongRow) -> QueryResult<Result<Song, RepoError>> {
  use crate::schema::{artists, genres, song_genres};

  let artist_row = match &row.artist_id {
    Some(artist_id) => artists::table
      .find(artist_id)
      .select(ArtistRow::as_select())
      .first::<ArtistRow>(conn)
      .optional()?,
    None => None,
  };

  let links = song_genres::table
    .inner_join(genres::table)
    .filter(song_genres::song_id.eq(&row.id))
    .order(song_genres::position.asc())
    .select((SongGenreRow::as_select(), GenreRow::as_select()))
    .load::<(SongGenreRow, GenreRow)>(conn)?;

  Ok(assemble_song(row, artist_row, links))
}

fn assemble_song(
  row: SongRow,
  artist_row: Option<ArtistRow>,
  links: Vec<(SongGenreRow, GenreRow)>,
) -> Result<Song, RepoError> {
  let id = SongId::from_uuid(parse_uuid("songs", &row.id)?);
  let artist = artist_row.map(row_to_artist).transpose()?;
  let song_genres = links
    .into_iter()
    .map(|(link, genre)| row_to_song_genre(link, genre))
    .collect::<Result<Vec<_>, _>>()?;

  Ok(Song::from_stored(id, row.name, artist, song_genres))
}

impl CatalogRepository for SqliteCatalogRepository {
  fn find_artist_by_name(&self, artist_name: &str) -> Result<Option<Artist>, RepoError> {
    use crate::schema::artists::dsl::*;

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    let row_opt = artists
      .filter(name.eq(artist_name))
      .select(ArtistRow::as_select())
      .first::<ArtistRow>(conn)
      .optional()
      .map_err(storage_err)?;

    row_opt.map(row_to_artist).transpose()
  }

  fn insert_artist(&self, artist: &Artist) -> Result<(), RepoError> {
    use crate::schema::artists::dsl::*;

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    diesel::insert_into(artists)
      .values(&NewArtistRow { id: artist.id.to_string(), name: &artist.name })
      .execute(conn)
      .map_err(storage_err)?;

    tracing::debug!(artist_id = %artist.id, name = %artist.name, "artist inserted");
    Ok(())
  }

  fn find_or_create_artist(&self, artist_name: &str) -> Result<Artist, RepoError> {
    use crate::schema::artists::dsl::*;

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    let candidate = NewArtistRow { id: ArtistId::new().to_string(), name: artist_name };

    // BEGIN IMMEDIATE: el INSERT y el SELECT ven el mismo estado aunque otro proceso compita
    let (row, created) = conn
      .immediate_transaction::<_, diesel::result::Error, _>(|conn| {
        let created = diesel::insert_into(artists)
          .values(&candidate)
          .on_conflict(name)
          .do_nothing()
          .execute(conn)?;

        let row = artists
          .filter(name.eq(artist_name))
          .select(ArtistRow::as_select())
          .first::<ArtistRow>(conn)?;
        Ok((row, created > 0))
      })
      .map_err(storage_err)?;

    if created {
      tracing::debug!(artist_id = %row.id, name = artist_name, "artist created");
    }
    row_to_artist(row)
  }

  fn find_genre_by_name(&self, genre_name: &str) -> Result<Option<Genre>, RepoError> {
    use crate::schema::genres::dsl::*;

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    let row_opt = genres
      .filter(name.eq(genre_name))
      .select(GenreRow::as_select())
      .first::<GenreRow>(conn)
      .optional()
      .map_err(storage_err)?;

    row_opt.map(row_to_genre).transpose()
  }

  fn insert_genre(&self, genre: &Genre) -> Result<(), RepoError> {
    use crate::schema::genres::dsl::*;

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    diesel::insert_into(genres)
      .values(&NewGenreRow { id: genre.id.to_string(), name: &genre.name })
      .execute(conn)
      .map_err(storage_err)?;

    tracing::debug!(genre_id = %genre.id, name = %genre.name, "genre inserted");
    Ok(())
  }

  fn find_or_create_genre(&self, genre_name: &str) -> Result<Genre, RepoError> {
    use crate::schema::genres::dsl::*;

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    let candidate = NewGenreRow { id: GenreId::new().to_string(), name: genre_name };

    let (row, created) = conn
      .immediate_transaction::<_, diesel::result::Error, _>(|conn| {
        let created = diesel::insert_into(genres)
          .values(&candidate)
          .on_conflict(name)
          .do_nothing()
          .execute(conn)?;

        let row = genres
          .filter(name.eq(genre_name))
          .select(GenreRow::as_select())
          .first::<GenreRow>(conn)?;
        Ok((row, created > 0))
      })
      .map_err(storage_err)?;

    if created {
      tracing::debug!(genre_id = %row.id, name = genre_name, "genre created");
    }
    row_to_genre(row)
  }

  fn save_song(&self, song: &Song) -> Result<(), RepoError> {
    use crate::schema::{song_genres, songs};

    let song_id = song.id().to_string();
    let song_row = NewSongRow {
      id: song_id.clone(),
      name: song.name(),
      artist_id: song.artist().map(|a| a.id.to_string()),
    };

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    conn
      .immediate_transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::insert_into(songs::table)
          .values(&song_row)
          .on_conflict(songs::id)
          .do_update()
          .set(&song_row)
          .execute(conn)?;

        if song.pending_genres().is_empty() {
          return Ok(());
        }

        let stored: i64 = song_genres::table
          .filter(song_genres::song_id.eq(&song_id))
          .count()
          .get_result(conn)?;

        let links: Vec<NewSongGenreRow> = song
          .pending_genres()
          .iter()
          .zip(stored..)
          .map(|(link, position)| -> QueryResult<NewSongGenreRow> {
            Ok(NewSongGenreRow {
              id: link.id.to_string(),
              song_id: song_id.clone(),
              genre_id: link.genre.id.to_string(),
              position: link_position(position)?,
            })
          })
          .collect::<QueryResult<_>>()?;

        diesel::insert_into(song_genres::table).values(&links).execute(conn)?;
        Ok(())
      })
      .map_err(storage_err)?;

    tracing::debug!(song_id = %song_id, links = song.pending_genres().len(), "song row saved");
    Ok(())
  }

  fn find_song(&self, id: SongId) -> Result<Option<Song>, RepoError> {
    use crate::schema::songs;

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    let loaded = conn
      .transaction::<_, diesel::result::Error, _>(|conn| {
        let Some(row) = songs::table
          .find(id.to_string())
          .select(SongRow::as_select())
          .first::<SongRow>(conn)
          .optional()?
        else {
          return Ok(None);
        };
        load_song(conn, row).map(Some)
      })
      .map_err(storage_err)?;

    loaded.transpose()
  }

  fn list_artists(&self) -> Result<Vec<Artist>, RepoError> {
    use crate::schema::artists::dsl::*;

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    artists
      .order((name.asc(), id.asc()))
      .select(ArtistRow::as_select())
      .load::<ArtistRow>(conn)
      .map_err(storage_err)?
      .into_iter()
      .map(row_to_artist)
      .collect()
  }

  fn list_genres(&self) -> Result<Vec<Genre>, RepoError> {
    use crate::schema::genres::dsl::*;

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    genres
      .order((name.asc(), id.asc()))
      .select(GenreRow::as_select())
      .load::<GenreRow>(conn)
      .map_err(storage_err)?
      .into_iter()
      .map(row_to_genre)
      .collect()
  }

  fn list_songs(&self) -> Result<Vec<Song>, RepoError> {
    use crate::schema::songs;

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    let loaded = conn
      .transaction::<_, diesel::result::Error, _>(|conn| {
        let rows = songs::table
          .order((songs::created_at.asc(), songs::name.asc()))
          .select(SongRow::as_select())
          .load::<SongRow>(conn)?;
        rows.into_iter().map(|row| load_song(conn, row)).collect::<QueryResult<Vec<_>>>()
      })
      .map_err(storage_err)?;

    loaded.into_iter().collect()
  }
}
