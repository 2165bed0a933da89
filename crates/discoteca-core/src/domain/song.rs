use crate::domain::artist::Artist;
use crate::domain::genre::Genre;
use crate::domain::ids::{SongGenreId, SongId};
use crate::errors::CoreError;
use crate::ports::CatalogRepository;
use crate::services::{ArtistResolver, GenreResolver};
use serde::{Deserialize, Serialize};

/// Estado observable de una canción respecto al almacén.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SongState {
  /// Construida en memoria; todavía no se ha guardado nunca.
  Transient,
  /// Guardada al menos una vez. Los cambios posteriores siguen en memoria
  /// hasta el próximo `save`.
  Persisted,
}

/// Vínculo canción-género (la tabla de unión `song_genres`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongGenre {
  pub id: SongGenreId,
  pub song_id: SongId,
  pub genre: Genre,
}

/// Campos que envía un formulario de alta de canción.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
  pub name: String,
  pub artist_name: Option<String>,
  /// Lista separada por comas, p. ej. `"pop, dance"`.
  pub genre_names: Option<String>,
}

/// Cambios opcionales sobre una canción existente.
///
/// `genre_names` añade vínculos; no reemplaza los que ya existen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongEdit {
  pub name: Option<String>,
  pub artist_name: Option<String>,
  pub genre_names: Option<String>,
}

/// La Canción (Song): agregado que posee un artista y sus vínculos de género.
///
/// Los vínculos nuevos se acumulan en una lista pendiente (unidad de trabajo)
/// y sólo llegan al almacén cuando se llama a [`Song::save`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
  id: SongId,
  name: String,
  artist: Option<Artist>,
  song_genres: Vec<SongGenre>,
  pending_genres: Vec<SongGenre>,
  state: SongState,
}

impl Song {
  pub fn new(name: impl Into<String>) -> Self {
    Song {
      id: SongId::new(),
      name: name.into(),
      artist: None,
      song_genres: Vec::new(),
      pending_genres: Vec::new(),
      state: SongState::Transient,
    }
  }

  /// Reconstruye una canción ya guardada. Pensado para los adaptadores de almacenamiento.
  pub fn from_stored(
    id: SongId,
    name: String,
    artist: Option<Artist>,
    song_genres: Vec<SongGenre>,
  ) -> Self {
    Song { id, name, artist, song_genres, pending_genres: Vec::new(), state: SongState::Persisted }
  }

  pub fn id(&self) -> SongId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn set_name(&mut self, name: impl Into<String>) {
    self.name = name.into();
  }

  pub fn state(&self) -> SongState {
    self.state
  }

  pub fn is_persisted(&self) -> bool {
    self.state == SongState::Persisted
  }

  pub fn artist(&self) -> Option<&Artist> {
    self.artist.as_ref()
  }

  pub fn artist_name(&self) -> Option<&str> {
    self.artist.as_ref().map(|a| a.name.as_str())
  }

  /// Reemplaza el artista actual.
  pub fn set_artist(&mut self, artist: Artist) {
    self.artist = Some(artist);
  }

  /// Busca o crea el artista `name` y lo asigna a la canción.
  ///
  /// La resolución puede insertar un artista nuevo; la canción en sí no se
  /// guarda hasta `save`.
  pub fn set_artist_name<R>(&mut self, repo: &R, name: &str) -> Result<(), CoreError>
  where
    R: CatalogRepository + ?Sized,
  {
    let artist = ArtistResolver::new(repo).resolve(name)?;
    self.set_artist(artist);
    Ok(())
  }

  /// Resuelve cada género de `csv` y lo vincula con [`Song::add_genre`], en orden.
  pub fn set_genre_names<R>(&mut self, repo: &R, csv: &str) -> Result<(), CoreError>
  where
    R: CatalogRepository + ?Sized,
  {
    for genre in GenreResolver::new(repo).resolve_all(csv)? {
      self.add_genre(genre);
    }
    Ok(())
  }

  /// Añade un vínculo pendiente hacia `genre`.
  ///
  /// No comprueba duplicados: dos llamadas con el mismo género dejan dos filas.
  pub fn add_genre(&mut self, genre: Genre) -> &SongGenre {
    let idx = self.pending_genres.len();
    self.pending_genres.push(SongGenre { id: SongGenreId::new(), song_id: self.id, genre });
    &self.pending_genres[idx]
  }

  /// Vínculos ya guardados seguidos de los pendientes.
  pub fn song_genres(&self) -> impl Iterator<Item = &SongGenre> {
    self.song_genres.iter().chain(self.pending_genres.iter())
  }

  pub fn pending_genres(&self) -> &[SongGenre] {
    &self.pending_genres
  }

  pub fn genres(&self) -> impl Iterator<Item = &Genre> {
    self.song_genres().map(|link| &link.genre)
  }

  /// Nombres de género unidos con `", "`, el formato que acepta `set_genre_names`.
  pub fn genre_names(&self) -> String {
    self.genres().map(|g| g.name.as_str()).collect::<Vec<_>>().join(", ")
  }

  /// Guarda la canción y vuelca sus vínculos pendientes en una sola unidad de trabajo.
  ///
  /// Si el almacén falla, los vínculos siguen pendientes y el estado no cambia.
  pub fn save<R>(&mut self, repo: &R) -> Result<(), CoreError>
  where
    R: CatalogRepository + ?Sized,
  {
    repo.save_song(self)?;

    tracing::debug!(
      song_id = %self.id,
      flushed = self.pending_genres.len(),
      "song saved"
    );

    self.song_genres.append(&mut self.pending_genres);
    self.state = SongState::Persisted;
    Ok(())
  }
}
