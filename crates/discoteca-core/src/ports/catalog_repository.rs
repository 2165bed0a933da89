use crate::domain::SongId;
use crate::domain::{artist::Artist, genre::Genre, song::Song};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("entity not found")]
  NotFound,
  /// No se pudo obtener una conexión (archivo bloqueado, pool agotado...).
  #[error("storage unavailable: {0}")]
  Unavailable(String),
  /// Fallo de consulta o de restricción en el almacén.
  #[error("storage error: {0}")]
  Storage(String),
  /// Datos persistidos que no se pueden reconstruir como entidades de dominio.
  #[error("corrupt stored data: {0}")]
  Corrupt(String),
}

/// Puerto de persistencia del catálogo.
///
/// Los `find_or_create_*` deben ser una única operación atómica de
/// búsqueda-o-inserción por nombre exacto: dos llamadas con el mismo nombre
/// nunca dejan dos filas.
pub trait CatalogRepository {
  fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>, RepoError>;
  fn insert_artist(&self, artist: &Artist) -> Result<(), RepoError>;
  fn find_or_create_artist(&self, name: &str) -> Result<Artist, RepoError>;

  fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, RepoError>;
  fn insert_genre(&self, genre: &Genre) -> Result<(), RepoError>;
  fn find_or_create_genre(&self, name: &str) -> Result<Genre, RepoError>;

  /// Inserta o actualiza la fila de la canción y añade sus vínculos
  /// pendientes, todo como una sola unidad de trabajo.
  fn save_song(&self, song: &Song) -> Result<(), RepoError>;

  /// Recarga la canción con su artista y sus vínculos en orden de creación.
  fn find_song(&self, id: SongId) -> Result<Option<Song>, RepoError>;

  fn list_artists(&self) -> Result<Vec<Artist>, RepoError>;
  fn list_genres(&self) -> Result<Vec<Genre>, RepoError>;
  fn list_songs(&self) -> Result<Vec<Song>, RepoError>;
}

impl<R: CatalogRepository + ?Sized> CatalogRepository for &R {
  fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>, RepoError> {
    (**self).find_artist_by_name(name)
  }

  fn insert_artist(&self, artist: &Artist) -> Result<(), RepoError> {
    (**self).insert_artist(artist)
  }

  fn find_or_create_artist(&self, name: &str) -> Result<Artist, RepoError> {
    (**self).find_or_create_artist(name)
  }

  fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, RepoError> {
    (**self).find_genre_by_name(name)
  }

  fn insert_genre(&self, genre: &Genre) -> Result<(), RepoError> {
    (**self).insert_genre(genre)
  }

  fn find_or_create_genre(&self, name: &str) -> Result<Genre, RepoError> {
    (**self).find_or_create_genre(name)
  }

  fn save_song(&self, song: &Song) -> Result<(), RepoError> {
    (**self).save_song(song)
  }

  fn find_song(&self, id: SongId) -> Result<Option<Song>, RepoError> {
    (**self).find_song(id)
  }

  fn list_artists(&self) -> Result<Vec<Artist>, RepoError> {
    (**self).list_artists()
  }

  fn list_genres(&self) -> Result<Vec<Genre>, RepoError> {
    (**self).list_genres()
  }

  fn list_songs(&self) -> Result<Vec<Song>, RepoError> {
    (**self).list_songs()
  }
}
