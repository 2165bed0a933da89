use crate::domain::artist::Artist;
use crate::domain::genre::Genre;
use crate::domain::song::{NewSong, Song, SongEdit};
use crate::domain::SongId;
use crate::errors::CoreError;
use crate::ports::CatalogRepository;
use crate::services::{ArtistResolver, GenreResolver};

/// Casos de uso del catálogo sobre un repositorio concreto.
pub struct CatalogService<R>
where
  R: CatalogRepository,
{
  repo: R,
}

impl<R> CatalogService<R>
where
  R: CatalogRepository,
{
  pub fn new(repo: R) -> Self {
    Self { repo }
  }

  // -------- COMMAND (write) --------

  /// Crea y guarda una canción a partir de los campos de un formulario.
  ///
  /// Orden: nombre, artista (si viene), géneros (si vienen) y `save`.
  pub fn create_song(&self, form: NewSong) -> Result<Song, CoreError> {
    let mut song = Song::new(form.name);

    if let Some(artist_name) = form.artist_name.as_deref() {
      song.set_artist_name(&self.repo, artist_name)?;
    }

    if let Some(genre_names) = form.genre_names.as_deref() {
      song.set_genre_names(&self.repo, genre_names)?;
    }

    song.save(&self.repo)?;
    tracing::info!(song_id = %song.id(), name = song.name(), "song created");

    Ok(song)
  }

  /// Recarga la canción, aplica los cambios presentes en `edit` y la vuelve a guardar.
  pub fn edit_song(&self, id: SongId, edit: SongEdit) -> Result<Song, CoreError> {
    let mut song = self.show_song(id)?;

    if let Some(name) = edit.name {
      song.set_name(name);
    }

    if let Some(artist_name) = edit.artist_name.as_deref() {
      song.set_artist_name(&self.repo, artist_name)?;
    }

    if let Some(genre_names) = edit.genre_names.as_deref() {
      song.set_genre_names(&self.repo, genre_names)?;
    }

    song.save(&self.repo)?;
    tracing::info!(song_id = %song.id(), "song updated");

    Ok(song)
  }

  pub fn resolve_artist(&self, name: &str) -> Result<Artist, CoreError> {
    Ok(ArtistResolver::new(&self.repo).resolve(name)?)
  }

  pub fn resolve_genres(&self, csv: &str) -> Result<Vec<Genre>, CoreError> {
    Ok(GenreResolver::new(&self.repo).resolve_all(csv)?)
  }

  // -------- QUERY (read) --------

  pub fn get_song(&self, id: SongId) -> Result<Option<Song>, CoreError> {
    Ok(self.repo.find_song(id)?)
  }

  pub fn show_song(&self, id: SongId) -> Result<Song, CoreError> {
    self.get_song(id)?.ok_or(CoreError::SongNotFound(id))
  }

  pub fn list_songs(&self) -> Result<Vec<Song>, CoreError> {
    Ok(self.repo.list_songs()?)
  }

  pub fn list_artists(&self) -> Result<Vec<Artist>, CoreError> {
    Ok(self.repo.list_artists()?)
  }

  pub fn list_genres(&self) -> Result<Vec<Genre>, CoreError> {
    Ok(self.repo.list_genres()?)
  }
}
