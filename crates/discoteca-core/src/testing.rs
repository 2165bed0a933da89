//! Dobles de prueba del puerto de persistencia.

use std::cell::{Cell, RefCell};

use crate::domain::{Artist, Genre, Song, SongGenre, SongId};
use crate::ports::{CatalogRepository, RepoError};

struct StoredSong {
  id: SongId,
  name: String,
  artist: Option<Artist>,
}

#[derive(Default)]
struct State {
  artists: Vec<Artist>,
  genres: Vec<Genre>,
  songs: Vec<StoredSong>,
  links: Vec<SongGenre>,
}

/// Almacén en memoria con las mismas garantías de nombre único que el adaptador SQLite.
#[derive(Default)]
pub struct InMemoryCatalog {
  state: RefCell<State>,
}

impl InMemoryCatalog {
  pub fn artist_count(&self) -> usize {
    self.state.borrow().artists.len()
  }

  pub fn genre_count(&self) -> usize {
    self.state.borrow().genres.len()
  }

  pub fn link_count(&self) -> usize {
    self.state.borrow().links.len()
  }
}

impl CatalogRepository for InMemoryCatalog {
  fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>, RepoError> {
    Ok(self.state.borrow().artists.iter().find(|a| a.name == name).cloned())
  }

  fn insert_artist(&self, artist: &Artist) -> Result<(), RepoError> {
    let mut state = self.state.borrow_mut();
    if state.artists.iter().any(|a| a.name == artist.name) {
      return Err(RepoError::Storage(format!("duplicate artist name {:?}", artist.name)));
    }
    state.artists.push(artist.clone());
    Ok(())
  }

  fn find_or_create_artist(&self, name: &str) -> Result<Artist, RepoError> {
    if let Some(found) = self.find_artist_by_name(name)? {
      return Ok(found);
    }
    let artist = Artist::new(name);
    self.insert_artist(&artist)?;
    Ok(artist)
  }

  fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, RepoError> {
    Ok(self.state.borrow().genres.iter().find(|g| g.name == name).cloned())
  }

  fn insert_genre(&self, genre: &Genre) -> Result<(), RepoError> {
    let mut state = self.state.borrow_mut();
    if state.genres.iter().any(|g| g.name == genre.name) {
      return Err(RepoError::Storage(format!("duplicate genre name {:?}", genre.name)));
    }
    state.genres.push(genre.clone());
    Ok(())
  }

  fn find_or_create_genre(&self, name: &str) -> Result<Genre, RepoError> {
    if let Some(found) = self.find_genre_by_name(name)? {
      return Ok(found);
    }
    let genre = Genre::new(name);
    self.insert_genre(&genre)?;
    Ok(genre)
  }

  fn save_song(&self, song: &Song) -> Result<(), RepoError> {
    let mut state = self.state.borrow_mut();
    let row = StoredSong {
      id: song.id(),
      name: song.name().to_owned(),
      artist: song.artist().cloned(),
    };

    match state.songs.iter_mut().find(|s| s.id == song.id()) {
      Some(existing) => *existing = row,
      None => state.songs.push(row),
    }
    state.links.extend(song.pending_genres().iter().cloned());
    Ok(())
  }

  fn find_song(&self, id: SongId) -> Result<Option<Song>, RepoError> {
    let state = self.state.borrow();
    let Some(row) = state.songs.iter().find(|s| s.id == id) else {
      return Ok(None);
    };
    let links = state.links.iter().filter(|l| l.song_id == id).cloned().collect();

    Ok(Some(Song::from_stored(row.id, row.name.clone(), row.artist.clone(), links)))
  }

  fn list_artists(&self) -> Result<Vec<Artist>, RepoError> {
    Ok(self.state.borrow().artists.clone())
  }

  fn list_genres(&self) -> Result<Vec<Genre>, RepoError> {
    Ok(self.state.borrow().genres.clone())
  }

  fn list_songs(&self) -> Result<Vec<Song>, RepoError> {
    let ids: Vec<SongId> = self.state.borrow().songs.iter().map(|s| s.id).collect();
    ids.into_iter().filter_map(|id| self.find_song(id).transpose()).collect()
  }
}

/// Repositorio que siempre falla como si el almacén no estuviera disponible.
pub struct FailingRepository;

fn offline<T>() -> Result<T, RepoError> {
  Err(RepoError::Unavailable("store offline".into()))
}

impl CatalogRepository for FailingRepository {
  fn find_artist_by_name(&self, _name: &str) -> Result<Option<Artist>, RepoError> {
    offline()
  }

  fn insert_artist(&self, _artist: &Artist) -> Result<(), RepoError> {
    offline()
  }

  fn find_or_create_artist(&self, _name: &str) -> Result<Artist, RepoError> {
    offline()
  }

  fn find_genre_by_name(&self, _name: &str) -> Result<Option<Genre>, RepoError> {
    offline()
  }

  fn insert_genre(&self, _genre: &Genre) -> Result<(), RepoError> {
    offline()
  }

  fn find_or_create_genre(&self, _name: &str) -> Result<Genre, RepoError> {
    offline()
  }

  fn save_song(&self, _song: &Song) -> Result<(), RepoError> {
    offline()
  }

  fn find_song(&self, _id: SongId) -> Result<Option<Song>, RepoError> {
    offline()
  }

  fn list_artists(&self) -> Result<Vec<Artist>, RepoError> {
    offline()
  }

  fn list_genres(&self) -> Result<Vec<Genre>, RepoError> {
    offline()
  }

  fn list_songs(&self) -> Result<Vec<Song>, RepoError> {
    offline()
  }
}

/// Catálogo en memoria cuya llamada número `fail_on` (desde 1) a
/// `find_or_create_genre` falla; el resto se delega en `inner`.
pub struct GenreOutageAt {
  pub inner: InMemoryCatalog,
  fail_on: usize,
  genre_calls: Cell<usize>,
}

impl GenreOutageAt {
  pub fn new(fail_on: usize) -> Self {
    Self { inner: InMemoryCatalog::default(), fail_on, genre_calls: Cell::new(0) }
  }
}

impl CatalogRepository for GenreOutageAt {
  fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>, RepoError> {
    self.inner.find_artist_by_name(name)
  }

  fn insert_artist(&self, artist: &Artist) -> Result<(), RepoError> {
    self.inner.insert_artist(artist)
  }

  fn find_or_create_artist(&self, name: &str) -> Result<Artist, RepoError> {
    self.inner.find_or_create_artist(name)
  }

  fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, RepoError> {
    self.inner.find_genre_by_name(name)
  }

  fn insert_genre(&self, genre: &Genre) -> Result<(), RepoError> {
    self.inner.insert_genre(genre)
  }

  fn find_or_create_genre(&self, name: &str) -> Result<Genre, RepoError> {
    let call = self.genre_calls.get() + 1;
    self.genre_calls.set(call);
    if call == self.fail_on {
      return offline();
    }
    self.inner.find_or_create_genre(name)
  }

  fn save_song(&self, song: &Song) -> Result<(), RepoError> {
    self.inner.save_song(song)
  }

  fn find_song(&self, id: SongId) -> Result<Option<Song>, RepoError> {
    self.inner.find_song(id)
  }

  fn list_artists(&self) -> Result<Vec<Artist>, RepoError> {
    self.inner.list_artists()
  }

  fn list_genres(&self) -> Result<Vec<Genre>, RepoError> {
    self.inner.list_genres()
  }

  fn list_songs(&self) -> Result<Vec<Song>, RepoError> {
    self.inner.list_songs()
  }
}
