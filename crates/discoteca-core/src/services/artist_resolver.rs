use crate::domain::artist::Artist;
use crate::ports::{CatalogRepository, RepoError};

/// Resuelve un nombre de artista contra el almacén.
pub struct ArtistResolver<'r, R: ?Sized> {
  repo: &'r R,
}

impl<'r, R> ArtistResolver<'r, R>
where
  R: CatalogRepository + ?Sized,
{
  pub fn new(repo: &'r R) -> Self {
    Self { repo }
  }

  /// Devuelve el artista cuyo nombre coincide exactamente con `name`, creándolo si no existe.
  ///
  /// No valida la entrada: la cadena vacía es un nombre válido. Los errores
  /// del almacén se propagan sin reintentos.
  pub fn resolve(&self, name: &str) -> Result<Artist, RepoError> {
    let artist = self.repo.find_or_create_artist(name)?;
    tracing::trace!(artist_id = %artist.id, name, "artist resolved");
    Ok(artist)
  }
}
