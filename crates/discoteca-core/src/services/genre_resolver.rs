use crate::domain::genre::{Genre, split_genre_names};
use crate::ports::{CatalogRepository, RepoError};

/// Resuelve listas de géneros separadas por comas.
pub struct GenreResolver<'r, R: ?Sized> {
  repo: &'r R,
}

impl<'r, R> GenreResolver<'r, R>
where
  R: CatalogRepository + ?Sized,
{
  pub fn new(repo: &'r R) -> Self {
    Self { repo }
  }

  /// Un género por token no vacío de `csv`, en el orden de entrada.
  ///
  /// Cada token se busca o crea por nombre exacto. Los tokens repetidos
  /// devuelven la misma entidad cada vez y se mantienen en la salida.
  /// Si el almacén falla en un token, los géneros ya creados se quedan.
  pub fn resolve_all(&self, csv: &str) -> Result<Vec<Genre>, RepoError> {
    let genres = split_genre_names(csv)
      .map(|name| self.repo.find_or_create_genre(name))
      .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!(count = genres.len(), "genres resolved");
    Ok(genres)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{FailingRepository, GenreOutageAt, InMemoryCatalog};

  fn names(genres: &[Genre]) -> Vec<&str> {
    genres.iter().map(|g| g.name.as_str()).collect()
  }

  #[test]
  fn two_tokens_in_order_and_trimmed() {
    let repo = InMemoryCatalog::default();

    let genres = GenreResolver::new(&repo).resolve_all("a, b").unwrap();

    assert_eq!(names(&genres), vec!["a", "b"]);
  }

  #[test]
  fn reuses_existing_and_creates_only_missing() {
    let repo = InMemoryCatalog::default();
    let pop = repo.find_or_create_genre("pop").unwrap();
    assert_eq!(repo.genre_count(), 1);

    let genres = GenreResolver::new(&repo).resolve_all("pop, rock").unwrap();

    assert_eq!(genres[0].id, pop.id);
    assert_eq!(genres[1].name, "rock");
    assert_eq!(repo.genre_count(), 2);
  }

  #[test]
  fn re_resolving_never_grows_the_store() {
    let repo = InMemoryCatalog::default();
    let resolver = GenreResolver::new(&repo);

    resolver.resolve_all("house, techno").unwrap();
    resolver.resolve_all("techno,house").unwrap();

    assert_eq!(repo.genre_count(), 2);
  }

  #[test]
  fn duplicates_map_to_the_same_entity() {
    let repo = InMemoryCatalog::default();

    let genres = GenreResolver::new(&repo).resolve_all("jazz, jazz").unwrap();

    assert_eq!(genres.len(), 2);
    assert_eq!(genres[0].id, genres[1].id);
  }

  #[test]
  fn no_commas_and_blank_input() {
    let repo = InMemoryCatalog::default();
    let resolver = GenreResolver::new(&repo);

    assert_eq!(names(&resolver.resolve_all("soul").unwrap()), vec!["soul"]);
    assert!(resolver.resolve_all("").unwrap().is_empty());
    assert!(resolver.resolve_all("  ,  ").unwrap().is_empty());
    assert_eq!(repo.genre_count(), 1);
  }

  #[test]
  fn blank_input_does_not_touch_the_store() {
    assert!(GenreResolver::new(&FailingRepository).resolve_all(" ").unwrap().is_empty());
  }

  #[test]
  fn store_failure_propagates() {
    assert!(GenreResolver::new(&FailingRepository).resolve_all("pop").is_err());
  }

  #[test]
  fn failure_midway_stops_and_keeps_earlier_genres() {
    let repo = GenreOutageAt::new(2);

    let err = GenreResolver::new(&repo).resolve_all("a, b, c").unwrap_err();

    assert!(matches!(err, RepoError::Unavailable(_)));
    assert!(repo.inner.find_genre_by_name("a").unwrap().is_some());
    assert!(repo.inner.find_genre_by_name("b").unwrap().is_none());
    assert!(repo.inner.find_genre_by_name("c").unwrap().is_none());
    assert_eq!(repo.inner.genre_count(), 1);
  }
}
