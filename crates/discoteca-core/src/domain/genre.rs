use std::fmt;

use crate::domain::ids::GenreId;
use serde::{Deserialize, Serialize};

/// Género musical de texto libre.
///
/// A diferencia de una taxonomía cerrada, cualquier nombre que escriba el
/// usuario es válido; la identidad del género es su nombre exacto.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
  pub id: GenreId,
  pub name: String,
}

impl Genre {
  pub fn new(name: impl Into<String>) -> Self {
    Genre { id: GenreId::new(), name: name.into() }
  }
}

impl fmt::Display for Genre {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name)
  }
}

/// Separa una lista de géneros escrita como `"pop, rock,  jazz"`.
///
/// Corta por `,`, recorta espacios en cada token y descarta los vacíos
/// (comas finales, entrada en blanco). No deduplica: `"pop, pop"` produce
/// dos tokens.
pub fn split_genre_names(csv: &str) -> impl Iterator<Item = &str> {
  csv.split(',').map(str::trim).filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn split(csv: &str) -> Vec<&str> {
    split_genre_names(csv).collect()
  }

  #[test]
  fn trims_and_keeps_order() {
    assert_eq!(split("pop, rock,  jazz"), vec!["pop", "rock", "jazz"]);
    assert_eq!(split("a, b"), vec!["a", "b"]);
  }

  #[test]
  fn single_token_without_commas() {
    assert_eq!(split("  shoegaze "), vec!["shoegaze"]);
  }

  #[test]
  fn blank_input_and_stray_commas_yield_nothing() {
    assert!(split("").is_empty());
    assert!(split("   ").is_empty());
    assert!(split(" , ,").is_empty());
    assert_eq!(split("pop,,rock,"), vec!["pop", "rock"]);
  }

  #[test]
  fn duplicates_are_preserved() {
    assert_eq!(split("pop, pop"), vec!["pop", "pop"]);
  }

  #[test]
  fn inner_whitespace_and_case_are_untouched() {
    assert_eq!(split("Hip Hop, hip hop"), vec!["Hip Hop", "hip hop"]);
  }
}
