use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

/// Error producido cuando una cadena no es un UUID válido para un identificador.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} id {input:?}")]
pub struct IdParseError {
  pub kind: &'static str,
  pub input: String,
}

/// Declara un identificador opaco respaldado por un UUID v4.
macro_rules! uuid_id {
  ($(#[$meta:meta])* $name:ident, $kind:literal) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct $name(Uuid);

    impl $name {
      /// Genera un nuevo identificador único.
      pub fn new() -> Self {
        $name(Uuid::new_v4())
      }

      pub fn from_uuid(u: Uuid) -> Self {
        $name(u)
      }
    }

    impl Default for $name {
      fn default() -> Self {
        Self::new()
      }
    }

    impl From<Uuid> for $name {
      fn from(u: Uuid) -> Self {
        $name(u)
      }
    }

    impl From<$name> for Uuid {
      fn from(id: $name) -> Self {
        id.0
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }

    impl FromStr for $name {
      type Err = IdParseError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
          .map($name)
          .map_err(|_| IdParseError { kind: $kind, input: s.to_string() })
      }
    }
  };
}

uuid_id!(
  /// Identificador de un [`Artist`](crate::domain::artist::Artist).
  ArtistId,
  "artist"
);

uuid_id!(
  /// Identificador de un [`Genre`](crate::domain::genre::Genre).
  GenreId,
  "genre"
);

uuid_id!(
  /// Identificador de una [`Song`](crate::domain::song::Song).
  SongId,
  "song"
);

uuid_id!(
  /// Identificador de una fila de unión canción-género.
  ///
  /// La misma pareja (song, genre) puede aparecer varias veces; este ID
  /// es lo único que distingue cada vínculo.
  SongGenreId,
  "song genre"
);
