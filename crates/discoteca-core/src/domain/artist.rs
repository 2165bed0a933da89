use crate::domain::ids::ArtistId;
use serde::{Deserialize, Serialize};

/// Representa a un artista dentro del catálogo.
///
/// Se identifica de cara al usuario por su `name` exacto (sensible a
/// mayúsculas, byte a byte). Se crea implícitamente la primera vez que una
/// canción menciona un nombre desconocido y el núcleo nunca lo modifica.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artist {
  pub id: ArtistId,
  pub name: String,
}

impl Artist {
  pub fn new(name: impl Into<String>) -> Self {
    Artist { id: ArtistId::new(), name: name.into() }
  }
}
