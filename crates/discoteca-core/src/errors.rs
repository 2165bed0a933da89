use thiserror::Error;

use crate::domain::SongId;
use crate::domain::ids::IdParseError;
use crate::ports::RepoError;

/// Error genérico del núcleo de Discoteca.
///
/// Las capas superiores (CLI, etc.) deberían mapear este error
/// a mensajes de usuario o logs.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("repository error: {0}")]
  Repository(#[from] RepoError),

  #[error("song {0} not found")]
  SongNotFound(SongId),

  #[error(transparent)]
  InvalidId(#[from] IdParseError),
}
