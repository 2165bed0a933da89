use discoteca_config::{ConfigBackend, ConfigError, TomlConfigBackend};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SECTION: &str = "storage";
const DB_FILE: &str = "discoteca.db";

/// Sección `[storage]` de `discoteca.toml`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
  /// Ruta del archivo SQLite.
  pub db_path: PathBuf,

  /// `PRAGMA journal_mode` aplicado a cada conexión (`WAL`, `DELETE`...).
  pub journal_mode: Option<String>,

  /// Conexiones máximas del pool.
  pub pool_size: u32,

  /// `PRAGMA busy_timeout` en milisegundos.
  pub busy_timeout_ms: Option<u64>,
}

/// La sección tal como está en disco: cualquier clave puede faltar.
#[derive(Debug, Default, Deserialize)]
struct StorageSection {
  db_path: Option<PathBuf>,
  journal_mode: Option<String>,
  pool_size: Option<u32>,
  busy_timeout_ms: Option<u64>,
}

impl StorageSection {
  fn resolve(self, data_dir: &Path) -> StorageConfig {
    let defaults = StorageConfig::at(data_dir.join(DB_FILE));
    StorageConfig {
      db_path: self.db_path.unwrap_or(defaults.db_path),
      journal_mode: self.journal_mode.or(defaults.journal_mode),
      pool_size: self.pool_size.unwrap_or(defaults.pool_size),
      busy_timeout_ms: self.busy_timeout_ms.or(defaults.busy_timeout_ms),
    }
  }
}

impl StorageConfig {
  /// Valores por defecto apuntando a una base de datos concreta.
  pub fn at(db_path: impl AsRef<Path>) -> Self {
    StorageConfig {
      db_path: db_path.as_ref().to_path_buf(),
      journal_mode: Some("WAL".to_string()),
      pool_size: 4,
      busy_timeout_ms: Some(5_000),
    }
  }

  /// Carga `[storage]` de `backend` y la escribe de vuelta con los valores por defecto completados.
  ///
  /// Las claves ausentes se completan relativas al `data_dir` de ese backend.
  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let section: StorageSection = backend.load_section_with_default(SECTION)?;
    let cfg = section.resolve(&backend.paths().data_dir);
    backend.save_section(SECTION, &cfg)?;
    Ok(cfg)
  }

  pub fn save_to<B: ConfigBackend>(&self, backend: &B) -> Result<(), ConfigError> {
    backend.save_section(SECTION, self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use discoteca_config::DiscotecaPaths;
  use tempfile::tempdir;

  #[test]
  fn partial_section_is_completed_and_written_back() {
    let tmp = tempdir().unwrap();
    let paths = DiscotecaPaths::at(tmp.path()).unwrap();
    let db_path = tmp.path().join("music.db");
    std::fs::write(
      paths.config_file(),
      format!("[storage]\ndb_path = {:?}\npool_size = 2\n", db_path.to_str().unwrap()),
    )
    .unwrap();
    let backend = TomlConfigBackend::new(paths);

    let cfg = StorageConfig::load_from(&backend).unwrap();

    assert_eq!(cfg.db_path, db_path);
    assert_eq!(cfg.pool_size, 2);
    assert_eq!(cfg.journal_mode.as_deref(), Some("WAL"));
    assert_eq!(cfg.busy_timeout_ms, Some(5_000));

    let written = std::fs::read_to_string(backend.paths().config_file()).unwrap();
    assert!(written.contains("journal_mode = \"WAL\""));
  }

  #[test]
  fn missing_file_defaults_to_backend_data_dir() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(DiscotecaPaths::at(tmp.path()).unwrap());

    let cfg = StorageConfig::load_from(&backend).unwrap();

    assert_eq!(cfg, StorageConfig::at(tmp.path().join("data").join("discoteca.db")));
    assert!(backend.paths().config_file().exists());
  }

  #[test]
  fn save_to_round_trips_through_backend() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(DiscotecaPaths::at(tmp.path()).unwrap());
    let mut cfg = StorageConfig::at(tmp.path().join("a.db"));
    cfg.journal_mode = Some("DELETE".into());

    cfg.save_to(&backend).unwrap();

    let loaded: StorageConfig = backend.load_section(SECTION).unwrap();
    assert_eq!(loaded, cfg);
  }
}
