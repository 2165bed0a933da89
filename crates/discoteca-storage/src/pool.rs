use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use discoteca_core::ports::RepoError;

use crate::config::StorageConfig;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// PRAGMAs que se aplican a cada conexión nueva del pool.
#[derive(Debug, Clone)]
struct ConnectionOptions {
  journal_mode: Option<String>,
  busy_timeout: Option<Duration>,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    let mut pragmas = String::from("PRAGMA foreign_keys = ON;");

    if let Some(timeout) = self.busy_timeout {
      pragmas.push_str(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()));
    }
    if let Some(mode) = &self.journal_mode {
      pragmas.push_str(&format!("PRAGMA journal_mode = {mode};"));
    }

    conn.batch_execute(&pragmas).map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Abre (o crea) la base de datos de `cfg`, aplica las migraciones pendientes y devuelve el pool.
pub fn open_pool(cfg: &StorageConfig) -> Result<DbPool, RepoError> {
  if let Some(parent) = cfg.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .map_err(|e| RepoError::Unavailable(format!("create {}: {e}", parent.display())))?;
  }

  let database_url = cfg.db_path.to_string_lossy().into_owned();
  let options = ConnectionOptions {
    journal_mode: cfg.journal_mode.clone(),
    busy_timeout: cfg.busy_timeout_ms.map(Duration::from_millis),
  };

  let pool = Pool::builder()
    .max_size(cfg.pool_size.max(1))
    .connection_customizer(Box::new(options))
    .build(ConnectionManager::<SqliteConnection>::new(database_url))
    .map_err(|e| RepoError::Unavailable(e.to_string()))?;

  let mut conn = pool.get().map_err(|e| RepoError::Unavailable(e.to_string()))?;
  run_migrations(&mut conn)?;

  tracing::info!(path = %cfg.db_path.display(), pool_size = cfg.pool_size, "catalog database ready");
  Ok(pool)
}

fn run_migrations(conn: &mut DbConnection) -> Result<(), RepoError> {
  let applied = conn
    .run_pending_migrations(MIGRATIONS)
    .map_err(|e| RepoError::Storage(format!("migrations: {e}")))?;

  for version in applied {
    tracing::info!(%version, "applied migration");
  }
  Ok(())
}
