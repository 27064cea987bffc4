pub mod models;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use util::config;

/// Connects to the configured database.
///
/// `DATABASE_PATH` may be a full `sqlite:` URL or a plain file path; for a path the
/// file is opened in read-write-create mode.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    connect_to(&config::database_path()).await
}

/// Connects to `path_or_url`, creating the parent directory of a file database.
pub async fn connect_to(path_or_url: &str) -> Result<DatabaseConnection, DbErr> {
    if let Some(parent) = config::sqlite_file(path_or_url).as_deref().and_then(|f| f.parent()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!(dir = %parent.display(), error = %e, "Could not create database directory");
        }
    }
    let url = config::sqlite_url(path_or_url);
    tracing::info!(url = %url, "Connecting to database");
    Database::connect(&url).await
}
