use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

use crate::error::AppError;

/// Open a connection pool. Does NOT run migrations.
///
/// In-memory SQLite is pinned to one long-lived connection; every pooled
/// connection would otherwise see its own empty database.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(database_url.to_string());
    opts.sqlx_logging(false);
    if database_url.starts_with("sqlite::memory:") {
        opts.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(opts).await?;
    tracing::debug!(backend = ?conn.get_database_backend(), "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}
