use std::env;

use crate::error::AppError;

/// Full connection string; takes precedence over the discrete variables.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Database profile for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    Prod,
    /// Enforces the `_test` database-name suffix
    Test,
}

/// Resolve the appointments database URL.
///
/// `DATABASE_URL` wins when set. Otherwise a Postgres URL is assembled from
/// `POSTGRES_HOST`, `POSTGRES_PORT`, `APP_DB_USER`, `APP_DB_PASSWORD` and
/// `PROD_DB`/`TEST_DB`.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    if let Ok(url) = env::var(DATABASE_URL_ENV) {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::config(format!("{DATABASE_URL_ENV} is set but empty")));
        }
        return Ok(url.to_string());
    }

    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = db_name(profile)?;
    let username = must_var("APP_DB_USER")?;
    let password = must_var("APP_DB_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn db_name(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("PROD_DB"),
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::config(format!("{name} must be set")))
}
