use thiserror::Error;

use crate::auth::error::TokenError;
use crate::errors::domain::DomainError;

/// Crate-level error. Token failures keep their own taxonomy inside
/// `AppError::Token` so callers can still match on it.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Database error: {detail}")]
    Db { detail: String },
}

impl AppError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Token(TokenError::InvalidToken { .. }) => "UNAUTHORIZED_INVALID_JWT",
            AppError::Token(TokenError::MissingClaim { .. }) => "UNAUTHORIZED_MISSING_CLAIM",
            AppError::Token(TokenError::EmptyClaim { .. }) => "INVALID_TOKEN_REQUEST",
            AppError::Token(TokenError::Issue { .. }) => "INTERNAL",
            AppError::Domain(DomainError::Validation(_)) => "VALIDATION_ERROR",
            AppError::Domain(DomainError::NotFound(..)) => "NOT_FOUND",
            AppError::Db { .. } => "DB_ERROR",
        }
    }

    /// True for failures an API layer should turn into an auth rejection.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            AppError::Token(TokenError::InvalidToken { .. } | TokenError::MissingClaim { .. })
        )
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn db(detail: String) -> Self {
        Self::Db { detail }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(e.to_string())
    }
}
