use std::fmt;

use jsonwebtoken::Algorithm;

use crate::AppError;

/// Environment variable holding the shared HMAC secret.
pub const JWT_SECRET_ENV: &str = "BACKEND_JWT_SECRET";

/// HS256 needs a key at least as long as its 256-bit output.
pub const MIN_SECRET_LEN: usize = 32;

/// Signing configuration for access tokens.
#[derive(Clone)]
pub struct SecurityConfig {
    /// Shared secret used to sign and verify tokens
    pub jwt_secret: Vec<u8>,
    /// Always HS256 today; kept explicit so the authority pins it on decode
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    /// Build a config from raw secret bytes, rejecting secrets shorter than
    /// [`MIN_SECRET_LEN`].
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Result<Self, AppError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(AppError::config(format!(
                "{JWT_SECRET_ENV} must be at least {MIN_SECRET_LEN} bytes, got {}",
                jwt_secret.len()
            )));
        }

        Ok(Self {
            jwt_secret,
            algorithm: Algorithm::HS256,
        })
    }

    /// Read the secret from `BACKEND_JWT_SECRET`.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var(JWT_SECRET_ENV)
            .map_err(|e| AppError::config(format!("{JWT_SECRET_ENV}: {e}")))?;
        Self::new(secret.into_bytes())
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &format_args!("<{} bytes>", self.jwt_secret.len()))
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
