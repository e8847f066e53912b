//! Access-token issuance and verification.

pub mod bearer;
pub mod claims;
pub mod error;
pub mod jwt;

use once_cell::sync::OnceCell;

pub use bearer::bearer_token;
pub use claims::TokenClaims;
pub use error::TokenError;
pub use jwt::{TokenAuthority, TOKEN_TTL_SECS};

use crate::state::security_config::SecurityConfig;
use crate::AppError;

static SHARED_AUTHORITY: OnceCell<TokenAuthority> = OnceCell::new();

/// Process-wide authority, built from the environment on first use.
///
/// A configuration error is returned without being cached, so a later call
/// can still succeed once the secret is present.
pub fn shared_authority() -> Result<&'static TokenAuthority, AppError> {
    SHARED_AUTHORITY.get_or_try_init(|| {
        let security = SecurityConfig::from_env()?;
        tracing::info!(algorithm = ?security.algorithm, "token authority initialized");
        Ok(TokenAuthority::new(&security))
    })
}
