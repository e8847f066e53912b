use tracing::warn;

/// Log a token that failed signature or algorithm checks.
///
/// Only the reason tag is recorded; the token itself never reaches the log.
pub fn token_rejected(reason: &str) {
    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        reason,
        "Access token rejected"
    );
}
