use thiserror::Error;

/// Failures surfaced by the token authority.
///
/// Expiry is deliberately absent: an expired token is a `false` from
/// `is_valid`, never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature did not verify, or the token could not be parsed.
    #[error("invalid token ({reason})")]
    InvalidToken { reason: &'static str },
    /// A verified token lacks a claim this authority always sets.
    #[error("token is missing the `{claim}` claim")]
    MissingClaim { claim: &'static str },
    /// Issuance was asked to sign an empty subject or role.
    #[error("refusing to issue a token with an empty `{claim}` claim")]
    EmptyClaim { claim: &'static str },
    /// Clock outside the representable range, or the encoder failed.
    #[error("failed to issue token: {detail}")]
    Issue { detail: String },
}

impl TokenError {
    pub fn invalid(reason: &'static str) -> Self {
        TokenError::InvalidToken { reason }
    }

    /// Reason tag for `InvalidToken`, `None` for every other variant.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            TokenError::InvalidToken { reason } => Some(reason),
            _ => None,
        }
    }
}
