use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use super::claims::TokenClaims;
use super::error::TokenError;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::state::security_config::SecurityConfig;

/// Lifetime of every issued access token (1 hour).
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Issues and verifies HS256 access tokens carrying an email subject and a
/// role claim.
///
/// Keys are derived once in [`TokenAuthority::new`]; afterwards the authority
/// is immutable and can be shared across threads freely.
#[derive(Clone)]
pub struct TokenAuthority {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl TokenAuthority {
    pub fn new(security: &SecurityConfig) -> Self {
        // Signature and structure only; expiry is checked by `is_valid_at`
        // so that claims of an expired token stay readable.
        let mut validation = Validation::new(security.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            algorithm: security.algorithm,
            encoding_key: EncodingKey::from_secret(&security.jwt_secret),
            decoding_key: DecodingKey::from_secret(&security.jwt_secret),
            validation,
        }
    }

    /// Mint a token for `subject`/`role`, issued now.
    pub fn issue(&self, subject: &str, role: &str) -> Result<String, TokenError> {
        self.issue_at(subject, role, SystemTime::now())
    }

    /// Mint a token as if issued at `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        role: &str,
        now: SystemTime,
    ) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::EmptyClaim { claim: "sub" });
        }
        if role.is_empty() {
            return Err(TokenError::EmptyClaim { claim: "role" });
        }

        let iat = issued_at_seconds(now)?;
        let exp = iat.checked_add(TOKEN_TTL_SECS).ok_or_else(|| TokenError::Issue {
            detail: format!("expiry overflows for issued-at {iat}"),
        })?;
        let claims = TokenClaims {
            sub: subject.to_string(),
            role: Some(role.to_string()),
            iat,
            exp,
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issue {
                detail: format!("failed to encode JWT: {e}"),
            })?;

        debug!(
            subject = %Redacted(subject),
            role,
            exp = claims.exp,
            "issued access token"
        );
        Ok(token)
    }

    /// Verify signature and structure and return the full claim set.
    ///
    /// Expiry is not enforced here.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let err = map_decode_error(e.kind());
                match err.reason() {
                    Some(reason @ ("invalid_signature" | "invalid_algorithm")) => {
                        security::token_rejected(reason)
                    }
                    reason => debug!(reason, "malformed access token"),
                }
                err
            })
    }

    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token).map(|claims| claims.sub)
    }

    pub fn extract_role(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token)?
            .role
            .ok_or(TokenError::MissingClaim { claim: "role" })
    }

    /// `Ok(true)` only if the token belongs to `expected_subject` and has not
    /// expired. Tampered or malformed tokens are an `Err`, not `false`.
    pub fn is_valid(&self, token: &str, expected_subject: &str) -> Result<bool, TokenError> {
        self.is_valid_at(token, expected_subject, SystemTime::now())
    }

    pub fn is_valid_at(
        &self,
        token: &str,
        expected_subject: &str,
        now: SystemTime,
    ) -> Result<bool, TokenError> {
        let claims = self.decode(token)?;

        if claims.sub != expected_subject {
            debug!(
                subject = %Redacted(&claims.sub),
                expected = %Redacted(expected_subject),
                "token subject mismatch"
            );
            return Ok(false);
        }

        if claims.is_expired_at(signed_unix_seconds(now)) {
            debug!(subject = %Redacted(&claims.sub), exp = claims.exp, "token expired");
            return Ok(false);
        }

        Ok(true)
    }
}

/// Issuance refuses clocks it cannot represent as a positive `iat`.
fn issued_at_seconds(at: SystemTime) -> Result<i64, TokenError> {
    let since_epoch = at.duration_since(UNIX_EPOCH).map_err(|_| TokenError::Issue {
        detail: "system clock is before the unix epoch".to_string(),
    })?;
    i64::try_from(since_epoch.as_secs()).map_err(|_| TokenError::Issue {
        detail: "system clock is beyond the representable range".to_string(),
    })
}

/// Check-time seconds, saturating at the `i64` range so validity stays a
/// plain boolean for any clock value.
fn signed_unix_seconds(at: SystemTime) -> i64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_secs())
            .map(|secs| -secs)
            .unwrap_or(i64::MIN),
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    let reason = match kind {
        ErrorKind::InvalidSignature => "invalid_signature",
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => "invalid_algorithm",
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => "malformed_token",
        _ => "invalid_token",
    };
    TokenError::invalid(reason)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde_json::json;

    use super::{TokenAuthority, TOKEN_TTL_SECS};
    use crate::auth::error::TokenError;
    use crate::state::security_config::SecurityConfig;

    const SECRET_A: &str = "test_secret_key_for_testing_purposes_only_A";
    const SECRET_B: &str = "test_secret_key_for_testing_purposes_only_B";

    fn authority(secret: &str) -> TokenAuthority {
        TokenAuthority::new(&SecurityConfig::new(secret.as_bytes()).unwrap())
    }

    #[test]
    fn test_issue_and_decode_roundtrip() {
        let auth = authority(SECRET_A);
        let now = SystemTime::now();

        let token = auth.issue_at("test@example.com", "PROVIDER", now).unwrap();
        let claims = auth.decode(&token).unwrap();

        assert_eq!(claims.sub, "test@example.com");
        assert_eq!(claims.role.as_deref(), Some("PROVIDER"));
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS);
    }

    #[test]
    fn test_expired_token_is_readable_but_not_valid() {
        let auth = authority(SECRET_A);
        // 2 hours ago so the 1-hour token is expired
        let issued = SystemTime::now() - Duration::from_secs(2 * 60 * 60);

        let token = auth.issue_at("old@example.com", "PATIENT", issued).unwrap();

        assert_eq!(auth.extract_subject(&token).unwrap(), "old@example.com");
        assert_eq!(auth.extract_role(&token).unwrap(), "PATIENT");
        assert!(!auth.is_valid(&token, "old@example.com").unwrap());
    }

    #[test]
    fn test_expiry_instant_itself_is_invalid() {
        let auth = authority(SECRET_A);
        let issued = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let token = auth.issue_at("edge@example.com", "PATIENT", issued).unwrap();

        let just_before = issued + Duration::from_secs(TOKEN_TTL_SECS as u64 - 1);
        let at_expiry = issued + Duration::from_secs(TOKEN_TTL_SECS as u64);

        assert!(auth
            .is_valid_at(&token, "edge@example.com", just_before)
            .unwrap());
        assert!(!auth
            .is_valid_at(&token, "edge@example.com", at_expiry)
            .unwrap());
    }

    #[test]
    fn test_bad_signature() {
        let token = authority(SECRET_A)
            .issue("test@example.com", "PATIENT")
            .unwrap();

        let err = authority(SECRET_B).extract_subject(&token).unwrap_err();
        assert_eq!(err, TokenError::invalid("invalid_signature"));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let auth = authority(SECRET_A);
        let err = auth.extract_role("not-a-jwt").unwrap_err();
        assert_eq!(err, TokenError::invalid("malformed_token"));
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &json!({ "sub": "a@example.com", "role": "ADMIN", "iat": 1, "exp": i64::MAX }),
            &EncodingKey::from_secret(SECRET_A.as_bytes()),
        )
        .unwrap();

        let err = authority(SECRET_A).decode(&token).unwrap_err();
        assert_eq!(err, TokenError::invalid("invalid_algorithm"));
    }

    #[test]
    fn test_missing_role_claim() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": "a@example.com", "iat": 1, "exp": 2 }),
            &EncodingKey::from_secret(SECRET_A.as_bytes()),
        )
        .unwrap();

        let auth = authority(SECRET_A);
        assert_eq!(auth.extract_subject(&token).unwrap(), "a@example.com");
        assert_eq!(
            auth.extract_role(&token).unwrap_err(),
            TokenError::MissingClaim { claim: "role" }
        );
    }

    #[test]
    fn test_missing_exp_is_malformed() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": "a@example.com", "role": "PATIENT", "iat": 1 }),
            &EncodingKey::from_secret(SECRET_A.as_bytes()),
        )
        .unwrap();

        let err = authority(SECRET_A).extract_subject(&token).unwrap_err();
        assert!(matches!(err, TokenError::InvalidToken { .. }));
    }

    #[test]
    fn test_empty_inputs_are_refused() {
        let auth = authority(SECRET_A);
        assert_eq!(
            auth.issue("", "PATIENT").unwrap_err(),
            TokenError::EmptyClaim { claim: "sub" }
        );
        assert_eq!(
            auth.issue("a@example.com", "").unwrap_err(),
            TokenError::EmptyClaim { claim: "role" }
        );
    }

    #[test]
    fn test_debug_does_not_leak_key_material() {
        let rendered = format!("{:?}", authority(SECRET_A));
        assert!(rendered.contains("HS256"));
        assert!(!rendered.contains(SECRET_A));
    }

    #[test]
    fn test_issue_near_end_of_time_is_refused() {
        let auth = authority(SECRET_A);
        let far_future = UNIX_EPOCH + Duration::from_secs(i64::MAX as u64);

        let err = auth
            .issue_at("late@example.com", "PATIENT", far_future)
            .unwrap_err();
        assert!(matches!(err, TokenError::Issue { .. }), "{err:?}");
    }

    #[test]
    fn test_issue_before_epoch_is_refused() {
        let auth = authority(SECRET_A);
        let before_epoch = UNIX_EPOCH - Duration::from_secs(60);

        let err = auth
            .issue_at("early@example.com", "PATIENT", before_epoch)
            .unwrap_err();
        assert!(matches!(err, TokenError::Issue { .. }), "{err:?}");
    }

    #[test]
    fn test_validity_is_boolean_for_any_check_time() {
        let auth = authority(SECRET_A);
        let token = auth.issue("clock@example.com", "PATIENT").unwrap();

        let before_epoch = UNIX_EPOCH - Duration::from_secs(60);
        assert!(auth
            .is_valid_at(&token, "clock@example.com", before_epoch)
            .unwrap());

        let far_future = UNIX_EPOCH + Duration::from_secs(i64::MAX as u64);
        assert!(!auth
            .is_valid_at(&token, "clock@example.com", far_future)
            .unwrap());
    }
}
