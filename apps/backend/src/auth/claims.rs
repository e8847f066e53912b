//! Claim set carried inside every access token.

use serde::{Deserialize, Serialize};

/// Wire claims: `{"sub", "role", "iat", "exp"}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Email of the authenticated user
    pub sub: String,
    /// Always set on issuance; optional here so a verified token without it
    /// can be reported as a missing claim instead of a parse failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl TokenClaims {
    /// Strictly-before comparison: a token whose `exp` equals `now` is expired.
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.exp <= now_secs
    }
}

#[cfg(test)]
mod tests {
    use super::TokenClaims;

    fn claims(iat: i64, exp: i64) -> TokenClaims {
        TokenClaims {
            sub: "alice@example.com".into(),
            role: Some("PATIENT".into()),
            iat,
            exp,
        }
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let c = claims(100, 200);
        assert!(!c.is_expired_at(199));
        assert!(c.is_expired_at(200));
        assert!(c.is_expired_at(201));
    }

    #[test]
    fn serialized_payload_uses_short_claim_names() {
        let value = serde_json::to_value(claims(1, 3601)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "sub": "alice@example.com",
                "role": "PATIENT",
                "iat": 1,
                "exp": 3601
            })
        );
    }

    #[test]
    fn role_may_be_absent_when_decoding() {
        let c: TokenClaims =
            serde_json::from_str(r#"{"sub":"a@b.c","iat":1,"exp":2}"#).unwrap();
        assert_eq!(c.role, None);
    }
}
