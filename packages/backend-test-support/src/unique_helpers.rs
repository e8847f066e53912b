//! ULID-based unique test data, so parallel tests never share a subject.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("role");
/// assert_ne!(a, unique_str("role"));
/// assert!(a.starts_with("role-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique patient/provider email under the reserved `example.test` domain.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("patient");
/// assert!(email.starts_with("patient-"));
/// assert!(email.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}

/// A unique positive id for external patient/provider references.
///
/// Derived from the ULID's random bits and masked to stay within `i64`.
pub fn unique_ref_id() -> i64 {
    let bits = Ulid::new().random() as u64 & (i64::MAX as u64);
    // zero is never a valid surrogate id
    bits.max(1) as i64
}
