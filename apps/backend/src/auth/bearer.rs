/// Pull the token out of an `Authorization: Bearer <token>` header value.
///
/// The scheme is case-sensitive and exactly one token must follow it.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}
