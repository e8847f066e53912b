//! PII-safe logging helpers.

pub mod pii;
pub mod security;
