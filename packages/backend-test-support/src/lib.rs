//! Shared helpers for backend tests: one-time logging setup and unique
//! identities for tokens and appointment rows.

pub mod logging;
pub mod unique_helpers;
