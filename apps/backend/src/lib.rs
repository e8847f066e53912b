#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod logging;
pub mod state;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::{bearer_token, shared_authority, TokenAuthority, TokenClaims, TokenError};
pub use config::db::{db_url, DbProfile};
pub use domain::{Appointment, AppointmentStatus, NewAppointment};
pub use error::AppError;
pub use errors::DomainError;
pub use infra::db::{connect_and_migrate, connect_db};
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
