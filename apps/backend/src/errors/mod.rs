//! Domain-level errors shared by the appointment model and its adapters.

pub mod domain;

pub use domain::{DomainError, NotFoundKind};
