//! Plain domain records, free of persistence attributes.

pub mod appointment;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
