//! sea-orm adapters translating between table rows and domain records.

pub mod appointments_sea;
