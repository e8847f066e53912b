//! sea-orm table mappings. Persistence attributes live only here.

pub mod appointments;
