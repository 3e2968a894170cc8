//! Domain types for the vaccination registry.

pub mod person;
pub mod vaccination;

pub use person::Person;
pub use vaccination::{VaccinationRecord, VaccineType};
