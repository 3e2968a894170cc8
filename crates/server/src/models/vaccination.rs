//! Vaccination record domain type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use vaxtrack_core::{PersonId, VaccinationId};

/// The closed set of recognized vaccine types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VaccineType {
    Sputnik,
    Astrazeneca,
    Pfizer,
    Johnson,
}

/// A single vaccination record (domain type).
///
/// A record always belongs to exactly one person; the owner is resolved
/// through the store's ownership index and carried here for convenience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccinationRecord {
    /// Unique record ID, assigned by the store.
    pub id: VaccinationId,
    /// Which vaccine was administered.
    pub vaccine_type: VaccineType,
    /// When the dose was administered.
    pub vaccination_date: NaiveDate,
    /// Number of doses received, always >= 1.
    pub doses: u32,
    /// Owning person.
    pub person_id: PersonId,
}
