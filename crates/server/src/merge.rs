//! Field-by-field merge for partial updates (PATCH).
//!
//! A patch carries `Option<T>` for every mutable field: `None` means the
//! caller omitted the field and the stored value is kept. The entity id and
//! the owning-person reference are never touched by a merge; identifier
//! consistency is enforced by the handlers before merge runs.
//!
//! Known limitation, relied upon by callers: a merge cannot reset an optional
//! field back to "no value" (a JSON `null` deserializes to `None` and means
//! "leave untouched"). Only a full replace clears a field.

use chrono::NaiveDate;
use serde::Deserialize;

use vaxtrack_core::{AccountId, CellPhone, Identification, PersonId, VaccinationId};

use crate::models::{Person, VaccinationRecord, VaccineType};

/// Partial update of a [`Person`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonPatch {
    /// Must equal the path id; checked by the handler, never merged.
    pub id: Option<PersonId>,
    pub identification: Option<Identification>,
    pub birthday: Option<NaiveDate>,
    pub address: Option<String>,
    pub cellphone: Option<CellPhone>,
    pub account_id: Option<AccountId>,
}

/// Partial update of a [`VaccinationRecord`].
///
/// The owning person is deliberately absent: the relationship reference is
/// immutable under merge and can only change through a full replace.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaccinationPatch {
    /// Must equal the path id; checked by the handler, never merged.
    pub id: Option<VaccinationId>,
    pub vaccine_type: Option<VaccineType>,
    pub vaccination_date: Option<NaiveDate>,
    pub doses: Option<u32>,
}

/// Merge a patch into an existing person.
///
/// Pure function of its two inputs: every field explicitly supplied by the
/// patch wins, every omitted field keeps the stored value.
#[must_use]
pub fn merge_person(existing: &Person, patch: &PersonPatch) -> Person {
    let mut merged = existing.clone();

    if let Some(identification) = &patch.identification {
        merged.identification = identification.clone();
    }
    if let Some(birthday) = patch.birthday {
        merged.birthday = Some(birthday);
    }
    if let Some(address) = &patch.address {
        merged.address = Some(address.clone());
    }
    if let Some(cellphone) = &patch.cellphone {
        merged.cellphone = Some(cellphone.clone());
    }
    if let Some(account_id) = patch.account_id {
        merged.account_id = account_id;
    }

    merged
}

/// Merge a patch into an existing vaccination record.
///
/// Pure function of its two inputs; merging a patch whose set fields equal
/// `existing` is a no-op.
#[must_use]
pub fn merge_vaccination(
    existing: &VaccinationRecord,
    patch: &VaccinationPatch,
) -> VaccinationRecord {
    let mut merged = existing.clone();

    if let Some(vaccine_type) = patch.vaccine_type {
        merged.vaccine_type = vaccine_type;
    }
    if let Some(vaccination_date) = patch.vaccination_date {
        merged.vaccination_date = vaccination_date;
    }
    if let Some(doses) = patch.doses {
        merged.doses = doses;
    }

    merged
}
