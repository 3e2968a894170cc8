//! Vaccination-record repository for store operations.

use chrono::NaiveDate;

use vaxtrack_core::{PersonId, VaccinationId};

use super::{Store, StoreError};
use crate::models::{VaccinationRecord, VaccineType};

/// Fields for creating a vaccination record; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewVaccination {
    pub vaccine_type: VaccineType,
    pub vaccination_date: NaiveDate,
    pub doses: u32,
    pub person_id: PersonId,
}

/// Repository for vaccination-record store operations.
pub struct VaccinationRepository<'a> {
    store: &'a Store,
}

impl<'a> VaccinationRepository<'a> {
    /// Create a new vaccination repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Insert a new record with a store-assigned id and attach it to its
    /// owner in the same commit.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidReference` if the owning person does not
    /// exist. Records are only ever created with an owner already resolved.
    pub fn create(&self, new: NewVaccination) -> Result<VaccinationRecord, StoreError> {
        let mut tables = self.store.tables_mut();

        if !tables.persons.contains_key(&new.person_id) {
            return Err(StoreError::InvalidReference(format!(
                "person {} does not exist",
                new.person_id
            )));
        }

        let record = VaccinationRecord {
            id: VaccinationId::new(self.store.next_id()),
            vaccine_type: new.vaccine_type,
            vaccination_date: new.vaccination_date,
            doses: new.doses,
            person_id: new.person_id,
        };
        tables.vaccinations.insert(record.id, record.clone());
        tables.relations.attach(record.person_id, record.id);

        Ok(record)
    }

    /// All records, ordered by id.
    #[must_use]
    pub fn find_all(&self) -> Vec<VaccinationRecord> {
        let tables = self.store.tables();
        let mut records: Vec<VaccinationRecord> = tables.vaccinations.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        records
    }

    /// Look up a record by id.
    #[must_use]
    pub fn find_by_id(&self, id: VaccinationId) -> Option<VaccinationRecord> {
        self.store.tables().vaccinations.get(&id).cloned()
    }

    /// Whether a record with this id exists.
    #[must_use]
    pub fn exists(&self, id: VaccinationId) -> bool {
        self.store.tables().vaccinations.contains_key(&id)
    }

    /// Save a record's full state, moving it between owners when the owning
    /// person changed.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the record does not exist.
    /// - `StoreError::InvalidReference` if the new owner does not exist.
    pub fn save(&self, record: VaccinationRecord) -> Result<VaccinationRecord, StoreError> {
        let mut tables = self.store.tables_mut();

        let Some(previous_owner) = tables.vaccinations.get(&record.id).map(|r| r.person_id)
        else {
            return Err(StoreError::NotFound);
        };

        if !tables.persons.contains_key(&record.person_id) {
            return Err(StoreError::InvalidReference(format!(
                "person {} does not exist",
                record.person_id
            )));
        }

        if previous_owner != record.person_id {
            // attach alone would leave the old owner's set stale
            tables.relations.detach(previous_owner, record.id);
            tables.relations.attach(record.person_id, record.id);
        }
        tables.vaccinations.insert(record.id, record.clone());

        Ok(record)
    }

    /// Delete a record and detach it from its owner. No-op if the id is
    /// unknown.
    pub fn delete(&self, id: VaccinationId) {
        let mut tables = self.store.tables_mut();

        if let Some(record) = tables.vaccinations.remove(&id) {
            tables.relations.detach(record.person_id, id);
        }
    }
}
