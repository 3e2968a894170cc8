//! Person repository for store operations.

use std::collections::HashSet;

use chrono::NaiveDate;

use vaxtrack_core::{AccountId, CellPhone, Identification, PersonId, VaccinationId};

use super::{Store, StoreError};
use crate::models::Person;

/// Fields for creating a person; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub identification: Identification,
    pub birthday: Option<NaiveDate>,
    pub address: Option<String>,
    pub cellphone: Option<CellPhone>,
    pub account_id: AccountId,
}

/// Repository for person store operations.
pub struct PersonRepository<'a> {
    store: &'a Store,
}

impl<'a> PersonRepository<'a> {
    /// Create a new person repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Insert a new person with a store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the identification code or the
    /// account reference is already taken.
    pub fn create(&self, new: NewPerson) -> Result<Person, StoreError> {
        let mut tables = self.store.tables_mut();

        check_unique(tables.persons.values(), None, &new.identification, new.account_id)?;

        let person = Person {
            id: PersonId::new(self.store.next_id()),
            identification: new.identification,
            birthday: new.birthday,
            address: new.address,
            cellphone: new.cellphone,
            account_id: new.account_id,
        };
        tables.persons.insert(person.id, person.clone());

        Ok(person)
    }

    /// All persons, ordered by id.
    #[must_use]
    pub fn find_all(&self) -> Vec<Person> {
        let tables = self.store.tables();
        let mut persons: Vec<Person> = tables.persons.values().cloned().collect();
        persons.sort_by_key(|p| p.id);
        persons
    }

    /// Look up a person by id.
    #[must_use]
    pub fn find_by_id(&self, id: PersonId) -> Option<Person> {
        self.store.tables().persons.get(&id).cloned()
    }

    /// Whether a person with this id exists.
    #[must_use]
    pub fn exists(&self, id: PersonId) -> bool {
        self.store.tables().persons.contains_key(&id)
    }

    /// Ids of the vaccination records this person owns.
    #[must_use]
    pub fn owned_records(&self, id: PersonId) -> HashSet<VaccinationId> {
        self.store.tables().relations.records_of(id)
    }

    /// Save a person's fields and, when `vaccination_ids` is supplied,
    /// replace their owned-record set wholesale.
    ///
    /// Relationship mutation and persistence commit under one lock; nothing
    /// is written when any check fails.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the person does not exist.
    /// - `StoreError::Conflict` on a uniqueness violation.
    /// - `StoreError::InvalidReference` if `vaccination_ids` names an unknown
    ///   record, or the replacement would leave a record with no owner.
    pub fn save(
        &self,
        person: Person,
        vaccination_ids: Option<HashSet<VaccinationId>>,
    ) -> Result<Person, StoreError> {
        let mut tables = self.store.tables_mut();

        if !tables.persons.contains_key(&person.id) {
            return Err(StoreError::NotFound);
        }
        check_unique(
            tables.persons.values(),
            Some(person.id),
            &person.identification,
            person.account_id,
        )?;

        if let Some(new_ids) = vaccination_ids {
            for id in &new_ids {
                if !tables.vaccinations.contains_key(id) {
                    return Err(StoreError::InvalidReference(format!(
                        "vaccination record {id} does not exist"
                    )));
                }
            }

            // A record detached here without a new owner would violate the
            // required-owner rule, so the whole replace is rejected up front.
            let current = tables.relations.records_of(person.id);
            if let Some(orphan) = current.difference(&new_ids).next() {
                return Err(StoreError::InvalidReference(format!(
                    "vaccination record {orphan} would be left without an owner"
                )));
            }

            tables.relations.replace_all(person.id, new_ids.clone());
            for id in new_ids {
                if let Some(record) = tables.vaccinations.get_mut(&id) {
                    record.person_id = person.id;
                }
            }
        }

        tables.persons.insert(person.id, person.clone());
        Ok(person)
    }

    /// Delete a person. No-op if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the person still owns vaccination
    /// records; owned records block deletion rather than cascading.
    pub fn delete(&self, id: PersonId) -> Result<(), StoreError> {
        let mut tables = self.store.tables_mut();

        if !tables.relations.records_of(id).is_empty() {
            return Err(StoreError::Conflict(format!(
                "person {id} still owns vaccination records"
            )));
        }

        tables.persons.remove(&id);
        tables.relations.remove_person(id);
        Ok(())
    }
}

/// Enforce the global uniqueness of the identification code and the account
/// reference, skipping `exclude` (the person being updated).
fn check_unique<'p>(
    persons: impl Iterator<Item = &'p Person>,
    exclude: Option<PersonId>,
    identification: &Identification,
    account_id: AccountId,
) -> Result<(), StoreError> {
    for other in persons {
        if Some(other.id) == exclude {
            continue;
        }
        if other.identification == *identification {
            return Err(StoreError::Conflict(format!(
                "identification {identification} is already registered"
            )));
        }
        if other.account_id == account_id {
            return Err(StoreError::Conflict(format!(
                "account {account_id} is already linked to a person"
            )));
        }
    }
    Ok(())
}
