//! Person <-> vaccination-record relationship bookkeeping.
//!
//! Ownership is modeled as a pair of indices (person -> owned record ids,
//! record id -> owning person) instead of mutual object references. The two
//! maps must mirror each other: no record may point at a person that does not
//! list it, and no listed record may point at a different person.
//!
//! All operations are pure in-memory mutations; persistence is the caller's
//! concern and must be committed together with these changes as one unit.

use std::collections::{HashMap, HashSet};

use vaxtrack_core::{PersonId, VaccinationId};

/// Bidirectional ownership index between persons and vaccination records.
#[derive(Debug, Clone, Default)]
pub struct OwnershipIndex {
    /// Forward collection: person -> ids of the records they own.
    owned: HashMap<PersonId, HashSet<VaccinationId>>,
    /// Back-reference: record -> its owning person.
    owner: HashMap<VaccinationId, PersonId>,
}

impl OwnershipIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `person`'s owned set wholesale.
    ///
    /// Records previously owned by `person` but absent from `new_ids` lose
    /// their owner. Every record in `new_ids` becomes owned by `person`; a
    /// record taken over from another person is removed from that person's
    /// set as well, so the index stays mirror-consistent.
    ///
    /// Tolerates the empty set (detaches everything) and is idempotent when
    /// called twice with the same target set.
    pub fn replace_all(&mut self, person: PersonId, new_ids: HashSet<VaccinationId>) {
        let current = self.owned.get(&person).cloned().unwrap_or_default();

        for record in current.difference(&new_ids) {
            self.owner.remove(record);
        }

        for &record in &new_ids {
            if let Some(previous) = self.owner.insert(record, person)
                && previous != person
                && let Some(set) = self.owned.get_mut(&previous)
            {
                set.remove(&record);
            }
        }

        if new_ids.is_empty() {
            self.owned.remove(&person);
        } else {
            self.owned.insert(person, new_ids);
        }
    }

    /// Add `record` to `person`'s owned set and make `person` its owner,
    /// overwriting any prior owner entry.
    ///
    /// A record belongs to at most one person, so attaching implicitly
    /// detaches it from its previous owner - but this operation does not
    /// chase the previous owner's set. Callers moving a record between two
    /// persons pair this with [`detach`](Self::detach) on the old owner
    /// (the store repositories always do).
    pub fn attach(&mut self, person: PersonId, record: VaccinationId) {
        self.owned.entry(person).or_default().insert(record);
        self.owner.insert(record, person);
    }

    /// Remove `record` from `person`'s owned set and clear its owner entry.
    ///
    /// No-op if `record` is not owned by `person`.
    pub fn detach(&mut self, person: PersonId, record: VaccinationId) {
        if let Some(set) = self.owned.get_mut(&person)
            && set.remove(&record)
        {
            if set.is_empty() {
                self.owned.remove(&person);
            }
            // Guard against clearing a newer owner written by a bare attach.
            if self.owner.get(&record) == Some(&person) {
                self.owner.remove(&record);
            }
        }
    }

    /// The person currently owning `record`, if any.
    #[must_use]
    pub fn owner_of(&self, record: VaccinationId) -> Option<PersonId> {
        self.owner.get(&record).copied()
    }

    /// The set of records currently owned by `person`.
    ///
    /// Returns an empty set for a person that owns nothing.
    #[must_use]
    pub fn records_of(&self, person: PersonId) -> HashSet<VaccinationId> {
        self.owned.get(&person).cloned().unwrap_or_default()
    }

    /// Forget every relationship involving `person`.
    ///
    /// Used when a person is removed from the store.
    pub fn remove_person(&mut self, person: PersonId) {
        if let Some(set) = self.owned.remove(&person) {
            for record in set {
                self.owner.remove(&record);
            }
        }
    }

    /// Check that the two indices mirror each other.
    ///
    /// Holds after any sequence of `replace_all`/`detach` calls; a bare
    /// `attach` that steals a record leaves the old owner's set stale until
    /// the caller detaches it.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let forward_agrees = self.owned.iter().all(|(person, records)| {
            records
                .iter()
                .all(|record| self.owner.get(record) == Some(person))
        });

        let backward_agrees = self.owner.iter().all(|(record, person)| {
            self.owned
                .get(person)
                .is_some_and(|records| records.contains(record))
        });

        forward_agrees && backward_agrees
    }
}
