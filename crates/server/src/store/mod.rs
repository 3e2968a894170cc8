//! In-memory record store.
//!
//! The registry persists into a keyed in-memory store: one table per entity
//! plus the ownership index, all behind a single lock so every request's
//! reads and writes commit as one atomic unit. Identifiers come from a
//! monotonic sequence and are never reused, not even after a delete.
//!
//! Access goes through per-entity repositories, created per call:
//!
//! ```rust,ignore
//! let person = store.persons().find_by_id(id);
//! ```

pub mod persons;
pub mod vaccinations;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::RwLock;

use vaxtrack_core::{PersonId, VaccinationId};

use crate::models::{Person, VaccinationRecord};
use crate::relations::OwnershipIndex;

pub use persons::{NewPerson, PersonRepository};
pub use vaccinations::{NewVaccination, VaccinationRepository};

/// Errors returned by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique identification code).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A write referenced an entity that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}

/// Shared handle to the in-memory store.
///
/// Cheaply cloneable; all clones see the same data.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    sequence: AtomicI64,
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    persons: HashMap<PersonId, Person>,
    vaccinations: HashMap<VaccinationId, VaccinationRecord>,
    relations: OwnershipIndex,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository for person operations.
    #[must_use]
    pub const fn persons(&self) -> PersonRepository<'_> {
        PersonRepository::new(self)
    }

    /// Repository for vaccination-record operations.
    #[must_use]
    pub const fn vaccinations(&self) -> VaccinationRepository<'_> {
        VaccinationRepository::new(self)
    }

    /// Next identifier from the store-owned sequence.
    ///
    /// Unique and stable once assigned; deleted ids are never handed out
    /// again.
    fn next_id(&self) -> i64 {
        self.inner.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn tables(&self) -> parking_lot::RwLockReadGuard<'_, Tables> {
        self.inner.tables.read()
    }

    fn tables_mut(&self) -> parking_lot::RwLockWriteGuard<'_, Tables> {
        self.inner.tables.write()
    }
}
