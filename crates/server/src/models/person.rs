//! Person domain type.
//!
//! A person is an application user linked one-to-one to an authentication
//! account. Vaccination-record ownership is not stored on the person itself;
//! it lives in the store's [`OwnershipIndex`](crate::relations::OwnershipIndex).

use chrono::NaiveDate;

use vaxtrack_core::{AccountId, CellPhone, Identification, PersonId};

/// A registered person (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Unique person ID, assigned by the store.
    pub id: PersonId,
    /// External identification code, globally unique.
    pub identification: Identification,
    /// Date of birth.
    pub birthday: Option<NaiveDate>,
    /// Free-text address.
    pub address: Option<String>,
    /// Cellphone number.
    pub cellphone: Option<CellPhone>,
    /// Linked authentication account, globally unique.
    pub account_id: AccountId,
}
