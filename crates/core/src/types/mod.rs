//! Core types for Vaxtrack.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod identification;
pub mod phone;

pub use id::*;
pub use identification::{Identification, IdentificationError};
pub use phone::{CellPhone, CellPhoneError};
