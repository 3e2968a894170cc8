//! Vaxtrack Core - Shared types library.
//!
//! This crate provides common types used across all Vaxtrack components:
//! - `server` - The vaccination registry HTTP service
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and validated value types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
