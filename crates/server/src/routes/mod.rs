//! HTTP route handlers for the vaccination registry.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Health check (unauthenticated)
//!
//! # Persons
//! POST   /persons                   - Create a person
//! GET    /persons                   - List all persons
//! GET    /persons/{id}              - Get one person
//! PUT    /persons/{id}              - Full replace (may replace the owned-record set)
//! PATCH  /persons/{id}              - Partial update
//! DELETE /persons/{id}              - Delete (blocked while records are owned)
//!
//! # Vaccination records
//! POST   /vaccination-records       - Create a record (owner must exist)
//! GET    /vaccination-records       - List all records
//! GET    /vaccination-records/{id}  - Get one record
//! PUT    /vaccination-records/{id}  - Full replace (may move the record between owners)
//! PATCH  /vaccination-records/{id}  - Partial update (owner immutable)
//! DELETE /vaccination-records/{id}  - Delete
//! ```
//!
//! All entity routes require a bearer token; see [`crate::middleware::auth`].

pub mod persons;
pub mod vaccinations;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the person routes router.
pub fn person_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(persons::create).get(persons::list))
        .route(
            "/{id}",
            get(persons::show)
                .put(persons::update)
                .patch(persons::partial_update)
                .delete(persons::remove),
        )
}

/// Create the vaccination-record routes router.
pub fn vaccination_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(vaccinations::create).get(vaccinations::list))
        .route(
            "/{id}",
            get(vaccinations::show)
                .put(vaccinations::update)
                .patch(vaccinations::partial_update)
                .delete(vaccinations::remove),
        )
}

/// Create all entity routes for the registry.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/persons", person_routes())
        .nest("/vaccination-records", vaccination_routes())
}
