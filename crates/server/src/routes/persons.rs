//! Person route handlers.
//!
//! REST handlers for managing persons. A full replace may carry
//! `vaccinationIds`, the wholesale replacement of the owned-record set; when
//! the field is absent the relationship is left untouched.

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use vaxtrack_core::{AccountId, CellPhone, Identification, PersonId, VaccinationId};

use crate::error::{AppError, Result};
use crate::merge::{PersonPatch, merge_person};
use crate::middleware::RequireAuth;
use crate::models::Person;
use crate::state::AppState;
use crate::store::NewPerson;

const ENTITY_NAME: &str = "person";

/// Person as accepted on create and full replace.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRequest {
    #[serde(default)]
    pub id: Option<PersonId>,
    pub identification: Identification,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub cellphone: Option<CellPhone>,
    pub account_id: AccountId,
    /// Full replacement of the owned-record set; absent = leave untouched.
    #[serde(default)]
    pub vaccination_ids: Option<Vec<VaccinationId>>,
}

/// Person as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: PersonId,
    pub identification: Identification,
    pub birthday: Option<NaiveDate>,
    pub address: Option<String>,
    pub cellphone: Option<CellPhone>,
    pub account_id: AccountId,
    pub vaccination_ids: Vec<VaccinationId>,
}

impl PersonResponse {
    fn assemble(state: &AppState, person: Person) -> Self {
        let mut vaccination_ids: Vec<VaccinationId> = state
            .store()
            .persons()
            .owned_records(person.id)
            .into_iter()
            .collect();
        vaccination_ids.sort_unstable();

        Self {
            id: person.id,
            identification: person.identification,
            birthday: person.birthday,
            address: person.address,
            cellphone: person.cellphone,
            account_id: person.account_id,
            vaccination_ids,
        }
    }
}

/// The replacement set must not contain duplicate identifiers.
fn to_unique_set(ids: Vec<VaccinationId>) -> Result<HashSet<VaccinationId>> {
    let len = ids.len();
    let set: HashSet<VaccinationId> = ids.into_iter().collect();
    if set.len() != len {
        return Err(AppError::Validation(
            "vaccinationIds contains duplicate identifiers".to_owned(),
        ));
    }
    Ok(set)
}

/// `POST /persons` : Create a new person.
///
/// Returns 201 with the created person (empty owned-record set), 400 if the
/// person already carries an id, or 409 on a uniqueness violation.
pub async fn create(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Json(body): Json<PersonRequest>,
) -> Result<impl IntoResponse> {
    tracing::debug!(?body, "REST request to save Person");

    if body.id.is_some() {
        return Err(AppError::IdentityPreset(ENTITY_NAME));
    }
    if body.vaccination_ids.as_ref().is_some_and(|ids| !ids.is_empty()) {
        return Err(AppError::Validation(
            "a new person cannot be created with vaccination records".to_owned(),
        ));
    }

    let person = state.store().persons().create(NewPerson {
        identification: body.identification,
        birthday: body.birthday,
        address: body.address,
        cellphone: body.cellphone,
        account_id: body.account_id,
    })?;

    let location = format!("/persons/{}", person.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PersonResponse::assemble(&state, person)),
    ))
}

/// `PUT /persons/{id}` : Full replace of an existing person.
///
/// When `vaccinationIds` is present, the owned-record set is replaced
/// wholesale (every id must exist, and no currently-owned record may be left
/// ownerless). Returns 200 with the updated person, 400 if the id is
/// missing, mismatched, or unknown, or 409 on a uniqueness violation.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
    _auth: RequireAuth,
    Json(body): Json<PersonRequest>,
) -> Result<Json<PersonResponse>> {
    tracing::debug!(%id, ?body, "REST request to update Person");

    let body_id = body.id.ok_or(AppError::IdentityMissing(ENTITY_NAME))?;
    if body_id != id {
        return Err(AppError::IdentityMismatch {
            path: id.as_i64(),
            body: body_id.as_i64(),
        });
    }
    if !state.store().persons().exists(id) {
        return Err(AppError::Validation(format!(
            "{ENTITY_NAME} {id} does not exist"
        )));
    }

    let vaccination_ids = body.vaccination_ids.map(to_unique_set).transpose()?;

    let person = state.store().persons().save(
        Person {
            id,
            identification: body.identification,
            birthday: body.birthday,
            address: body.address,
            cellphone: body.cellphone,
            account_id: body.account_id,
        },
        vaccination_ids,
    )?;

    Ok(Json(PersonResponse::assemble(&state, person)))
}

/// `PATCH /persons/{id}` : Partial update of an existing person.
///
/// Fields absent from the body are left untouched; the owned-record set is
/// never changed this way. Returns 200 with the merged person, 400 if the id
/// is missing or mismatched, 404 if the person does not exist, or 409 on a
/// uniqueness violation.
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
    _auth: RequireAuth,
    Json(patch): Json<PersonPatch>,
) -> Result<Json<PersonResponse>> {
    tracing::debug!(%id, ?patch, "REST request to partial update Person");

    let body_id = patch.id.ok_or(AppError::IdentityMissing(ENTITY_NAME))?;
    if body_id != id {
        return Err(AppError::IdentityMismatch {
            path: id.as_i64(),
            body: body_id.as_i64(),
        });
    }

    let existing = state
        .store()
        .persons()
        .find_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("{ENTITY_NAME} {id}")))?;

    let merged = merge_person(&existing, &patch);
    let person = state.store().persons().save(merged, None)?;

    Ok(Json(PersonResponse::assemble(&state, person)))
}

/// `GET /persons` : List all persons.
pub async fn list(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> Result<Json<Vec<PersonResponse>>> {
    tracing::debug!("REST request to get all Persons");

    let persons = state
        .store()
        .persons()
        .find_all()
        .into_iter()
        .map(|person| PersonResponse::assemble(&state, person))
        .collect();
    Ok(Json(persons))
}

/// `GET /persons/{id}` : Get one person.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
    _auth: RequireAuth,
) -> Result<Json<PersonResponse>> {
    tracing::debug!(%id, "REST request to get Person");

    let person = state
        .store()
        .persons()
        .find_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("{ENTITY_NAME} {id}")))?;
    Ok(Json(PersonResponse::assemble(&state, person)))
}

/// `DELETE /persons/{id}` : Delete a person.
///
/// Returns 204 on success (including an unknown id), or 409 while the person
/// still owns vaccination records; owned records block deletion rather than
/// cascading.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
    _auth: RequireAuth,
) -> Result<StatusCode> {
    tracing::debug!(%id, "REST request to delete Person");

    state.store().persons().delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
