//! Vaccination-record route handlers.
//!
//! REST handlers for managing vaccination records. Identity checks run in a
//! fixed order before any store call: body id presence, path/body agreement,
//! target existence.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use vaxtrack_core::{PersonId, VaccinationId};

use crate::error::{AppError, Result};
use crate::merge::{VaccinationPatch, merge_vaccination};
use crate::middleware::RequireAuth;
use crate::models::{VaccinationRecord, VaccineType};
use crate::state::AppState;
use crate::store::NewVaccination;

const ENTITY_NAME: &str = "vaccination record";

/// Vaccination record as accepted on create and full replace.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRequest {
    #[serde(default)]
    pub id: Option<VaccinationId>,
    pub vaccine_type: VaccineType,
    pub vaccination_date: NaiveDate,
    pub doses: u32,
    pub person_id: PersonId,
}

/// Vaccination record as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationResponse {
    pub id: VaccinationId,
    pub vaccine_type: VaccineType,
    pub vaccination_date: NaiveDate,
    pub doses: u32,
    pub person_id: PersonId,
}

impl From<VaccinationRecord> for VaccinationResponse {
    fn from(record: VaccinationRecord) -> Self {
        Self {
            id: record.id,
            vaccine_type: record.vaccine_type,
            vaccination_date: record.vaccination_date,
            doses: record.doses,
            person_id: record.person_id,
        }
    }
}

fn check_doses(doses: u32) -> Result<()> {
    if doses == 0 {
        return Err(AppError::Validation(
            "doses must be a positive integer".to_owned(),
        ));
    }
    Ok(())
}

/// `POST /vaccination-records` : Create a new vaccination record.
///
/// Returns 201 with the created record, or 400 if the record already carries
/// an id or references an unknown person.
pub async fn create(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Json(body): Json<VaccinationRequest>,
) -> Result<impl IntoResponse> {
    tracing::debug!(?body, "REST request to save VaccinationRecord");

    if body.id.is_some() {
        return Err(AppError::IdentityPreset(ENTITY_NAME));
    }
    check_doses(body.doses)?;

    let record = state.store().vaccinations().create(NewVaccination {
        vaccine_type: body.vaccine_type,
        vaccination_date: body.vaccination_date,
        doses: body.doses,
        person_id: body.person_id,
    })?;

    let location = format!("/vaccination-records/{}", record.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(VaccinationResponse::from(record)),
    ))
}

/// `PUT /vaccination-records/{id}` : Full replace of an existing record.
///
/// Returns 200 with the updated record, or 400 if the id is missing,
/// mismatched, or unknown.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<VaccinationId>,
    _auth: RequireAuth,
    Json(body): Json<VaccinationRequest>,
) -> Result<Json<VaccinationResponse>> {
    tracing::debug!(%id, ?body, "REST request to update VaccinationRecord");

    let body_id = body.id.ok_or(AppError::IdentityMissing(ENTITY_NAME))?;
    if body_id != id {
        return Err(AppError::IdentityMismatch {
            path: id.as_i64(),
            body: body_id.as_i64(),
        });
    }
    if !state.store().vaccinations().exists(id) {
        return Err(AppError::Validation(format!(
            "{ENTITY_NAME} {id} does not exist"
        )));
    }
    check_doses(body.doses)?;

    let record = state.store().vaccinations().save(VaccinationRecord {
        id,
        vaccine_type: body.vaccine_type,
        vaccination_date: body.vaccination_date,
        doses: body.doses,
        person_id: body.person_id,
    })?;

    Ok(Json(VaccinationResponse::from(record)))
}

/// `PATCH /vaccination-records/{id}` : Partial update of an existing record.
///
/// Fields absent from the body are left untouched; the owning person cannot
/// be changed this way. Returns 200 with the merged record, 400 if the id is
/// missing or mismatched, or 404 if the record does not exist.
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<VaccinationId>,
    _auth: RequireAuth,
    Json(patch): Json<VaccinationPatch>,
) -> Result<Json<VaccinationResponse>> {
    tracing::debug!(%id, ?patch, "REST request to partial update VaccinationRecord");

    let body_id = patch.id.ok_or(AppError::IdentityMissing(ENTITY_NAME))?;
    if body_id != id {
        return Err(AppError::IdentityMismatch {
            path: id.as_i64(),
            body: body_id.as_i64(),
        });
    }
    if let Some(doses) = patch.doses {
        check_doses(doses)?;
    }

    let existing = state
        .store()
        .vaccinations()
        .find_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("{ENTITY_NAME} {id}")))?;

    let merged = merge_vaccination(&existing, &patch);
    let record = state.store().vaccinations().save(merged)?;

    Ok(Json(VaccinationResponse::from(record)))
}

/// `GET /vaccination-records` : List all vaccination records.
pub async fn list(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> Result<Json<Vec<VaccinationResponse>>> {
    tracing::debug!("REST request to get all VaccinationRecords");

    let records = state
        .store()
        .vaccinations()
        .find_all()
        .into_iter()
        .map(VaccinationResponse::from)
        .collect();
    Ok(Json(records))
}

/// `GET /vaccination-records/{id}` : Get one vaccination record.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<VaccinationId>,
    _auth: RequireAuth,
) -> Result<Json<VaccinationResponse>> {
    tracing::debug!(%id, "REST request to get VaccinationRecord");

    let record = state
        .store()
        .vaccinations()
        .find_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("{ENTITY_NAME} {id}")))?;
    Ok(Json(VaccinationResponse::from(record)))
}

/// `DELETE /vaccination-records/{id}` : Delete a vaccination record.
///
/// Returns 204 whether or not the id existed.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<VaccinationId>,
    _auth: RequireAuth,
) -> StatusCode {
    tracing::debug!(%id, "REST request to delete VaccinationRecord");

    state.store().vaccinations().delete(id);
    StatusCode::NO_CONTENT
}
