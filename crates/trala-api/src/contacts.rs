//! Handlers for the `/v1` contact endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/v1/contact/{id}` | The record, or `{}` when absent |
//! | `GET`    | `/v1/contacts` | Every record, active or not |
//! | `POST`   | `/v1/contact` | Body: [`ContactInput`] with `email`; returns 201 |
//! | `PUT`    | `/v1/contact/{id}` | Body: any subset of [`ContactInput`] |
//! | `DELETE` | `/v1/contact/{id}` | Soft delete; returns the inactive record |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Serialize;
use trala_core::{ContactService, contact::Contact, input::ContactInput, store::ContactStore};

use crate::error::ApiError;

/// Body of `GET /v1/contact/{id}`: the record, or an empty object.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MaybeContact {
  Found(Contact),
  Missing {},
}

fn read_body(payload: Result<Json<ContactInput>, JsonRejection>) -> Result<ContactInput, ApiError> {
  payload
    .map(|Json(input)| input)
    .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

// ─── Reads ────────────────────────────────────────────────────────────────────

/// `GET /v1/contact/{id}`
pub async fn get_one<S>(
  State(service): State<ContactService<S>>,
  Path(id): Path<String>,
) -> Result<Json<MaybeContact>, ApiError>
where
  S: ContactStore + 'static,
{
  let contact = service.get(&id).await?;
  Ok(Json(contact.map_or(MaybeContact::Missing {}, MaybeContact::Found)))
}

/// `GET /v1/contacts`
pub async fn list<S>(
  State(service): State<ContactService<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + 'static,
{
  Ok(Json(service.list().await?))
}

// ─── Writes ───────────────────────────────────────────────────────────────────

/// `POST /v1/contact` returns 201 + the stored contact.
pub async fn create<S>(
  State(service): State<ContactService<S>>,
  payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore + 'static,
{
  let contact = service.create(read_body(payload)?).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

/// `PUT /v1/contact/{id}`
pub async fn update<S>(
  State(service): State<ContactService<S>>,
  Path(id): Path<String>,
  payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + 'static,
{
  let contact = service.update(&id, read_body(payload)?).await?;
  Ok(Json(contact))
}

/// `DELETE /v1/contact/{id}`
pub async fn deactivate<S>(
  State(service): State<ContactService<S>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + 'static,
{
  Ok(Json(service.deactivate(&id).await?))
}
