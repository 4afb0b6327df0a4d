use actix_web::{web, HttpResponse};
use chrono::{SecondsFormat, Utc};
use common::model::registration::{Registration, RegistrationInput};
use common::validation::{validated, Policy};
use log::error;
use rusqlite::params;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::state::AppState;

/// Actix handler for `POST /api/registrations`.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<RegistrationInput>,
) -> Result<HttpResponse, ApiError> {
    let stored = create_registration(&state, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(stored))
}

/// Validates the payload under the strict policy and inserts a single row.
///
/// The id and creation timestamp are always generated here; anything the
/// client sent for them was already dropped at deserialization.
pub async fn create_registration(
    state: &AppState,
    input: RegistrationInput,
) -> Result<Registration, ApiError> {
    let input = validated(input, Policy::Strict).map_err(ApiError::Validation)?;

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let record = Registration::from_input(input, id, created_at);

    let conn = state.db.lock().await;
    conn.execute(
        "INSERT INTO registrations (id, name, phone, email, has_joined_cg, connect_group, \
         food_item, drink_item, bringing_gift, transfer_proof, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            record.id,
            record.name,
            record.phone,
            record.email,
            record.has_joined_cg,
            record.connect_group,
            record.food_item,
            record.drink_item,
            record.bringing_gift,
            record.transfer_proof,
            record.created_at,
        ],
    )
    .map_err(|e| {
        error!("Error creating registration: {}", e);
        ApiError::Internal("Failed to create registration")
    })?;

    Ok(record)
}
