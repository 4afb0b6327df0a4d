use actix_web::{web, HttpResponse};
use common::model::registration::Registration;
use log::error;
use rusqlite::params;

use crate::errors::ApiError;
use crate::state::AppState;

/// Actix handler for `GET /api/registrations/{id}`.
pub async fn process(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let registration = get_registration(&state, &id).await?;
    Ok(HttpResponse::Ok().json(registration))
}

/// Fetches one registration by id; unknown ids map to `ApiError::NotFound`.
pub async fn get_registration(state: &AppState, id: &str) -> Result<Registration, ApiError> {
    let conn = state.db.lock().await;
    let result = conn.query_row(
        &format!("SELECT {} FROM registrations WHERE id = ?1", super::COLUMNS),
        params![id],
        super::row_to_registration,
    );

    match result {
        Ok(registration) => Ok(registration),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(ApiError::NotFound),
        Err(e) => {
            error!("Error fetching registration {}: {}", id, e);
            Err(ApiError::Internal("Failed to fetch registration"))
        }
    }
}
