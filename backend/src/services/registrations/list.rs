use actix_web::{web, HttpResponse};
use common::model::registration::Registration;
use log::error;

use crate::errors::ApiError;
use crate::state::AppState;

/// Actix handler for `GET /api/registrations`.
pub async fn process(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let registrations = list_registrations(&state).await?;
    Ok(HttpResponse::Ok().json(registrations))
}

/// Returns every stored registration, newest first.
pub async fn list_registrations(state: &AppState) -> Result<Vec<Registration>, ApiError> {
    let conn = state.db.lock().await;
    let result = (|| -> rusqlite::Result<Vec<Registration>> {
        // rowid breaks ties between rows created in the same millisecond.
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM registrations ORDER BY created_at DESC, rowid DESC",
            super::COLUMNS
        ))?;
        let rows = stmt.query_map([], super::row_to_registration)?;
        rows.collect()
    })();

    result.map_err(|e| {
        error!("Error fetching registrations: {}", e);
        ApiError::Internal("Failed to fetch registrations")
    })
}
