//! # Registrations Service Module
//!
//! The relational submission sink: everything under `/api/registrations`.
//! Registrations are written exactly once, never updated and never deleted,
//! so the service is three handlers over a single table.
//!
//! ## Registered routes:
//!
//! *   **`POST /api/registrations`**:
//!     - **Handler**: `create::process`
//!     - **Description**: Validates a `RegistrationInput` against the same
//!       schema the form applies client-side (a bypassed client must not be
//!       able to corrupt stored data), generates the id and creation
//!       timestamp server-side, and inserts one row. Returns `201` with the
//!       stored record, `400` with a human-readable message on validation
//!       failure, `500` with a generic message otherwise.
//!
//! *   **`GET /api/registrations`**:
//!     - **Handler**: `list::process`
//!     - **Description**: Returns every stored registration as a JSON array,
//!       newest first.
//!
//! *   **`GET /api/registrations/{id}`**:
//!     - **Handler**: `get::process`
//!     - **Description**: Returns a single registration by id, or `404` when
//!       the id is unknown.

mod create;
mod get;
mod list;

use actix_web::web::{get, post, scope};
use actix_web::Scope;
use common::model::registration::Registration;
use rusqlite::Row;

const API_PATH: &str = "/api/registrations";

/// Columns in the order every query in this module selects them.
const COLUMNS: &str = "id, name, phone, email, has_joined_cg, connect_group, \
                       food_item, drink_item, bringing_gift, transfer_proof, created_at";

fn row_to_registration(row: &Row) -> rusqlite::Result<Registration> {
    Ok(Registration {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        has_joined_cg: row.get(4)?,
        connect_group: row.get(5)?,
        food_item: row.get(6)?,
        drink_item: row.get(7)?,
        bringing_gift: row.get(8)?,
        transfer_proof: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Configures and returns the Actix scope for the registrations routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("", get().to(list::process))
        .route("/{id}", get().to(get::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;
    use actix_web::{test, web, App};
    use common::model::registration::{RegistrationInput, NO_GROUP};
    use common::requests::ApiMessage;
    use serde_json::json;

    fn alice() -> RegistrationInput {
        RegistrationInput {
            name: "Alice".to_string(),
            phone: "0812000111".to_string(),
            email: "alice@x.com".to_string(),
            has_joined_cg: true,
            connect_group: Some("CG Samuel".to_string()),
            food_item: "AYAM SERUNDENG - 45000".to_string(),
            drink_item: "LEMON TEA - 20000".to_string(),
            bringing_gift: true,
            transfer_proof: "data:image/png;base64,aVZCT1J3".to_string(),
        }
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_state()))
                    .service(configure_routes()),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn create_returns_201_and_echoes_the_fields() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/registrations")
            .set_json(alice())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let stored: Registration = test::read_body_json(resp).await;
        assert!(!stored.id.is_empty());
        assert!(!stored.created_at.is_empty());
        assert_eq!(stored.name, "Alice");
        assert_eq!(stored.email, "alice@x.com");
        assert!(stored.has_joined_cg);
        assert_eq!(stored.connect_group.as_deref(), Some("CG Samuel"));
    }

    #[actix_web::test]
    async fn round_trip_through_get_by_id() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/registrations")
            .set_json(alice())
            .to_request();
        let stored: Registration = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/registrations/{}", stored.id))
            .to_request();
        let fetched: Registration = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, stored);
    }

    #[actix_web::test]
    async fn invalid_email_is_a_400_naming_the_email_field() {
        let app = test_app!();

        let mut input = alice();
        input.email = "not-an-email".to_string();
        let req = test::TestRequest::post()
            .uri("/api/registrations")
            .set_json(input)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("valid email address"));
        assert_eq!(body["errors"][0]["field"], "email");

        // Nothing was persisted.
        let req = test::TestRequest::get().uri("/api/registrations").to_request();
        let all: Vec<Registration> = test::call_and_read_body_json(&app, req).await;
        assert!(all.is_empty());
    }

    #[actix_web::test]
    async fn joined_without_a_group_is_rejected_not_defaulted() {
        let app = test_app!();

        let mut input = alice();
        input.connect_group = None;
        let req = test::TestRequest::post()
            .uri("/api/registrations")
            .set_json(input)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: ApiMessage = test::read_body_json(resp).await;
        assert!(body.message.contains("Connect Group"));
    }

    #[actix_web::test]
    async fn not_joined_stores_the_sentinel_over_a_stale_selection() {
        let app = test_app!();

        let mut input = alice();
        input.has_joined_cg = false;
        input.connect_group = Some("CG Ezra".to_string());
        let req = test::TestRequest::post()
            .uri("/api/registrations")
            .set_json(input)
            .to_request();
        let stored: Registration = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stored.connect_group.as_deref(), Some(NO_GROUP));
    }

    #[actix_web::test]
    async fn client_supplied_id_and_timestamp_are_ignored() {
        let app = test_app!();

        let mut payload = serde_json::to_value(alice()).unwrap();
        payload["id"] = json!("chosen-by-client");
        payload["createdAt"] = json!("1999-01-01T00:00:00Z");
        let req = test::TestRequest::post()
            .uri("/api/registrations")
            .set_json(payload)
            .to_request();
        let stored: Registration = test::call_and_read_body_json(&app, req).await;
        assert_ne!(stored.id, "chosen-by-client");
        assert_ne!(stored.created_at, "1999-01-01T00:00:00Z");
    }

    #[actix_web::test]
    async fn duplicate_submissions_create_distinct_records() {
        let app = test_app!();

        let mut ids = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/registrations")
                .set_json(alice())
                .to_request();
            let stored: Registration = test::call_and_read_body_json(&app, req).await;
            ids.push(stored.id);
        }
        assert_ne!(ids[0], ids[1]);

        let req = test::TestRequest::get().uri("/api/registrations").to_request();
        let all: Vec<Registration> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 2);
    }

    #[actix_web::test]
    async fn list_is_newest_first() {
        let app = test_app!();

        let mut created = Vec::new();
        for name in ["Alice A", "Bob B", "Carol C"] {
            let mut input = alice();
            input.name = name.to_string();
            let req = test::TestRequest::post()
                .uri("/api/registrations")
                .set_json(input)
                .to_request();
            let stored: Registration = test::call_and_read_body_json(&app, req).await;
            created.push(stored.id);
        }

        let req = test::TestRequest::get().uri("/api/registrations").to_request();
        let all: Vec<Registration> = test::call_and_read_body_json(&app, req).await;
        let listed: Vec<String> = all.into_iter().map(|r| r.id).collect();
        created.reverse();
        assert_eq!(listed, created);
    }

    #[actix_web::test]
    async fn unknown_id_is_a_404() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/api/registrations/not-a-real-id")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: ApiMessage = test::read_body_json(resp).await;
        assert_eq!(body.message, "Registration not found");
    }
}
